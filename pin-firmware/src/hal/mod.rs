// Hardware Abstraction Layer (HAL) Module
//
// Implementiert den PinDriver Trait aus pin-core für ESP32-C6 GPIOs.
// Tests laufen gegen den MockPinDriver in pin-tests.

pub mod gpio_driver;

pub use gpio_driver::{GpioPinDriver, PIN_SLOTS};
