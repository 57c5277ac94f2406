//! Pin Core - Platform-agnostic Pin-Tabelle, Controller und Bridge
//!
//! Diese Crate enthält KEINE Hardware-Dependencies.
//! Sie definiert Traits, die Pin-Tabelle und Pure Logic.

#![no_std]

pub mod bridge;
pub mod controller;
#[cfg(feature = "serde")]
pub mod protocol;
pub mod table;
pub mod traits;
pub mod types;

// Re-exports für einfachen Zugriff
pub use bridge::{Bridge, BridgeError, Handler};
pub use controller::{
    BRIDGE_CAPACITY, PinBridge, PinController, SET_PIN_METHOD, StartupReport, set_pin_handler,
    startup,
};
pub use table::{LED_BUILTIN, PIN_COUNT, PIN_TABLE, find_index, led_indicators, lookup};
pub use traits::{PinDriver, PinError};
pub use types::{
    BridgeCall, Level, METHOD_NAME_CAPACITY, PIN_NAME_CAPACITY, PinEntry, PinId, Polarity,
    SetPinArgs, SetPinOutcome,
};
