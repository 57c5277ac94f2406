// GPIO Pin Driver - PinDriver Implementierung für ESP32-C6 GPIOs
//
// Ordnet Pin-Kennungen aus der Pin-Tabelle physischen GPIOs zu.
// Kennungen ohne Verdrahtung liefern PinError::Unrouted.

use esp_hal::gpio::{AnyPin, Level as GpioLevel, Output, OutputConfig};
use pin_core::{Level, PinDriver, PinError, PinId};

/// Anzahl der Slots (Kennungen 0..PIN_SLOTS)
pub const PIN_SLOTS: usize = 32;

/// Zustand eines Slots
enum Slot {
    /// Kein GPIO verdrahtet
    Empty,
    /// GPIO verdrahtet, aber noch nicht als Ausgang konfiguriert
    Routed(AnyPin<'static>),
    /// Als digitaler Ausgang konfiguriert
    Output(Output<'static>),
}

/// Real Hardware Pin Driver
///
/// Entspricht `pinMode(OUTPUT)` / `digitalWrite()`:
/// - `route()` verdrahtet eine Kennung mit einem GPIO (beim Boot in main)
/// - `configure_output()` macht daraus einen Output
/// - `write()` setzt den Pegel
pub struct GpioPinDriver {
    slots: [Slot; PIN_SLOTS],
}

impl GpioPinDriver {
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| Slot::Empty),
        }
    }

    /// Verdrahtet die Kennung `id` mit einem GPIO
    ///
    /// Gibt `PinError::Unrouted` zurück wenn `id` außerhalb der Slots liegt.
    pub fn route(&mut self, id: PinId, pin: AnyPin<'static>) -> Result<(), PinError> {
        let slot = self
            .slots
            .get_mut(id.number() as usize)
            .ok_or(PinError::Unrouted(id))?;
        *slot = Slot::Routed(pin);
        Ok(())
    }

    /// Anzahl verdrahteter Kennungen
    pub fn routed_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !matches!(slot, Slot::Empty))
            .count()
    }

    fn slot_mut(&mut self, id: PinId) -> Result<&mut Slot, PinError> {
        self.slots
            .get_mut(id.number() as usize)
            .ok_or(PinError::Unrouted(id))
    }
}

impl Default for GpioPinDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PinDriver for GpioPinDriver {
    fn configure_output(&mut self, id: PinId) -> Result<(), PinError> {
        let slot = self.slot_mut(id)?;
        match core::mem::replace(slot, Slot::Empty) {
            Slot::Empty => Err(PinError::Unrouted(id)),
            Slot::Routed(pin) => {
                *slot = Slot::Output(Output::new(pin, GpioLevel::Low, OutputConfig::default()));
                Ok(())
            }
            // Bereits Ausgang: unverändert lassen
            Slot::Output(output) => {
                *slot = Slot::Output(output);
                Ok(())
            }
        }
    }

    fn write(&mut self, id: PinId, level: Level) -> Result<(), PinError> {
        match self.slot_mut(id)? {
            Slot::Output(output) => {
                output.set_level(match level {
                    Level::High => GpioLevel::High,
                    Level::Low => GpioLevel::Low,
                });
                Ok(())
            }
            Slot::Routed(_) => Err(PinError::NotConfigured(id)),
            Slot::Empty => Err(PinError::Unrouted(id)),
        }
    }
}
