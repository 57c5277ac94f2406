//! Core Types für die Pin-Steuerung
//!
//! Datenstrukturen ohne Hardware-Dependencies

use heapless::String;

use crate::traits::PinError;

/// Maximale Länge eines Pin-Namens in Nachrichten
///
/// Der längste Tabellen-Name ist "LED3_R" (6 Zeichen).
pub const PIN_NAME_CAPACITY: usize = 16;

/// Maximale Länge eines Methoden-Namens in Bridge-Aufrufen
/// ("set_pin_by_name" = 15 Zeichen)
pub const METHOD_NAME_CAPACITY: usize = 32;

/// Hardware-Pin-Kennung (plattformabhängige kleine Ganzzahl)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct PinId(pub u8);

impl PinId {
    /// Rohwert der Kennung
    pub const fn number(self) -> u8 {
        self.0
    }
}

/// Elektrischer Pegel eines Ausgangs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "lowercase")
)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    /// `true` → High, `false` → Low. Keine Invertierung!
    fn from(high: bool) -> Self {
        if high { Level::High } else { Level::Low }
    }
}

/// Polarität eines Pins
///
/// Reine Metadaten: der Setter invertiert nie. Die Polarität bestimmt nur
/// den sicheren Default beim Start und wird dem Host zur Verfügung gestellt,
/// damit dieser Active-Low selbst umrechnen kann.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "snake_case")
)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Pegel, bei dem die angeschlossene Last "an" ist
    pub const fn active_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::High,
            Polarity::ActiveLow => Level::Low,
        }
    }

    /// Pegel, bei dem die angeschlossene Last "aus" ist
    ///
    /// ```
    /// # use pin_core::{Level, Polarity};
    /// assert_eq!(Polarity::ActiveLow.inactive_level(), Level::High);
    /// assert_eq!(Polarity::ActiveHigh.inactive_level(), Level::Low);
    /// ```
    pub const fn inactive_level(self) -> Level {
        match self {
            Polarity::ActiveHigh => Level::Low,
            Polarity::ActiveLow => Level::High,
        }
    }
}

/// Eintrag der Pin-Tabelle: symbolischer Name → Hardware-Kennung
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PinEntry {
    pub name: &'static str,
    pub id: PinId,
    pub polarity: Polarity,
}

impl PinEntry {
    /// Erstellt einen Tabellen-Eintrag (const, für die statische Tabelle)
    pub const fn new(name: &'static str, id: u8, polarity: Polarity) -> Self {
        Self {
            name,
            id: PinId(id),
            polarity,
        }
    }
}

/// Argumente für `set_pin_by_name(name, state)`
///
/// Besitzt den Namen (heapless), damit der Aufruf über einen Channel
/// an den Pin-Task geschickt werden kann.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetPinArgs {
    pub name: String<PIN_NAME_CAPACITY>,
    pub level: bool,
}

impl SetPinArgs {
    /// Erstellt Argumente aus einem Namen und einem Pegel
    ///
    /// Gibt `None` zurück wenn der Name nicht in `PIN_NAME_CAPACITY` passt.
    /// So ein Name kann in der Tabelle nicht vorkommen.
    pub fn new(name: &str, level: bool) -> Option<Self> {
        let mut owned = String::new();
        owned.push_str(name).ok()?;
        Some(Self { name: owned, level })
    }
}

/// Remote-Aufruf, wie er vom Transport an den Pin-Task geht
///
/// Der Pin-Task dispatcht über die Bridge-Registry anhand von `method`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeCall {
    pub method: String<METHOD_NAME_CAPACITY>,
    pub args: SetPinArgs,
}

impl BridgeCall {
    /// Gibt `None` zurück wenn Methode oder Pin-Name nicht in die Puffer passen
    pub fn new(method: &str, name: &str, state: bool) -> Option<Self> {
        let mut owned = String::new();
        owned.push_str(method).ok()?;
        Some(Self {
            method: owned,
            args: SetPinArgs::new(name, state)?,
        })
    }
}

/// Lokales Ergebnis eines Setter-Aufrufs
///
/// Wird nie an den Remote-Aufrufer zurückgegeben (Remote-Vertrag ist `void`),
/// sondern nur für Logging und Broadcasts in der Firmware genutzt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetPinOutcome {
    /// Pegel wurde geschrieben
    Applied {
        entry: &'static PinEntry,
        level: Level,
    },
    /// Unbekannter Name - wird still ignoriert
    UnknownPin,
    /// Treiber hat den Schreibzugriff abgelehnt
    Failed(PinError),
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for Level {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Level::Low => defmt::write!(fmt, "LOW"),
            Level::High => defmt::write!(fmt, "HIGH"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PinEntry {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "PinEntry {{ name: {}, id: {}, on: {} }}",
            self.name,
            self.id.0,
            self.polarity.active_level()
        )
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SetPinOutcome {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SetPinOutcome::Applied { entry, level } => {
                defmt::write!(fmt, "Applied {{ name: {}, level: {} }}", entry.name, level)
            }
            SetPinOutcome::UnknownPin => defmt::write!(fmt, "UnknownPin"),
            SetPinOutcome::Failed(e) => defmt::write!(fmt, "Failed({})", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_bool() {
        assert_eq!(Level::from(true), Level::High);
        assert_eq!(Level::from(false), Level::Low);
    }

    #[test]
    fn test_polarity_levels_are_opposite() {
        for polarity in [Polarity::ActiveHigh, Polarity::ActiveLow] {
            assert_ne!(polarity.active_level(), polarity.inactive_level());
        }
    }

    #[test]
    fn test_set_pin_args_keeps_name() {
        let args = SetPinArgs::new("LED4_B", true).unwrap();
        assert_eq!(args.name.as_str(), "LED4_B");
        assert!(args.level);
    }

    #[test]
    fn test_bridge_call_rejects_oversized_method() {
        let method = "set_pin_by_name_with_a_far_too_long_suffix";
        assert!(BridgeCall::new(method, "D5", true).is_none());
        assert!(BridgeCall::new("set_pin_by_name", "D5", true).is_some());
    }

    #[test]
    fn test_set_pin_args_rejects_oversized_name() {
        assert!(SetPinArgs::new("THIS_NAME_IS_WAY_TOO_LONG", false).is_none());
    }
}
