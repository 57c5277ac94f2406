//! Statische Pin-Tabelle und Lookup
//!
//! Die Tabelle wird zur Compile-Zeit gebaut und nie verändert.
//! Reihenfolge entspricht der Stiftleisten-Reihenfolge auf dem Board.

use crate::types::{PinEntry, Polarity};

/// Kennung der ersten eingebauten LED (LED3_R)
///
/// Die sechs Indikator-LEDs liegen auf den Kennungen
/// `LED_BUILTIN .. LED_BUILTIN + 5`.
pub const LED_BUILTIN: u8 = 22;

/// Anzahl der Einträge in der Pin-Tabelle
pub const PIN_COUNT: usize = 28;

/// Index des ersten LED-Eintrags in `PIN_TABLE`
const LED_START: usize = 22;

/// Abkürzungen für die Tabelle unten
const HIGH: Polarity = Polarity::ActiveHigh;
const LOW: Polarity = Polarity::ActiveLow;

/// Pin-Tabelle: Name → Hardware-Kennung
///
/// - `Dn` → n
/// - `A0..A5` → 14..19
/// - LEDs → `LED_BUILTIN..LED_BUILTIN + 5` (active-low)
pub static PIN_TABLE: [PinEntry; PIN_COUNT] = [
    // JDIGITAL
    PinEntry::new("D21", 21, HIGH),
    PinEntry::new("D20", 20, HIGH),
    PinEntry::new("D13", 13, HIGH),
    PinEntry::new("D12", 12, HIGH),
    PinEntry::new("D11", 11, HIGH),
    PinEntry::new("D10", 10, HIGH),
    PinEntry::new("D9", 9, HIGH),
    PinEntry::new("D8", 8, HIGH),
    PinEntry::new("D7", 7, HIGH),
    PinEntry::new("D6", 6, HIGH),
    PinEntry::new("D5", 5, HIGH),
    PinEntry::new("D4", 4, HIGH),
    PinEntry::new("D3", 3, HIGH),
    PinEntry::new("D2", 2, HIGH),
    PinEntry::new("D1", 1, HIGH),
    PinEntry::new("D0", 0, HIGH),
    // JANALOG
    PinEntry::new("A0", 14, HIGH),
    PinEntry::new("A1", 15, HIGH),
    PinEntry::new("A2", 16, HIGH),
    PinEntry::new("A3", 17, HIGH),
    PinEntry::new("A4", 18, HIGH),
    PinEntry::new("A5", 19, HIGH),
    // Onboard RGB LEDs
    PinEntry::new("LED3_R", LED_BUILTIN, LOW),
    PinEntry::new("LED3_G", LED_BUILTIN + 1, LOW),
    PinEntry::new("LED3_B", LED_BUILTIN + 2, LOW),
    PinEntry::new("LED4_R", LED_BUILTIN + 3, LOW),
    PinEntry::new("LED4_G", LED_BUILTIN + 4, LOW),
    PinEntry::new("LED4_B", LED_BUILTIN + 5, LOW),
];

/// Index des ersten Eintrags mit exakt diesem Namen
///
/// Lineare Suche, case-sensitive, keine Normalisierung.
pub fn find_index(name: &str) -> Option<usize> {
    PIN_TABLE.iter().position(|entry| entry.name == name)
}

/// Sucht einen Pin über seinen Namen
///
/// # Beispiele
///
/// ```
/// # use pin_core::{lookup, PinId};
/// assert_eq!(lookup("D5").map(|e| e.id), Some(PinId(5)));
/// assert!(lookup("d5").is_none());
/// ```
pub fn lookup(name: &str) -> Option<&'static PinEntry> {
    find_index(name).map(|index| &PIN_TABLE[index])
}

/// Die sechs LED-Indikator-Pins
pub fn led_indicators() -> &'static [PinEntry] {
    &PIN_TABLE[LED_START..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PinId;

    #[test]
    fn test_lookup_known_name() {
        let entry = lookup("A3").unwrap();
        assert_eq!(entry.id, PinId(17));
        assert_eq!(entry.polarity, Polarity::ActiveHigh);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(lookup("led3_r").is_none());
        assert!(lookup("LED3_R").is_some());
    }

    #[test]
    fn test_lookup_does_not_trim() {
        assert!(lookup(" D5").is_none());
        assert!(lookup("D5 ").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_find_index_follows_table_order() {
        assert_eq!(find_index("D21"), Some(0));
        assert_eq!(find_index("D0"), Some(15));
        assert_eq!(find_index("LED4_B"), Some(PIN_COUNT - 1));
    }

    #[test]
    fn test_led_indicators_are_consecutive() {
        let leds = led_indicators();
        assert_eq!(leds.len(), 6);
        for (offset, entry) in leds.iter().enumerate() {
            assert_eq!(entry.id, PinId(LED_BUILTIN + offset as u8));
            assert_eq!(entry.polarity, Polarity::ActiveLow);
            assert!(entry.name.starts_with("LED"));
        }
    }
}
