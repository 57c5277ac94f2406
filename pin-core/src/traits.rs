//! Hardware Abstraction Traits
//!
//! Diese Traits definieren Schnittstellen für GPIO-Zugriff
//! ohne konkrete Implementierung.

use crate::types::{Level, PinId};

/// Fehler-Typ für Pin-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinError {
    /// Die Kennung ist auf diesem Board mit keinem GPIO verdrahtet
    Unrouted(PinId),
    /// Der Pin ist noch nicht als Ausgang konfiguriert
    NotConfigured(PinId),
    /// Hardware-Zugriff fehlgeschlagen
    WriteFailed(PinId),
}

impl PinError {
    /// Pin, auf den sich der Fehler bezieht
    pub fn pin(self) -> PinId {
        match self {
            PinError::Unrouted(id) | PinError::NotConfigured(id) | PinError::WriteFailed(id) => id,
        }
    }
}

/// Trait für digitalen GPIO-Zugriff
///
/// Abstrahiert `pinMode(OUTPUT)` und `digitalWrite()` über die Pin-Kennung.
/// Es gibt kein Zurücklesen: Pins sind aus Sicht des Controllers write-only.
///
/// # Implementierungen
/// - **Production:** GpioPinDriver (ESP32 GPIO Outputs)
/// - **Testing:** MockPinDriver (in-memory Mock)
pub trait PinDriver {
    /// Konfiguriert einen Pin als digitalen Ausgang
    fn configure_output(&mut self, id: PinId) -> Result<(), PinError>;

    /// Setzt den elektrischen Pegel eines Ausgangs
    ///
    /// # Fehlerbehandlung
    /// Gibt `PinError` zurück wenn der Pin nicht verdrahtet, nicht konfiguriert
    /// oder der Hardware-Zugriff fehlgeschlagen ist
    fn write(&mut self, id: PinId, level: Level) -> Result<(), PinError>;
}

// ============================================================================
// defmt::Format Implementations (optional feature)
// ============================================================================

#[cfg(feature = "defmt")]
impl defmt::Format for PinError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PinError::Unrouted(id) => defmt::write!(fmt, "Unrouted(pin {})", id.0),
            PinError::NotConfigured(id) => defmt::write!(fmt, "NotConfigured(pin {})", id.0),
            PinError::WriteFailed(id) => defmt::write!(fmt, "WriteFailed(pin {})", id.0),
        }
    }
}
