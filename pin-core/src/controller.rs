//! Pin Controller - Setter und Startup-Sequenz
//!
//! Pure Business Logic ohne Hardware-Abhängigkeit (testbar!).
//! Der Hardware-Zugriff läuft über den `PinDriver` Trait.

use crate::bridge::{Bridge, BridgeError};
use crate::table::{PIN_TABLE, led_indicators, lookup};
use crate::traits::{PinDriver, PinError};
use crate::types::{Level, SetPinArgs, SetPinOutcome};

/// Fester Name der remote aufrufbaren Setter-Funktion
pub const SET_PIN_METHOD: &str = "set_pin_by_name";

/// Anzahl der Registry-Slots der Pin-Bridge
pub const BRIDGE_CAPACITY: usize = 4;

/// Bridge-Typ für den Pin Controller
pub type PinBridge<D> = Bridge<PinController<D>, SetPinArgs, SetPinOutcome, BRIDGE_CAPACITY>;

/// Pin Controller
///
/// Besitzt den GPIO-Treiber. Die Pin-Tabelle selbst ist statisch
/// und wird nie verändert.
///
/// # Trait-basierte Abstraktion
/// Der generische Parameter `D: PinDriver` ermöglicht:
/// - Real Hardware (GpioPinDriver) im Production-Code
/// - Mock Implementation (MockPinDriver) in Tests
pub struct PinController<D: PinDriver> {
    driver: D,
}

impl<D: PinDriver> PinController<D> {
    pub fn new(driver: D) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Setzt einen Pin über seinen Namen auf High (`true`) oder Low (`false`)
    ///
    /// Unbekannte Namen werden still ignoriert: kein Fehler, kein Schreibzugriff.
    /// Es findet keine Active-Low-Invertierung statt, das ist Aufgabe des Hosts.
    pub fn set_pin_by_name(&mut self, name: &str, state: bool) -> SetPinOutcome {
        let Some(entry) = lookup(name) else {
            return SetPinOutcome::UnknownPin;
        };

        let level = Level::from(state);
        match self.driver.write(entry.id, level) {
            Ok(()) => SetPinOutcome::Applied { entry, level },
            Err(e) => SetPinOutcome::Failed(e),
        }
    }

    /// Konfiguriert alle Tabellen-Pins als Ausgänge
    fn configure_outputs(&mut self, report: &mut StartupReport) {
        for entry in PIN_TABLE.iter() {
            match self.driver.configure_output(entry.id) {
                Ok(()) => report.configured += 1,
                Err(e) => report.record(e),
            }
        }
    }

    /// Schaltet alle LED-Indikatoren aus (sicherer Default)
    fn drive_indicators_inactive(&mut self, report: &mut StartupReport) {
        for entry in led_indicators() {
            if let Err(e) = self
                .driver
                .write(entry.id, entry.polarity.inactive_level())
            {
                report.record(e);
            }
        }
    }
}

/// Zusammenfassung der Startup-Sequenz (nur für Logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartupReport {
    /// Anzahl erfolgreich konfigurierter Ausgänge
    pub configured: usize,
    /// Anzahl fehlgeschlagener Treiber-Aufrufe
    pub failed: usize,
    /// Erster aufgetretener Treiber-Fehler
    pub first_error: Option<PinError>,
}

impl StartupReport {
    fn record(&mut self, error: PinError) {
        self.failed += 1;
        if self.first_error.is_none() {
            self.first_error = Some(error);
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Bridge-Handler für `set_pin_by_name`
pub fn set_pin_handler<D: PinDriver>(
    controller: &mut PinController<D>,
    args: &SetPinArgs,
) -> SetPinOutcome {
    controller.set_pin_by_name(&args.name, args.level)
}

/// Startup-Sequenz: einmalig vor dem ersten Remote-Aufruf
///
/// 1. Alle Tabellen-Pins als Ausgang konfigurieren
/// 2. Die sechs LED-Indikatoren auf "aus" setzen
/// 3. Bridge starten
/// 4. `set_pin_by_name` registrieren
///
/// Treiber-Fehler brechen die Sequenz nicht ab, sie landen im `StartupReport`.
pub fn startup<D: PinDriver>(
    controller: &mut PinController<D>,
    bridge: &mut PinBridge<D>,
) -> Result<StartupReport, BridgeError> {
    let mut report = StartupReport::default();

    controller.configure_outputs(&mut report);
    controller.drive_indicators_inactive(&mut report);

    bridge.begin();
    bridge.provide(SET_PIN_METHOD, set_pin_handler::<D>)?;

    Ok(report)
}

#[cfg(feature = "defmt")]
impl defmt::Format for StartupReport {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StartupReport {{ configured: {}, failed: {} }}",
            self.configured,
            self.failed
        )
    }
}
