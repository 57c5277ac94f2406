//! Bridge Runtime - Registry für remote aufrufbare Funktionen
//!
//! Die Bridge macht Funktionen unter einem festen Namen von außen aufrufbar.
//! Transport und Serialisierung liegen beim Aufrufer (Firmware), hier wird
//! nur registriert und per Name dispatcht.

use heapless::Vec;

/// Signatur einer registrierten Funktion
///
/// - `C`: Kontext (z.B. der `PinController`)
/// - `A`: Argumente des Aufrufs
/// - `R`: lokales Ergebnis (wird nicht an den Remote-Aufrufer geschickt)
pub type Handler<C, A, R> = fn(&mut C, &A) -> R;

/// Fehler-Typ für Bridge-Operationen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeError {
    /// `begin()` wurde noch nicht aufgerufen
    NotStarted,
    /// Unter diesem Namen ist bereits eine Funktion registriert
    DuplicateMethod,
    /// Alle Slots belegt
    Full,
    /// Kein Handler unter diesem Namen
    UnknownMethod,
}

/// Registry mit fester Kapazität `N`
pub struct Bridge<C, A, R, const N: usize> {
    started: bool,
    methods: Vec<(&'static str, Handler<C, A, R>), N>,
}

impl<C, A, R, const N: usize> Bridge<C, A, R, N> {
    /// Erstellt eine leere, noch nicht gestartete Bridge
    pub const fn new() -> Self {
        Self {
            started: false,
            methods: Vec::new(),
        }
    }

    /// Initialisiert die Bridge. Muss vor `provide()` aufgerufen werden.
    pub fn begin(&mut self) {
        self.started = true;
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Registriert `handler` unter `method`
    pub fn provide(
        &mut self,
        method: &'static str,
        handler: Handler<C, A, R>,
    ) -> Result<(), BridgeError> {
        if !self.started {
            return Err(BridgeError::NotStarted);
        }
        if self.methods.iter().any(|(name, _)| *name == method) {
            return Err(BridgeError::DuplicateMethod);
        }
        self.methods
            .push((method, handler))
            .map_err(|_| BridgeError::Full)
    }

    /// Ruft die unter `method` registrierte Funktion auf
    pub fn call(&self, ctx: &mut C, method: &str, args: &A) -> Result<R, BridgeError> {
        if !self.started {
            return Err(BridgeError::NotStarted);
        }
        let (_, handler) = self
            .methods
            .iter()
            .find(|(name, _)| *name == method)
            .ok_or(BridgeError::UnknownMethod)?;
        Ok(handler(ctx, args))
    }

    /// Namen aller registrierten Funktionen (in Registrierungs-Reihenfolge)
    pub fn methods(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.methods.iter().map(|(name, _)| *name)
    }
}

impl<C, A, R, const N: usize> Default for Bridge<C, A, R, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for BridgeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            BridgeError::NotStarted => defmt::write!(fmt, "Bridge not started"),
            BridgeError::DuplicateMethod => defmt::write!(fmt, "Duplicate method"),
            BridgeError::Full => defmt::write!(fmt, "Registry full"),
            BridgeError::UnknownMethod => defmt::write!(fmt, "Unknown method"),
        }
    }
}
