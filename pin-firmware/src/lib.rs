// Library-Root: Wiederverwendbare Logik und Module
// Keine Standard-Bibliothek (Embedded System)
#![no_std]

// Heap (WiFi-Stack und HTTP-Responses)
extern crate alloc;

// Module
pub mod config;
pub mod hal;
pub mod tasks;

// Re-exports von pin-core
pub use pin_core::{
    BridgeCall, Level, PinBridge, PinController, PinDriver, PinEntry, PinError, PinId,
    SET_PIN_METHOD, SetPinArgs, SetPinOutcome, protocol, startup,
};

// Embassy Channel-Typen
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use embassy_sync::pubsub::{PubSubChannel, Publisher, Subscriber};

use crate::config::{BRIDGE_CALL_QUEUE_SIZE, PIN_EVENT_MAX_SUBSCRIBERS, PIN_EVENT_QUEUE_SIZE};

// ============================================================================
// Nachrichten-Typen
// ============================================================================

/// Broadcast nach jedem erfolgreich geschriebenen Pegel
#[derive(Clone, Copy)]
pub struct PinEvent {
    pub name: &'static str,
    pub level: Level,
}

impl defmt::Format for PinEvent {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "PinEvent {{ name: {}, level: {} }}", self.name, self.level)
    }
}

// ============================================================================
// Type-Aliase für Channel-Typen
// ============================================================================

/// Channel für Bridge-Aufrufe (HTTP Tasks → Pin Task)
/// Ein einziger Empfänger serialisiert alle Pin-Schreibzugriffe.
pub type BridgeCallChannel = Channel<NoopRawMutex, BridgeCall, BRIDGE_CALL_QUEUE_SIZE>;

/// Sender für Bridge-Aufrufe (WebSocket-Handler)
pub type BridgeCallSender = Sender<'static, NoopRawMutex, BridgeCall, BRIDGE_CALL_QUEUE_SIZE>;

/// Receiver für Bridge-Aufrufe (Pin Task)
pub type BridgeCallReceiver = Receiver<'static, NoopRawMutex, BridgeCall, BRIDGE_CALL_QUEUE_SIZE>;

/// PubSubChannel für Pin-Event-Broadcasts (Pin Task → WebSockets)
pub type PinEventChannel =
    PubSubChannel<NoopRawMutex, PinEvent, PIN_EVENT_QUEUE_SIZE, PIN_EVENT_MAX_SUBSCRIBERS, 1>;

/// Publisher für Pin-Events
pub type PinEventPublisher = Publisher<
    'static,
    NoopRawMutex,
    PinEvent,
    PIN_EVENT_QUEUE_SIZE,
    PIN_EVENT_MAX_SUBSCRIBERS,
    1,
>;

/// Subscriber für Pin-Events (einer pro WebSocket-Connection)
pub type PinEventSubscriber = Subscriber<
    'static,
    NoopRawMutex,
    PinEvent,
    PIN_EVENT_QUEUE_SIZE,
    PIN_EVENT_MAX_SUBSCRIBERS,
    1,
>;
