//! Bridge-Protokoll: JSON-Nachrichten für Host ↔ Firmware Kommunikation
//!
//! Nur mit Feature `serde`. Der Transport (WebSocket) ist ein dünner Adapter
//! vor der Bridge-Registry; hier liegt nur das Framing.

use serde::{Deserialize, Serialize};

use crate::table::PIN_TABLE;
use crate::types::{BridgeCall, Level};

// ============================================================================
// Buffer-Größen
// ============================================================================

/// JSON Serialisierungs-Buffer für pin_state_update Events
pub const JSON_EVENT_BUFFER_SIZE: usize = 128;

/// JSON Serialisierungs-Buffer für Error-Messages
pub const JSON_ERROR_BUFFER_SIZE: usize = 128;

/// JSON Serialisierungs-Buffer für die Pin-Tabelle (GET /pins)
/// 28 Einträge à ~50 Bytes
pub const PINS_JSON_BUFFER_SIZE: usize = 2048;

// ============================================================================
// Nachrichten
// ============================================================================

/// Host → Firmware: Remote-Aufruf
///
/// Beispiel: `{"method":"set_pin_by_name","params":["D5",true]}`
///
/// Hinweis: Strings werden geborgt (serde-json-core), Escape-Sequenzen
/// im Pin-Namen werden daher nicht unterstützt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RpcRequest<'a> {
    pub method: &'a str,
    #[serde(borrow)]
    pub params: (&'a str, bool),
}

impl RpcRequest<'_> {
    /// Wandelt den Request in einen Bridge-Aufruf für den Pin Task
    ///
    /// `None` bei übergroßem Methoden- oder Pin-Namen.
    pub fn to_call(&self) -> Option<BridgeCall> {
        let (name, state) = self.params;
        BridgeCall::new(self.method, name, state)
    }
}

/// Firmware → Host Nachrichten
/// Pin-Events und Fehler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum WsServerMessage<'a> {
    #[serde(rename = "pin_state_update")]
    PinStateUpdate {
        name: &'a str,
        level: Level,
        timestamp_ms: u64,
    },
    #[serde(rename = "error")]
    Error { message: &'a str },
}

// ============================================================================
// Encode / Decode
// ============================================================================

/// Parst einen Text-Frame vom Host
///
/// ```
/// # use pin_core::protocol::decode_request;
/// let request = decode_request(br#"{"method":"set_pin_by_name","params":["D5",true]}"#).unwrap();
/// assert_eq!(request.params, ("D5", true));
/// ```
pub fn decode_request(frame: &[u8]) -> Result<RpcRequest<'_>, serde_json_core::de::Error> {
    serde_json_core::from_slice::<RpcRequest<'_>>(frame).map(|(request, _)| request)
}

/// Serialisiert eine Server-Nachricht in `buffer`
///
/// `None` wenn der Buffer zu klein ist.
pub fn encode_message<'b>(
    message: &WsServerMessage<'_>,
    buffer: &'b mut [u8],
) -> Option<&'b str> {
    let n = serde_json_core::to_slice(message, buffer).ok()?;
    core::str::from_utf8(&buffer[..n]).ok()
}

/// Serialisiert die komplette Pin-Tabelle (Name, Kennung, Polarität)
///
/// Gibt die Anzahl geschriebener Bytes zurück.
pub fn encode_pin_directory(buffer: &mut [u8]) -> Result<usize, serde_json_core::ser::Error> {
    serde_json_core::to_slice(&PIN_TABLE[..], buffer)
}
