//! Integration Tests für Pin-Tabelle, Controller und Bridge
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockPinDriver

use std::collections::{HashMap, HashSet};

use pin_core::{
    Level, PIN_COUNT, PIN_TABLE, PinBridge, PinController, PinDriver, PinError, PinId, Polarity,
    SET_PIN_METHOD, SetPinArgs, SetPinOutcome, led_indicators, lookup, startup,
};
use pin_core::protocol::{
    JSON_ERROR_BUFFER_SIZE, JSON_EVENT_BUFFER_SIZE, PINS_JSON_BUFFER_SIZE, WsServerMessage,
    decode_request, encode_message, encode_pin_directory,
};

// ============================================================================
// Mock Pin Driver
// ============================================================================

#[derive(Default)]
pub struct MockPinDriver {
    pub outputs: HashSet<PinId>,
    pub levels: HashMap<PinId, Level>,
    pub write_count: usize,
    pub unrouted: HashSet<PinId>,
    pub fail_next_write: bool,
}

impl MockPinDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unrouted(ids: &[u8]) -> Self {
        Self {
            unrouted: ids.iter().copied().map(PinId).collect(),
            ..Self::default()
        }
    }

    pub fn level_of(&self, name: &str) -> Option<Level> {
        let entry = lookup(name)?;
        self.levels.get(&entry.id).copied()
    }
}

impl PinDriver for MockPinDriver {
    fn configure_output(&mut self, id: PinId) -> Result<(), PinError> {
        if self.unrouted.contains(&id) {
            return Err(PinError::Unrouted(id));
        }
        self.outputs.insert(id);
        Ok(())
    }

    fn write(&mut self, id: PinId, level: Level) -> Result<(), PinError> {
        if self.unrouted.contains(&id) {
            return Err(PinError::Unrouted(id));
        }
        if !self.outputs.contains(&id) {
            return Err(PinError::NotConfigured(id));
        }
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(PinError::WriteFailed(id));
        }

        self.levels.insert(id, level);
        self.write_count += 1;
        Ok(())
    }
}

fn started_controller() -> (PinController<MockPinDriver>, PinBridge<MockPinDriver>) {
    let mut controller = PinController::new(MockPinDriver::new());
    let mut bridge = PinBridge::new();
    startup(&mut controller, &mut bridge).unwrap();
    (controller, bridge)
}

// ============================================================================
// Tests: Pin-Tabelle
// ============================================================================

#[test]
fn test_table_has_expected_names() {
    let mut expected: Vec<String> = (0..=13).map(|n| format!("D{n}")).collect();
    expected.push("D20".into());
    expected.push("D21".into());
    expected.extend((0..=5).map(|n| format!("A{n}")));
    for led in ["LED3_R", "LED3_G", "LED3_B", "LED4_R", "LED4_G", "LED4_B"] {
        expected.push(led.into());
    }

    let actual: HashSet<&str> = PIN_TABLE.iter().map(|e| e.name).collect();
    assert_eq!(PIN_TABLE.len(), PIN_COUNT);
    assert_eq!(PIN_COUNT, 28);
    assert_eq!(actual.len(), 28);
    for name in &expected {
        assert!(actual.contains(name.as_str()), "missing {name}");
    }
}

#[test]
fn test_table_ids_are_distinct() {
    let ids: HashSet<PinId> = PIN_TABLE.iter().map(|e| e.id).collect();
    assert_eq!(ids.len(), PIN_COUNT);
}

#[test]
fn test_table_only_leds_are_active_low() {
    for entry in PIN_TABLE.iter() {
        let is_led = entry.name.starts_with("LED");
        assert_eq!(entry.polarity == Polarity::ActiveLow, is_led, "{}", entry.name);
    }
}

#[test]
fn test_lookup_lowercase_is_unknown() {
    assert!(lookup("d5").is_none());
    assert!(lookup("led3_r").is_none());
}

// ============================================================================
// Tests: Startup
// ============================================================================

#[test]
fn test_startup_configures_all_outputs() {
    let (controller, _) = started_controller();
    assert_eq!(controller.driver().outputs.len(), PIN_COUNT);
}

#[test]
fn test_startup_leds_inactive_before_any_call() {
    let (controller, _) = started_controller();
    for entry in led_indicators() {
        assert_eq!(
            controller.driver().levels.get(&entry.id),
            Some(&entry.polarity.inactive_level())
        );
    }
    assert_eq!(controller.driver().write_count, 6);
}

#[test]
fn test_startup_registers_set_pin_method() {
    let (_, bridge) = started_controller();
    assert!(bridge.is_started());
    let methods: Vec<&str> = bridge.methods().collect();
    assert_eq!(methods, vec![SET_PIN_METHOD]);
}

#[test]
fn test_startup_reports_unrouted_pins() {
    let mut controller = PinController::new(MockPinDriver::with_unrouted(&[20, 21, 27]));
    let mut bridge = PinBridge::new();
    let report = startup(&mut controller, &mut bridge).unwrap();

    // 3x configure + 1x LED4_B write
    assert_eq!(report.failed, 4);
    assert_eq!(report.configured, PIN_COUNT - 3);
    assert_eq!(report.first_error, Some(PinError::Unrouted(PinId(21))));
    // Bridge ist trotzdem registriert
    assert_eq!(bridge.methods().count(), 1);
}

// ============================================================================
// Tests: set_pin_by_name
// ============================================================================

#[test]
fn test_set_pin_every_name_high_and_low() {
    let (mut controller, _) = started_controller();
    for entry in PIN_TABLE.iter() {
        controller.set_pin_by_name(entry.name, true);
        assert_eq!(controller.driver().level_of(entry.name), Some(Level::High));

        controller.set_pin_by_name(entry.name, false);
        assert_eq!(controller.driver().level_of(entry.name), Some(Level::Low));
    }
}

#[test]
fn test_set_pin_does_not_invert_active_low() {
    let (mut controller, _) = started_controller();
    controller.set_pin_by_name("LED3_G", true);
    assert_eq!(controller.driver().level_of("LED3_G"), Some(Level::High));
}

#[test]
fn test_set_pin_unknown_name_is_noop() {
    let (mut controller, _) = started_controller();
    let before = controller.driver().levels.clone();
    let writes = controller.driver().write_count;

    for name in ["d5", "D14", "LED5_R", "", "D5\0"] {
        assert_eq!(
            controller.set_pin_by_name(name, true),
            SetPinOutcome::UnknownPin
        );
    }

    assert_eq!(controller.driver().levels, before);
    assert_eq!(controller.driver().write_count, writes);
}

#[test]
fn test_set_pin_idempotent() {
    let (mut controller, _) = started_controller();
    controller.set_pin_by_name("D5", true);
    let once = controller.driver().levels.clone();
    controller.set_pin_by_name("D5", true);
    assert_eq!(controller.driver().levels, once);
    assert_eq!(controller.driver().level_of("D5"), Some(Level::High));
}

#[test]
fn test_set_pin_reports_driver_failure() {
    let (controller, _) = started_controller();
    let mut driver = controller.into_driver();
    driver.fail_next_write = true;
    let mut controller = PinController::new(driver);

    assert_eq!(
        controller.set_pin_by_name("D3", true),
        SetPinOutcome::Failed(PinError::WriteFailed(PinId(3)))
    );
    assert_eq!(controller.driver().level_of("D3"), None);

    // Zweiter Versuch klappt
    assert!(matches!(
        controller.set_pin_by_name("D3", true),
        SetPinOutcome::Applied { .. }
    ));
}

// ============================================================================
// Tests: Bridge-Dispatch
// ============================================================================

#[test]
fn test_bridge_call_sets_pin() {
    let (mut controller, bridge) = started_controller();
    let args = SetPinArgs::new("D12", true).unwrap();

    let outcome = bridge.call(&mut controller, SET_PIN_METHOD, &args).unwrap();
    match outcome {
        SetPinOutcome::Applied { entry, level } => {
            assert_eq!(entry.name, "D12");
            assert_eq!(entry.id, PinId(12));
            assert_eq!(level, Level::High);
        }
        other => panic!("Expected Applied, got {other:?}"),
    }
}

#[test]
fn test_bridge_call_unknown_pin_is_ok() {
    let (mut controller, bridge) = started_controller();
    let args = SetPinArgs::new("d5", true).unwrap();
    assert_eq!(
        bridge.call(&mut controller, SET_PIN_METHOD, &args),
        Ok(SetPinOutcome::UnknownPin)
    );
}

#[test]
fn test_bridge_call_unknown_method() {
    let (mut controller, bridge) = started_controller();
    let args = SetPinArgs::new("D5", true).unwrap();
    assert_eq!(
        bridge.call(&mut controller, "set_pin", &args),
        Err(pin_core::BridgeError::UnknownMethod)
    );
    assert_eq!(controller.driver().level_of("D5"), None);
}

// ============================================================================
// Tests: JSON-Protokoll
// ============================================================================

#[test]
fn test_decode_documented_request_frame() {
    let request = decode_request(br#"{"method":"set_pin_by_name","params":["D5",true]}"#).unwrap();
    assert_eq!(request.method, "set_pin_by_name");
    assert_eq!(request.params, ("D5", true));
}

#[test]
fn test_decode_request_with_reordered_keys() {
    let request =
        decode_request(br#"{ "params": ["LED3_R", false], "method": "set_pin_by_name" }"#).unwrap();
    assert_eq!(request.method, SET_PIN_METHOD);
    assert_eq!(request.params, ("LED3_R", false));
}

#[test]
fn test_decode_rejects_non_bool_level() {
    assert!(decode_request(br#"{"method":"set_pin_by_name","params":["D5",1]}"#).is_err());
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(decode_request(b"not json").is_err());
    assert!(decode_request(b"").is_err());
    assert!(decode_request(br#"{"method":"set_pin_by_name"}"#).is_err());
}

#[test]
fn test_decoded_frame_drives_pin_through_bridge() {
    let (mut controller, bridge) = started_controller();
    let call = decode_request(br#"{"method":"set_pin_by_name","params":["D5",true]}"#)
        .unwrap()
        .to_call()
        .unwrap();

    let outcome = bridge.call(&mut controller, &call.method, &call.args);
    assert!(matches!(outcome, Ok(SetPinOutcome::Applied { .. })));
    assert_eq!(controller.driver().level_of("D5"), Some(Level::High));
}

#[test]
fn test_oversized_name_yields_no_call() {
    let frame = br#"{"method":"set_pin_by_name","params":["NO_SUCH_PIN_WITH_LONG_NAME",true]}"#;
    let request = decode_request(frame).unwrap();
    assert!(request.to_call().is_none());
}

#[test]
fn test_encode_pin_state_update() {
    let message = WsServerMessage::PinStateUpdate {
        name: "LED3_R",
        level: Level::High,
        timestamp_ms: 1234,
    };
    let mut buffer = [0u8; JSON_EVENT_BUFFER_SIZE];
    assert_eq!(
        encode_message(&message, &mut buffer),
        Some(r#"{"type":"pin_state_update","name":"LED3_R","level":"high","timestamp_ms":1234}"#)
    );
}

#[test]
fn test_encode_error_message() {
    let message = WsServerMessage::Error {
        message: "JSON parse error",
    };
    let mut buffer = [0u8; JSON_ERROR_BUFFER_SIZE];
    assert_eq!(
        encode_message(&message, &mut buffer),
        Some(r#"{"type":"error","message":"JSON parse error"}"#)
    );
}

#[test]
fn test_encode_message_buffer_too_small() {
    let message = WsServerMessage::Error {
        message: "JSON parse error",
    };
    let mut buffer = [0u8; 8];
    assert_eq!(encode_message(&message, &mut buffer), None);
}

#[test]
fn test_pin_directory_fits_buffer() {
    let mut buffer = [0u8; PINS_JSON_BUFFER_SIZE];
    let n = encode_pin_directory(&mut buffer).unwrap();
    let json = std::str::from_utf8(&buffer[..n]).unwrap();

    assert!(json.starts_with(r#"[{"name":"D21","id":21,"polarity":"active_high"},"#));
    assert!(json.contains(r#"{"name":"LED3_R","id":22,"polarity":"active_low"}"#));
    assert!(json.ends_with(r#"{"name":"LED4_B","id":27,"polarity":"active_low"}]"#));
    assert_eq!(json.matches(r#""name":"#).count(), PIN_COUNT);
}
