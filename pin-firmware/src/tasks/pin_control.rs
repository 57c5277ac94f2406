// Pin Control Task - Besitzt Controller und Bridge-Registry
use defmt::{debug, error, info, warn};

use crate::hal::GpioPinDriver;
use crate::{
    BridgeCallReceiver, PinBridge, PinController, PinDriver, PinEvent, PinEventPublisher,
    SetPinOutcome, startup,
};

/// Pin Control Logic - Testbare Logik ohne konkrete Hardware
///
/// 1. Startup-Sequenz (Outputs, LEDs aus, Bridge registrieren)
/// 2. Danach rein reaktiv: jeder `BridgeCall` wird über die Registry dispatcht
///
/// Da nur dieser Task den Controller besitzt, sind alle Pin-Schreibzugriffe
/// über die Call-Queue serialisiert.
///
/// # Parameter
/// - `driver`: GPIO-Treiber (Hardware oder Mock)
/// - `call_receiver`: Channel Receiver für Bridge-Aufrufe
/// - `event_publisher`: PubSub Publisher für Pin-Events
pub async fn pin_control_logic<D: PinDriver>(
    driver: D,
    call_receiver: BridgeCallReceiver,
    event_publisher: PinEventPublisher,
) -> ! {
    let mut controller = PinController::new(driver);
    let mut bridge: PinBridge<D> = PinBridge::new();

    match startup(&mut controller, &mut bridge) {
        Ok(report) if report.is_clean() => {
            info!("PIN: {} outputs configured, LEDs off", report.configured);
        }
        Ok(report) => {
            warn!(
                "PIN: {} outputs configured, {} driver calls failed",
                report.configured, report.failed
            );
            if let Some(e) = report.first_error {
                warn!("PIN: First driver error: {}", e);
            }
        }
        Err(e) => error!("BRIDGE: Registration failed: {}", e),
    }

    loop {
        let call = call_receiver.receive().await;

        match bridge.call(&mut controller, &call.method, &call.args) {
            Ok(SetPinOutcome::Applied { entry, level }) => {
                debug!(
                    "PIN: {} -> {} (on: {})",
                    entry.name,
                    level,
                    level == entry.polarity.active_level()
                );
                event_publisher.publish_immediate(PinEvent {
                    name: entry.name,
                    level,
                });
            }
            // Unbekannte Namen werden still ignoriert
            Ok(SetPinOutcome::UnknownPin) => {}
            Ok(SetPinOutcome::Failed(e)) => {
                error!("PIN: Write failed: {}", e);
            }
            Err(e) => {
                warn!("BRIDGE: Call '{}' rejected: {}", call.method.as_str(), e);
            }
        }
    }
}

/// Pin Control Task - Embassy Task für parallele Ausführung
///
/// Der Treiber wird in main verdrahtet (braucht die Peripherals).
#[embassy_executor::task]
pub async fn pin_control_task(
    driver: GpioPinDriver,
    call_receiver: BridgeCallReceiver,
    event_publisher: PinEventPublisher,
) {
    info!("PIN: {} GPIOs routed", driver.routed_count());
    pin_control_logic(driver, call_receiver, event_publisher).await
}
