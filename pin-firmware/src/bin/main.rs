// Keine Standard-Bibliothek verwenden (Embedded System)
#![no_std]
// Kein normaler main() Einstiegspunkt (wird von esp_rtos bereitgestellt)
#![no_main]
// Verbiete mem::forget - gefährlich bei ESP HAL Types mit DMA-Buffern
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
// Verbiete große Stack-Frames (Stack ist auf Embedded Systemen begrenzt)
#![deny(clippy::large_stack_frames)]

// Heap Allocator (WiFi benötigt dynamischen Speicher)
extern crate alloc;

// Embassy Async Runtime
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_time::{Duration, Timer};

// ESP32-C6 HAL
use esp_hal::clock::CpuClock;
use esp_hal::gpio::AnyPin;
use esp_hal::rng::Rng;
use esp_hal::timer::timg::TimerGroup;

use defmt::{info, warn};

// Backtrace bei Panic und println!() Support
use {esp_backtrace as _, esp_println as _};

// Projekt-Module und Konfiguration
use pin_bridge::config::{EXTRA_HEAP_SIZE, HTTP_TASK_COUNT, NET_SOCKET_COUNT, WIFI_HEAP_SIZE};
use pin_bridge::hal::GpioPinDriver;
use pin_bridge::tasks::{
    bridge_server_task, connection_task, dhcp_task, net_task, pin_control_task,
};
use pin_bridge::{BridgeCallChannel, PinEventChannel, PinId};

// ESP-IDF App Descriptor - erforderlich für den Bootloader!
esp_bootloader_esp_idf::esp_app_desc!();

/// Main Entry Point
///
/// Verdrahtet die Pins, startet WiFi und Embassy Tasks.
/// Danach Idle-Loop - alle Arbeit kommt über die Bridge.
#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    // ESP32-C6 Konfiguration: CPU auf maximale Taktfrequenz (160 MHz)
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Heap Allocator initialisieren: reclaimed RAM (64 KB) + extra (36 KB)
    esp_alloc::heap_allocator!(
        #[esp_hal::ram(reclaimed)]
        size: WIFI_HEAP_SIZE
    );
    esp_alloc::heap_allocator!(size: EXTRA_HEAP_SIZE);

    // Embassy Runtime initialisieren (Timer + Software Interrupt)
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_interrupt =
        esp_hal::interrupt::software::SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_interrupt.software_interrupt0);

    // Pin-Kennung → GPIO (ESP32-C6-DevKitC-1)
    // D20, D21 und A0..A5 haben auf diesem Board keinen freien GPIO.
    // GPIO16 bleibt U0TXD (Konsole), GPIO17 (U0RXD) wird nicht gelesen → LED4_B
    let wiring: [(u8, AnyPin<'static>); 20] = [
        (0, peripherals.GPIO0.into()),   // D0
        (1, peripherals.GPIO1.into()),   // D1
        (2, peripherals.GPIO2.into()),   // D2
        (3, peripherals.GPIO3.into()),   // D3
        (4, peripherals.GPIO4.into()),   // D4
        (5, peripherals.GPIO5.into()),   // D5
        (6, peripherals.GPIO6.into()),   // D6
        (7, peripherals.GPIO7.into()),   // D7
        (8, peripherals.GPIO10.into()),  // D8
        (9, peripherals.GPIO11.into()),  // D9
        (10, peripherals.GPIO18.into()), // D10
        (11, peripherals.GPIO19.into()), // D11
        (12, peripherals.GPIO20.into()), // D12
        (13, peripherals.GPIO21.into()), // D13
        (22, peripherals.GPIO22.into()), // LED3_R
        (23, peripherals.GPIO23.into()), // LED3_G
        (24, peripherals.GPIO15.into()), // LED3_B
        (25, peripherals.GPIO8.into()),  // LED4_R
        (26, peripherals.GPIO9.into()),  // LED4_G
        (27, peripherals.GPIO17.into()), // LED4_B
    ];

    let mut gpio = GpioPinDriver::new();
    for (id, pin) in wiring {
        if let Err(e) = gpio.route(PinId(id), pin) {
            warn!("PIN: Routing failed: {}", e);
        }
    }

    // Bridge-Channels erstellen
    static CALL_CHANNEL: static_cell::StaticCell<BridgeCallChannel> =
        static_cell::StaticCell::new();
    let call_channel = &*CALL_CHANNEL.init(BridgeCallChannel::new());

    static EVENT_CHANNEL: static_cell::StaticCell<PinEventChannel> =
        static_cell::StaticCell::new();
    let event_channel = &*EVENT_CHANNEL.init(PinEventChannel::new());
    let event_publisher = event_channel.publisher().unwrap();

    // Pin Task zuerst: Startup läuft vor dem ersten dispatchten Aufruf
    spawner
        .spawn(pin_control_task(
            gpio,
            call_channel.receiver(),
            event_publisher,
        ))
        .unwrap();

    // WiFi Hardware initialisieren
    static RADIO_INIT: static_cell::StaticCell<esp_radio::Controller> =
        static_cell::StaticCell::new();
    let radio_init =
        RADIO_INIT.init(esp_radio::init().expect("Failed to initialize Wi-Fi/BLE controller"));

    let (wifi_controller, wifi_interface) =
        esp_radio::wifi::new(radio_init, peripherals.WIFI, Default::default())
            .expect("Failed to initialize Wi-Fi");

    // Random seed für TCP/IP Stack (von Hardware RNG)
    let rng = Rng::new();
    let seed = (rng.random() as u64) << 32 | rng.random() as u64;

    static RESOURCES: static_cell::StaticCell<StackResources<NET_SOCKET_COUNT>> =
        static_cell::StaticCell::new();
    let resources = RESOURCES.init(StackResources::new());

    let (stack, runner) = embassy_net::new(
        wifi_interface.sta,
        NetConfig::dhcpv4(Default::default()),
        resources,
        seed,
    );

    static STACK: static_cell::StaticCell<Stack<'static>> = static_cell::StaticCell::new();
    let stack = &*STACK.init(stack);

    // Spawn WiFi Tasks
    spawner.spawn(connection_task(wifi_controller)).unwrap();
    spawner.spawn(net_task(runner)).unwrap();
    spawner.spawn(dhcp_task(stack)).unwrap();

    // Spawn Bridge Server Tasks (concurrent connections)
    for task_id in 0..HTTP_TASK_COUNT {
        spawner
            .spawn(bridge_server_task(
                task_id,
                stack,
                event_channel,
                call_channel.sender(),
            ))
            .unwrap();
    }

    info!("BRIDGE: Ready, waiting for set_pin_by_name calls");

    // Idle-Loop: keine periodische Arbeit
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
