// Projekt-Konfiguration: Konstanten und Hardware-Zuordnungen
#![allow(dead_code)]

// ============================================================================
// Bridge Konfiguration
// ============================================================================

/// Kapazität der Bridge-Call-Queue (HTTP Tasks → Pin Task)
pub const BRIDGE_CALL_QUEUE_SIZE: usize = 4;

/// Kapazität des Pin-Event-Channels (Nachrichten im Queue)
pub const PIN_EVENT_QUEUE_SIZE: usize = 4;

/// Maximale Anzahl Event-Subscribers (WebSocket-Connections)
pub const PIN_EVENT_MAX_SUBSCRIBERS: usize = 8;

// ============================================================================
// WiFi Konfiguration
// ============================================================================

/// WiFi SSID (Netzwerk-Name)
/// Wird zur Build-Zeit aus der Environment Variable WIFI_SSID geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_SSID: &str = env!(
    "WIFI_SSID",
    "WiFi SSID nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// WiFi Passwort
/// Wird zur Build-Zeit aus der Environment Variable WIFI_PASSWORD geladen
/// Setze diese in .env file (siehe .env.example)
pub const WIFI_PASSWORD: &str = env!(
    "WIFI_PASSWORD",
    "WiFi Password nicht gesetzt! Erstelle .env file (siehe .env.example)"
);

/// Wartezeit nach fehlgeschlagenem Verbindungsversuch in Sekunden
pub const WIFI_RETRY_DELAY_SECS: u64 = 5;

/// Poll-Intervall beim Warten auf Link/DHCP in Millisekunden
pub const NETWORK_POLL_MS: u64 = 500;

/// Heap-Größe für WiFi (Bytes)
/// WiFi benötigt dynamischen Speicher für Pakete
pub const WIFI_HEAP_SIZE: usize = 65536; // 64 KB

/// Zusätzliche Heap-Größe (Bytes)
pub const EXTRA_HEAP_SIZE: usize = 36864; // 36 KB

/// Anzahl Sockets im embassy-net Stack
/// HTTP-Listener (1 pro Task) + WebSocket-Clients + DHCP
pub const NET_SOCKET_COUNT: usize = 8;

// ============================================================================
// HTTP Server Konfiguration
// ============================================================================

/// TCP-Port des HTTP-Servers
pub const HTTP_PORT: u16 = 80;

/// Anzahl paralleler HTTP Server Tasks
/// Bestimmt auch `pool_size` von `bridge_server_task`
pub const HTTP_TASK_COUNT: usize = 4;

/// HTTP Buffer-Größe in Bytes
/// Für HTTP Request/Response Headers und Body
pub const HTTP_BUFFER_SIZE: usize = 1024;

/// TCP RX Buffer-Größe in Bytes
pub const TCP_RX_BUFFER_SIZE: usize = 1024;

/// TCP TX Buffer-Größe in Bytes
pub const TCP_TX_BUFFER_SIZE: usize = 1024;

/// WebSocket Message Buffer-Größe in Bytes
/// {"method":"set_pin_by_name","params":["LED3_R",true]} ist < 64 Bytes
pub const WEBSOCKET_BUFFER_SIZE: usize = 256;
