// Bridge Server Task - Macht die Bridge-Registry über HTTP/WebSocket erreichbar
use alloc::vec::Vec;
use core::future::pending;
use defmt::{info, warn};
use embassy_futures::select::{Either, select};
use embassy_net::Stack;
use embassy_time::{Duration, Instant};
use picoserve::{io::embedded_io_async, response::IntoResponse, response::ws, routing::get};

use crate::config::*;
use crate::protocol::{
    JSON_ERROR_BUFFER_SIZE, JSON_EVENT_BUFFER_SIZE, PINS_JSON_BUFFER_SIZE, WsServerMessage,
    decode_request, encode_message, encode_pin_directory,
};
use crate::{BridgeCallSender, PinEvent, PinEventChannel, PinEventSubscriber};

/// Response-Enum für den RPC-Endpoint
/// Ermöglicht Rückgabe von entweder WebSocket-Upgrade oder HTTP-Fehler
enum RpcResponse {
    Upgrade(
        ws::UpgradedWebSocket<ws::UnspecifiedProtocol, ws::CallbackNotUsingState<RpcSocket>>,
    ),
    ServiceUnavailable,
}

impl IntoResponse for RpcResponse {
    async fn write_to<
        R: embedded_io_async::Read,
        W: picoserve::response::ResponseWriter<Error = R::Error>,
    >(
        self,
        connection: picoserve::response::Connection<'_, R>,
        response_writer: W,
    ) -> Result<picoserve::ResponseSent, W::Error> {
        match self {
            RpcResponse::Upgrade(ws) => ws.write_to(connection, response_writer).await,
            RpcResponse::ServiceUnavailable => {
                picoserve::response::Response::new(
                    picoserve::response::StatusCode::new(503),
                    "Service Unavailable: Too many bridge connections",
                )
                .with_header("Retry-After", "5")
                .write_to(connection, response_writer)
                .await
            }
        }
    }
}

/// Bridge Server Task - läuft parallel zum Pin Task
///
/// - `GET /pins`: Pin-Tabelle als JSON (Name, Kennung, Polarität)
/// - `GET /rpc`: WebSocket für `set_pin_by_name` Aufrufe und Pin-Events
///
/// **Task Pool:** Wird `HTTP_TASK_COUNT`-mal gespawnt für concurrent connections.
///
/// # Parameter
/// - `task_id`: Eindeutige ID für diese Server-Instanz
/// - `stack`: embassy-net Stack für Netzwerk-Zugriff
/// - `event_channel`: PubSub Channel für Pin-Events (ein Subscriber pro Socket)
/// - `call_sender`: Channel Sender für Bridge-Aufrufe
#[embassy_executor::task(pool_size = HTTP_TASK_COUNT)]
pub async fn bridge_server_task(
    task_id: usize,
    stack: &'static Stack<'static>,
    event_channel: &'static PinEventChannel,
    call_sender: BridgeCallSender,
) {
    info!("HTTP: Server task {} starting on port {}...", task_id, HTTP_PORT);

    let app = picoserve::Router::new().route("/pins", get(serve_pins)).route(
        "/rpc",
        get(
            move |upgrade: picoserve::response::WebSocketUpgrade| async move {
                // Bei mehr Sockets als Subscriber-Slots: HTTP 503 statt Panic
                match event_channel.subscriber() {
                    Ok(event_subscriber) => {
                        info!("HTTP: Bridge socket upgrade");
                        RpcResponse::Upgrade(upgrade.on_upgrade(RpcSocket {
                            call_sender,
                            event_subscriber,
                        }))
                    }
                    Err(_) => {
                        warn!("HTTP: No subscriber slots available, sending HTTP 503");
                        RpcResponse::ServiceUnavailable
                    }
                }
            },
        ),
    );

    let config = picoserve::Config::new(picoserve::Timeouts {
        start_read_request: Some(Duration::from_secs(5)),
        read_request: Some(Duration::from_secs(1)),
        write: Some(Duration::from_secs(1)),
        persistent_start_read_request: Some(Duration::from_secs(5)),
    })
    .keep_connection_alive();

    let mut http_buffer = [0u8; HTTP_BUFFER_SIZE];
    let mut rx_buffer = [0u8; TCP_RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TCP_TX_BUFFER_SIZE];

    let server = picoserve::Server::new(&app, &config, &mut http_buffer);

    let _ = server
        .listen_and_serve(task_id, *stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await;

    info!("HTTP: Server task {} ended", task_id);
}

/// Liefert die Pin-Tabelle als JSON
///
/// Der Host kann daraus Namen und Polarität (Active-Low) ablesen.
async fn serve_pins() -> impl IntoResponse {
    let mut json_buffer = [0u8; PINS_JSON_BUFFER_SIZE];
    let (status, body) = match encode_pin_directory(&mut json_buffer) {
        Ok(n) => (
            picoserve::response::StatusCode::OK,
            Vec::from(&json_buffer[..n]),
        ),
        Err(_) => (
            picoserve::response::StatusCode::INTERNAL_SERVER_ERROR,
            Vec::from(&b"[]"[..]),
        ),
    };
    picoserve::response::Response::new(status, body)
        .with_header("Content-Type", "application/json")
}

/// WebSocket-Handler State für eine Bridge-Verbindung
struct RpcSocket {
    call_sender: BridgeCallSender,
    event_subscriber: PinEventSubscriber,
}

impl ws::WebSocketCallback for RpcSocket {
    async fn run<R: embedded_io_async::Read, W: embedded_io_async::Write<Error = R::Error>>(
        mut self,
        mut rx: ws::SocketRx<R>,
        mut tx: ws::SocketTx<W>,
    ) -> Result<(), W::Error> {
        info!("HTTP: Bridge socket established");

        let mut buffer = [0u8; WEBSOCKET_BUFFER_SIZE];

        let close_reason = loop {
            // Gleichzeitig auf Remote-Aufrufe und Pin-Events warten
            match select(
                rx.next_message(&mut buffer, pending()),
                self.event_subscriber.next_message_pure(),
            )
            .await
            {
                Either::First(ws_result) => match ws_result?.ignore_never_b() {
                    Ok(ws::Message::Text(data)) => {
                        match decode_request(data.as_bytes()) {
                            Ok(request) => {
                                // Übergroßer Name kann kein Tabellen-Pin sein → still ignorieren
                                if let Some(call) = request.to_call() {
                                    self.call_sender.send(call).await;
                                }
                            }
                            Err(_) => {
                                info!("HTTP: JSON parse error");
                                Self::send_error(&mut tx, "JSON parse error").await?;
                            }
                        }
                    }
                    Ok(ws::Message::Binary(data)) => {
                        info!("HTTP: Binary message ignored ({} bytes)", data.len());
                    }
                    Ok(ws::Message::Ping(data)) => tx.send_pong(data).await?,
                    Ok(ws::Message::Pong(_)) => {}
                    Ok(ws::Message::Close(_)) => {
                        info!("HTTP: Bridge socket close received");
                        break None;
                    }
                    Err(error) => {
                        warn!("HTTP: WebSocket error");
                        break Some((error.code(), "WebSocket Error"));
                    }
                },
                Either::Second(event) => Self::send_event(&mut tx, &event).await?,
            }
        };

        info!("HTTP: Bridge socket closed");
        tx.close(close_reason).await
    }
}

impl RpcSocket {
    /// Sendet ein `pin_state_update` an den Client
    async fn send_event<W: embedded_io_async::Write>(
        tx: &mut ws::SocketTx<W>,
        event: &PinEvent,
    ) -> Result<(), W::Error> {
        let message = WsServerMessage::PinStateUpdate {
            name: event.name,
            level: event.level,
            timestamp_ms: Instant::now().as_millis(),
        };

        let mut json_buffer = [0u8; JSON_EVENT_BUFFER_SIZE];
        if let Some(json_str) = encode_message(&message, &mut json_buffer) {
            tx.send_text(json_str).await?;
        }
        Ok(())
    }

    /// Sendet `{"type":"error","message":...}` an den Client
    async fn send_error<W: embedded_io_async::Write>(
        tx: &mut ws::SocketTx<W>,
        message: &str,
    ) -> Result<(), W::Error> {
        let error = WsServerMessage::Error { message };

        let mut json_buffer = [0u8; JSON_ERROR_BUFFER_SIZE];
        if let Some(json_str) = encode_message(&error, &mut json_buffer) {
            tx.send_text(json_str).await?;
        }
        Ok(())
    }
}
