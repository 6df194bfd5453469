//! HTTP and WebSocket surface.
//!
//! Serves the pull endpoints (`/api/data`, `/api/blast-data`, `/health`) and
//! the `/ws` upgrade endpoint. Each WebSocket client gets its own socket
//! task that drains the receiver handed out by the registry; the task exits
//! and deregisters the client on a close frame, a transport error, or a
//! failed push.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use futures_util::StreamExt;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::generator;
use crate::registry::Registry;

static NEXT_CLIENT_ID: AtomicUsize = AtomicUsize::new(1);

/// Binds the configured port and serves until shutdown.
pub async fn run(
    config: Config,
    registry: Arc<Registry>,
    shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Monitoring server listening on {}", addr);
    serve(listener, registry, shutdown).await
}

/// Serves on an already-bound listener. Split out from [`run`] so tests can
/// bind port 0 and discover the address themselves.
pub async fn serve(
    listener: TcpListener,
    registry: Arc<Registry>,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    // Dashboards are served from other origins; the channel is open to all.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/ws", get(ws_handler))
        .route("/api/data", get(data_handler))
        .route("/api/blast-data", get(blast_data_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(registry);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.recv().await.ok();
            log::info!("Monitoring server shutting down.");
        })
        .await?;

    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "OK")
}

/// One-shot snapshot of all process instruments, generated fresh per call.
async fn data_handler() -> impl IntoResponse {
    Json(generator::process_snapshot())
}

/// One-shot snapshot of all blast-zone sensors, generated fresh per call.
async fn blast_data_handler() -> impl IntoResponse {
    Json(generator::blast_snapshot())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(registry): State<Arc<Registry>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, registry))
}

/// Manages one WebSocket client session from open to close.
///
/// The client is registered with the registry only after the handshake has
/// completed; handshake failures never reach the registry. Inbound frames
/// from clients carry no meaning on this channel and are ignored.
async fn handle_socket(mut socket: WebSocket, registry: Arc<Registry>) {
    let client_id = format!("ws-{}", NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed));
    let mut rx = registry.add_client(&client_id);
    log::info!("Client {} connected", client_id);

    loop {
        tokio::select! {
            // Broadcast payload ready for this client.
            frame = rx.recv() => {
                match frame {
                    Some(payload) => {
                        if socket.send(Message::Text(payload.to_string().into())).await.is_err() {
                            // Write failed; treat the client as gone.
                            break;
                        }
                    }
                    // Registry evicted us; nothing more will arrive.
                    None => break,
                }
            }
            // Client-side traffic, only interesting for lifecycle events.
            msg = socket.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(e)) => {
                        log::warn!("Client {} transport error: {}", client_id, e);
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    registry.remove_client(&client_id);
    log::info!("Client {} disconnected", client_id);
}
