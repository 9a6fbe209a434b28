//! WebSocket update feed.
//!
//! DESIGN
//! ======
//! Every connection subscribes to the state's broadcast channel during the
//! upgrade request, before the handshake completes, so no update published
//! after the client is connected can be missed. The loop forwards updates as
//! text frames and drains inbound messages without acting on them.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → subscribe
//! 2. Update published → text frame to client
//! 3. Close, socket error, or send failure → drop subscription

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::state::AppState;

/// `GET /ws/updates` — push `New reading: …` messages to the client.
pub async fn handle_updates(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let updates = state.updates.subscribe();
    ws.on_upgrade(move |socket| run_updates(socket, updates))
}

async fn run_updates(mut socket: WebSocket, mut updates: broadcast::Receiver<String>) {
    info!("ws: update subscriber connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
            update = updates.recv() => {
                match update {
                    Ok(text) => {
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "ws: update subscriber lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    }

    info!("ws: update subscriber disconnected");
}

#[cfg(test)]
#[path = "ws_test.rs"]
mod tests;
