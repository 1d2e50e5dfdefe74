use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use evtix_core::events::SeatUpdateReceiver;
use evtix_sdk::objects::ws::WsServerMessage;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

/// `GET /ws`: live seat counts.
///
/// Upgrades the HTTP connection to a WebSocket and pushes an
/// `update_seats` JSON frame for every booking that commits, across all
/// events. Public; nothing is sent on connect.
pub async fn seat_updates_ws(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    // Subscribe before the upgrade completes so no update is missed
    // between the handshake and the first poll.
    let updates = state.notifier.subscribe();
    ws.on_upgrade(move |socket| handle_seat_ws(socket, updates))
}

/// Drives a single WebSocket connection until the client leaves or the
/// channel closes.
async fn handle_seat_ws(mut socket: WebSocket, mut updates: SeatUpdateReceiver) {
    loop {
        tokio::select! {
            result = updates.recv() => {
                match result {
                    Ok(update) => {
                        let msg = WsServerMessage::from(update);
                        if send_json(&mut socket, &msg).await.is_err() {
                            return;
                        }
                    }
                    Err(RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "WS: seat update receiver lagged");
                    }
                    Err(RecvError::Closed) => {
                        break;
                    }
                }
            }

            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None | Some(Err(_)) => {
                        return;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    let _ = socket.send(Message::Close(None)).await;
}

/// Serialize `value` as JSON and send it as a text WebSocket frame.
///
/// Returns `Err(())` if the send fails (client disconnected).
async fn send_json<T: serde::Serialize>(socket: &mut WebSocket, value: &T) -> Result<(), ()> {
    let json = serde_json::to_string(value).map_err(|_| ())?;
    socket
        .send(Message::Text(json.into()))
        .await
        .map_err(|_| ())
}
