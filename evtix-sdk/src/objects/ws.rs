//! WebSocket message types for the seat update stream.
//!
//! The `GET /ws` endpoint upgrades to a WebSocket connection and pushes
//! [`WsServerMessage`] JSON frames.
//!
//! # Protocol
//!
//! 1. Nothing is sent on connect; clients load current counts over HTTP.
//! 2. Every successful booking produces one [`WsServerMessage::UpdateSeats`]
//!    frame on every open connection, regardless of which event it
//!    concerns. Clients filter by `eventId`.
//! 3. Delivery is best-effort. Frames missed while disconnected are not
//!    replayed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Server-to-client WebSocket message.
///
/// Serialized as an internally-tagged JSON object:
///
/// ```json
/// {"type":"update_seats","eventId":"…","soldTickets":12,"remainingTickets":88}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum WsServerMessage {
    /// The sold-ticket count of an event changed.
    UpdateSeats {
        event_id: Uuid,
        sold_tickets: i32,
        remaining_tickets: i32,
    },
}
