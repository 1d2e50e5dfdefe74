//! Seat-count notifications.
//!
//! Every successful booking produces a [`SeatUpdate`]. Services hand it to a
//! [`SeatNotifier`], which fans it out over a broadcast channel to any
//! connected WebSocket clients.
//!
//! Updates are ephemeral: a client that connects late simply sees the next
//! one, and nothing is replayed.

pub mod channels;
pub mod notifier;
pub mod types;

pub use channels::{
    DEFAULT_CHANNEL_BUFFER, SeatUpdateReceiver, SeatUpdateSender, seat_update_channel,
};
pub use notifier::{BroadcastNotifier, NoopNotifier, SeatNotifier};
pub use types::SeatUpdate;
