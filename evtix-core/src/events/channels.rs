//! Seat update channel factory and handles.

use super::types::SeatUpdate;
use tokio::sync::broadcast;

/// Default buffer size for the seat update channel.
///
/// Slow subscribers that fall further behind than this skip ahead.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for SeatUpdate events.
pub type SeatUpdateSender = broadcast::Sender<SeatUpdate>;
/// Receiver handle for SeatUpdate events.
pub type SeatUpdateReceiver = broadcast::Receiver<SeatUpdate>;

/// Create a new SeatUpdate channel.
///
/// Further receivers are created with `sender.subscribe()`.
pub fn seat_update_channel() -> (SeatUpdateSender, SeatUpdateReceiver) {
    broadcast::channel(DEFAULT_CHANNEL_BUFFER)
}
