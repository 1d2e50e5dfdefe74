use super::channels::{SeatUpdateReceiver, SeatUpdateSender, seat_update_channel};
use super::types::SeatUpdate;

/// Publishes seat updates to whoever is listening.
///
/// Publishing is fire-and-forget: it never fails and never blocks the
/// booking that triggered it.
pub trait SeatNotifier: Send + Sync {
    fn broadcast_seat_update(&self, update: SeatUpdate);
}

/// Notifier backed by a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    sender: SeatUpdateSender,
}

impl BroadcastNotifier {
    pub fn new() -> Self {
        let (sender, _) = seat_update_channel();
        Self { sender }
    }

    pub fn subscribe(&self) -> SeatUpdateReceiver {
        self.sender.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SeatNotifier for BroadcastNotifier {
    fn broadcast_seat_update(&self, update: SeatUpdate) {
        // Err only means nobody is subscribed right now.
        if self.sender.send(update).is_err() {
            tracing::trace!(event_id = %update.event_id, "No seat update subscribers");
        }
    }
}

/// Notifier that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl SeatNotifier for NoopNotifier {
    fn broadcast_seat_update(&self, _update: SeatUpdate) {}
}
