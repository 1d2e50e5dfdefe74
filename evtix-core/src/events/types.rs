use evtix_sdk::objects::ws::WsServerMessage;
use uuid::Uuid;

/// Seat counts of one event right after a booking committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatUpdate {
    pub event_id: Uuid,
    pub sold_tickets: i32,
    pub remaining_tickets: i32,
}

impl From<SeatUpdate> for WsServerMessage {
    fn from(update: SeatUpdate) -> Self {
        WsServerMessage::UpdateSeats {
            event_id: update.event_id,
            sold_tickets: update.sold_tickets,
            remaining_tickets: update.remaining_tickets,
        }
    }
}
