//! Application state shared across all request handlers.

use evtix_core::accounts::AccountService;
use evtix_core::booking::BookingService;
use evtix_core::catalog::EventService;
use evtix_core::config::SharedConfig;
use evtix_core::events::{BroadcastNotifier, SeatNotifier};
use evtix_core::store::TicketStore;
use std::sync::Arc;

/// Application state that is shared across all request handlers.
///
/// This is cloneable and cheap to pass around (everything is behind Arc).
#[derive(Clone)]
pub struct AppState {
    pub bookings: BookingService,
    pub events: EventService,
    pub accounts: AccountService,
    /// Seat updates fan out from here to `/ws` subscribers.
    pub notifier: Arc<BroadcastNotifier>,
    /// Runtime configuration (can be reloaded via SIGHUP).
    pub config: SharedConfig,
}

impl AppState {
    /// Wire the services around `store` and a fresh seat update channel.
    pub fn new(store: Arc<dyn TicketStore>, config: SharedConfig) -> Self {
        let notifier = Arc::new(BroadcastNotifier::new());
        let seat_notifier: Arc<dyn SeatNotifier> = notifier.clone();
        Self {
            bookings: BookingService::new(
                store.clone(),
                Some(seat_notifier),
                config.booking.clone(),
            ),
            events: EventService::new(store.clone()),
            accounts: AccountService::new(store, config.auth.clone()),
            notifier,
            config,
        }
    }
}
