use super::confirmation::BookingDraft;
use super::stats::{OrganizerStats, STATS_WINDOW_DAYS, aggregate_organizer_stats};
use crate::access::{ATTENDEE, AccessError, Caller, EVENT_MANAGERS, authorize};
use crate::config::{BookingConfig, ConfigStore};
use crate::entities::booking::{BookOutcome, BookSeats, Booking};
use crate::entities::event::Event;
use crate::events::{SeatNotifier, SeatUpdate};
use crate::store::{StoreError, TicketStore};
use crate::utils::calendar::{start_of_day, trailing_days};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use time::{Date, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

/// Errors that can occur while booking or reporting on bookings.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("{0}")]
    Validation(String),

    #[error("event not found")]
    NotFound,

    #[error("only {remaining} tickets remaining, {requested} requested")]
    CapacityExceeded { requested: i64, remaining: i32 },

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A booking together with its event, if the event still exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithEvent {
    pub booking: Booking,
    pub event: Option<Event>,
}

#[derive(Clone)]
pub struct BookingService {
    store: Arc<dyn TicketStore>,
    notifier: Option<Arc<dyn SeatNotifier>>,
    config: ConfigStore<BookingConfig>,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn TicketStore>,
        notifier: Option<Arc<dyn SeatNotifier>>,
        config: ConfigStore<BookingConfig>,
    ) -> Self {
        Self {
            store,
            notifier,
            config,
        }
    }

    /// Reserve `tickets` seats on `event_id` for the caller.
    ///
    /// The capacity check and the booking insert happen as one store
    /// operation. Subscribers are notified only after it committed.
    pub async fn create_booking(
        &self,
        caller: &Caller,
        event_id: Uuid,
        tickets: i64,
    ) -> Result<Booking, BookingError> {
        authorize(ATTENDEE, caller.role)?;
        let tickets = i32::try_from(tickets)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| {
                BookingError::Validation("tickets must be a positive integer".to_string())
            })?;

        let draft = BookingDraft {
            event_id,
            user_id: caller.id,
            tickets,
        };
        let step = self.config.read().await.confirmation.step();
        let status = step.initial_status(&draft).await;

        let outcome = self
            .store
            .book_seats(BookSeats {
                event_id,
                user_id: caller.id,
                tickets,
                status,
            })
            .await?;

        match outcome {
            BookOutcome::Booked {
                booking,
                sold_tickets,
                ticket_limit,
            } => {
                info!(
                    booking_id = %booking.id,
                    event_id = %event_id,
                    user_id = %caller.id,
                    tickets,
                    sold_tickets,
                    confirmation = step.name(),
                    "Booking created"
                );
                if let Some(notifier) = &self.notifier {
                    notifier.broadcast_seat_update(SeatUpdate {
                        event_id,
                        sold_tickets,
                        remaining_tickets: ticket_limit - sold_tickets,
                    });
                }
                Ok(booking)
            }
            BookOutcome::EventNotFound => Err(BookingError::NotFound),
            BookOutcome::Insufficient { remaining } => {
                warn!(
                    event_id = %event_id,
                    requested = tickets,
                    remaining,
                    "Booking refused, not enough tickets"
                );
                Err(BookingError::CapacityExceeded {
                    requested: i64::from(tickets),
                    remaining,
                })
            }
        }
    }

    /// The caller's bookings, newest first, each with its event if it still exists.
    pub async fn list_my_bookings(
        &self,
        caller: &Caller,
    ) -> Result<Vec<BookingWithEvent>, BookingError> {
        authorize(ATTENDEE, caller.role)?;
        let bookings = self.store.list_bookings_for_user(caller.id).await?;

        let mut event_ids: Vec<Uuid> = bookings.iter().map(|b| b.event_id).collect();
        event_ids.sort_unstable();
        event_ids.dedup();
        let events: HashMap<Uuid, Event> = self
            .store
            .get_events_by_ids(event_ids)
            .await?
            .into_iter()
            .map(|e| (e.id, e))
            .collect();

        Ok(bookings
            .into_iter()
            .map(|booking| {
                let event = events.get(&booking.event_id).cloned();
                BookingWithEvent { booking, event }
            })
            .collect())
    }

    /// Dashboard numbers for the caller's events over the window ending today (UTC).
    pub async fn organizer_stats(&self, caller: &Caller) -> Result<OrganizerStats, BookingError> {
        self.organizer_stats_on(caller, OffsetDateTime::now_utc().date())
            .await
    }

    pub async fn organizer_stats_on(
        &self,
        caller: &Caller,
        today: Date,
    ) -> Result<OrganizerStats, BookingError> {
        authorize(EVENT_MANAGERS, caller.role)?;
        let since = trailing_days(today, STATS_WINDOW_DAYS)
            .first()
            .copied()
            .unwrap_or(today);
        let events = self.store.list_events_by_organizer(caller.id).await?;
        let sales = self
            .store
            .list_confirmed_sales_since(caller.id, start_of_day(since))
            .await?;
        Ok(aggregate_organizer_stats(today, &events, &sales))
    }
}
