use super::{StoreError, TicketStore};
use crate::entities::BookingStatus;
use crate::entities::booking::{BookOutcome, BookSeats, Booking, SaleRecord};
use crate::entities::event::{Event, EventUpdate, EventWithOrganizer, InsertEvent, UpdateEvent};
use crate::entities::user::{InsertUser, User};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    events: HashMap<Uuid, Event>,
    /// Insertion order.
    bookings: Vec<Booking>,
    users: HashMap<Uuid, User>,
}

/// [`TicketStore`] kept entirely in process memory.
///
/// One mutex guards all state, so `book_seats` runs its capacity check,
/// increment and booking insert without interleaving.
#[derive(Debug, Default)]
pub struct MemoryTicketStore {
    state: Mutex<MemoryState>,
}

impl MemoryTicketStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn sorted_events<'a>(events: impl Iterator<Item = &'a Event>) -> Vec<Event> {
    let mut events: Vec<Event> = events.cloned().collect();
    events.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.created_at.cmp(&b.created_at))
    });
    events
}

#[async_trait]
impl TicketStore for MemoryTicketStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let state = self.state.lock().await;
        Ok(sorted_events(state.events.values()))
    }

    async fn list_events_by_organizer(&self, organizer: Uuid) -> Result<Vec<Event>, StoreError> {
        let state = self.state.lock().await;
        Ok(sorted_events(
            state.events.values().filter(|e| e.organizer == organizer),
        ))
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        Ok(self.state.lock().await.events.get(&id).cloned())
    }

    async fn get_event_detail(&self, id: Uuid) -> Result<Option<EventWithOrganizer>, StoreError> {
        let state = self.state.lock().await;
        let Some(event) = state.events.get(&id) else {
            return Ok(None);
        };
        Ok(state
            .users
            .get(&event.organizer)
            .map(|organizer| EventWithOrganizer {
                event: event.clone(),
                organizer_name: organizer.name.clone(),
                organizer_email: organizer.email.clone(),
            }))
    }

    async fn get_events_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Event>, StoreError> {
        let state = self.state.lock().await;
        Ok(ids
            .iter()
            .filter_map(|id| state.events.get(id).cloned())
            .collect())
    }

    async fn insert_event(&self, insert: InsertEvent) -> Result<Event, StoreError> {
        let now = OffsetDateTime::now_utc();
        let event = Event {
            id: Uuid::now_v7(),
            title: insert.title,
            description: insert.description,
            category: insert.category,
            location: insert.location,
            date: insert.date,
            time: insert.time,
            price: insert.price,
            ticket_limit: insert.ticket_limit,
            sold_tickets: 0,
            image: insert.image,
            organizer: insert.organizer,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .await
            .events
            .insert(event.id, event.clone());
        Ok(event)
    }

    async fn update_event(&self, update: UpdateEvent) -> Result<EventUpdate, StoreError> {
        let mut state = self.state.lock().await;
        let Some(event) = state.events.get_mut(&update.id) else {
            return Ok(EventUpdate::NotFound);
        };
        if update
            .patch
            .ticket_limit
            .is_some_and(|limit| limit < event.sold_tickets)
        {
            return Ok(EventUpdate::LimitBelowSold {
                sold_tickets: event.sold_tickets,
            });
        }
        update.patch.apply(event);
        event.updated_at = OffsetDateTime::now_utc();
        Ok(EventUpdate::Updated(event.clone()))
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.state.lock().await.events.remove(&id).is_some())
    }

    async fn book_seats(&self, book: BookSeats) -> Result<BookOutcome, StoreError> {
        let mut state = self.state.lock().await;
        let Some(event) = state.events.get_mut(&book.event_id) else {
            return Ok(BookOutcome::EventNotFound);
        };
        let remaining = event.remaining_tickets();
        if book.tickets > remaining {
            return Ok(BookOutcome::Insufficient { remaining });
        }
        let total_amount = event
            .price
            .checked_mul(Decimal::from(book.tickets))
            .ok_or(StoreError::OutOfRange("total_amount"))?;
        event.sold_tickets += book.tickets;
        event.updated_at = OffsetDateTime::now_utc();
        let sold_tickets = event.sold_tickets;
        let ticket_limit = event.ticket_limit;
        let booking = Booking {
            id: Uuid::now_v7(),
            user_id: book.user_id,
            event_id: book.event_id,
            tickets: book.tickets,
            total_amount,
            status: book.status,
            payment_id: None,
            created_at: OffsetDateTime::now_utc(),
        };
        state.bookings.push(booking.clone());
        Ok(BookOutcome::Booked {
            booking,
            sold_tickets,
            ticket_limit,
        })
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .rev()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_confirmed_sales_since(
        &self,
        organizer: Uuid,
        since: OffsetDateTime,
    ) -> Result<Vec<SaleRecord>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed && b.created_at >= since)
            .filter(|b| {
                state
                    .events
                    .get(&b.event_id)
                    .is_some_and(|e| e.organizer == organizer)
            })
            .map(|b| SaleRecord {
                created_at: b.created_at,
                total_amount: b.total_amount,
            })
            .collect())
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }

    async fn insert_user(&self, insert: InsertUser) -> Result<User, StoreError> {
        let mut state = self.state.lock().await;
        if state.users.values().any(|u| u.email == insert.email) {
            return Err(StoreError::Conflict("email"));
        }
        let user = User {
            id: Uuid::now_v7(),
            name: insert.name,
            email: insert.email,
            password_hash: insert.password_hash,
            role: insert.role,
            created_at: OffsetDateTime::now_utc(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }
}
