//! Persistence seam for events, bookings and users.
//!
//! Every service in this crate talks to a [`TicketStore`]. The Postgres
//! implementation delegates to the query processors in [`crate::entities`];
//! the in-memory one backs tests and `--in-memory` runs.

mod memory;
mod postgres;

pub use memory::MemoryTicketStore;
pub use postgres::PgTicketStore;

use crate::entities::booking::{BookOutcome, BookSeats, Booking, SaleRecord};
use crate::entities::event::{Event, EventUpdate, EventWithOrganizer, InsertEvent, UpdateEvent};
use crate::entities::user::{InsertUser, User};
use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a [`TicketStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness constraint was violated
    #[error("conflict on {0}")]
    Conflict(&'static str),

    /// A computed value does not fit its column
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
}

#[async_trait]
pub trait TicketStore: Send + Sync {
    /// All events, soonest first.
    async fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    /// Events owned by `organizer`, soonest first.
    async fn list_events_by_organizer(&self, organizer: Uuid) -> Result<Vec<Event>, StoreError>;

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, StoreError>;

    /// An event with its organizer's name and email.
    async fn get_event_detail(&self, id: Uuid) -> Result<Option<EventWithOrganizer>, StoreError>;

    /// Events for the given ids. Missing ids are skipped, order is unspecified.
    async fn get_events_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Event>, StoreError>;

    async fn insert_event(&self, insert: InsertEvent) -> Result<Event, StoreError>;

    /// Apply a patch. Must refuse a ticket limit below the sold count.
    async fn update_event(&self, update: UpdateEvent) -> Result<EventUpdate, StoreError>;

    /// Remove an event. Its bookings are kept.
    async fn delete_event(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Check capacity, take the seats and insert the booking as one atomic step.
    ///
    /// No interleaving of concurrent calls may push `sold_tickets` past
    /// `ticket_limit`, and a failed call changes nothing.
    async fn book_seats(&self, book: BookSeats) -> Result<BookOutcome, StoreError>;

    /// A user's bookings, newest first.
    async fn list_bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError>;

    /// Confirmed sales on `organizer`'s events created at or after `since`.
    async fn list_confirmed_sales_since(
        &self,
        organizer: Uuid,
        since: time::OffsetDateTime,
    ) -> Result<Vec<SaleRecord>, StoreError>;

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Look up by lowercased email.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Insert a user. A taken email is [`StoreError::Conflict`].
    async fn insert_user(&self, insert: InsertUser) -> Result<User, StoreError>;
}
