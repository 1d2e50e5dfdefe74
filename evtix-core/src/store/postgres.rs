use super::{StoreError, TicketStore};
use crate::entities::booking::{
    BookOutcome, BookSeats, Booking, ListBookingsForUser, ListConfirmedSalesSince, SaleRecord,
};
use crate::entities::event::{
    DeleteEvent, Event, EventUpdate, EventWithOrganizer, GetEventById, GetEventWithOrganizer,
    GetEventsByIds, InsertEvent, ListEvents, ListEventsByOrganizer, UpdateEvent,
};
use crate::entities::user::{GetUserByEmail, GetUserById, InsertUser, User};
use crate::framework::DatabaseProcessor;
use async_trait::async_trait;
use kanau::processor::Processor;
use sqlx::PgPool;
use uuid::Uuid;

/// [`TicketStore`] backed by Postgres.
#[derive(Debug, Clone)]
pub struct PgTicketStore {
    processor: DatabaseProcessor,
}

impl PgTicketStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            processor: DatabaseProcessor { pool },
        }
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.processor.process(ListEvents).await?)
    }

    async fn list_events_by_organizer(&self, organizer: Uuid) -> Result<Vec<Event>, StoreError> {
        Ok(self
            .processor
            .process(ListEventsByOrganizer { organizer })
            .await?)
    }

    async fn get_event(&self, id: Uuid) -> Result<Option<Event>, StoreError> {
        Ok(self.processor.process(GetEventById { id }).await?)
    }

    async fn get_event_detail(&self, id: Uuid) -> Result<Option<EventWithOrganizer>, StoreError> {
        Ok(self.processor.process(GetEventWithOrganizer { id }).await?)
    }

    async fn get_events_by_ids(&self, ids: Vec<Uuid>) -> Result<Vec<Event>, StoreError> {
        Ok(self.processor.process(GetEventsByIds { ids }).await?)
    }

    async fn insert_event(&self, insert: InsertEvent) -> Result<Event, StoreError> {
        Ok(self.processor.process(insert).await?)
    }

    async fn update_event(&self, update: UpdateEvent) -> Result<EventUpdate, StoreError> {
        Ok(self.processor.process(update).await?)
    }

    async fn delete_event(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.processor.process(DeleteEvent { id }).await?)
    }

    async fn book_seats(&self, book: BookSeats) -> Result<BookOutcome, StoreError> {
        Ok(self.processor.process(book).await?)
    }

    async fn list_bookings_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, StoreError> {
        Ok(self
            .processor
            .process(ListBookingsForUser { user_id })
            .await?)
    }

    async fn list_confirmed_sales_since(
        &self,
        organizer: Uuid,
        since: time::OffsetDateTime,
    ) -> Result<Vec<SaleRecord>, StoreError> {
        Ok(self
            .processor
            .process(ListConfirmedSalesSince { organizer, since })
            .await?)
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.processor.process(GetUserById { id }).await?)
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .processor
            .process(GetUserByEmail {
                email: email.to_owned(),
            })
            .await?)
    }

    async fn insert_user(&self, insert: InsertUser) -> Result<User, StoreError> {
        match self.processor.process(insert).await {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::Conflict("email"))
            }
            Err(e) => Err(e.into()),
        }
    }
}
