//! Event catalog: browsing and organizer management of events.

use crate::access::{AccessError, Caller, EVENT_MANAGERS, authorize, ensure_owner_or_admin};
use crate::entities::EventCategory;
use crate::entities::event::{
    DEFAULT_EVENT_IMAGE, Event, EventPatch, EventUpdate, EventWithOrganizer, InsertEvent,
    UpdateEvent,
};
use crate::store::{StoreError, TicketStore};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("{0}")]
    Validation(String),

    #[error("event not found")]
    NotFound,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Input for creating an event. The organizer is always the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: String,
    pub date: time::Date,
    pub time: String,
    pub price: Decimal,
    pub ticket_limit: i32,
    pub image: Option<String>,
}

fn require_text(field: &str, value: &str) -> Result<(), EventError> {
    if value.trim().is_empty() {
        return Err(EventError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Largest price a `NUMERIC(12, 2)` column holds: 9999999999.99.
pub const MAX_EVENT_PRICE: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

fn require_price(price: Decimal) -> Result<(), EventError> {
    if price < Decimal::ZERO {
        return Err(EventError::Validation(
            "price must not be negative".to_string(),
        ));
    }
    if price > MAX_EVENT_PRICE {
        return Err(EventError::Validation(format!(
            "price must not exceed {MAX_EVENT_PRICE}"
        )));
    }
    if price.normalize().scale() > 2 {
        return Err(EventError::Validation(
            "price must have at most two decimal places".to_string(),
        ));
    }
    Ok(())
}

fn require_limit(ticket_limit: i32) -> Result<(), EventError> {
    if ticket_limit < 1 {
        return Err(EventError::Validation(
            "ticketLimit must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn image_or_default(image: Option<String>) -> String {
    image
        .filter(|i| !i.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EVENT_IMAGE.to_string())
}

impl NewEvent {
    fn validate(&self) -> Result<(), EventError> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("location", &self.location)?;
        require_text("time", &self.time)?;
        require_price(self.price)?;
        require_limit(self.ticket_limit)
    }
}

fn validate_patch(patch: &EventPatch) -> Result<(), EventError> {
    if let Some(title) = &patch.title {
        require_text("title", title)?;
    }
    if let Some(description) = &patch.description {
        require_text("description", description)?;
    }
    if let Some(location) = &patch.location {
        require_text("location", location)?;
    }
    if let Some(time) = &patch.time {
        require_text("time", time)?;
    }
    if let Some(price) = patch.price {
        require_price(price)?;
    }
    if let Some(ticket_limit) = patch.ticket_limit {
        require_limit(ticket_limit)?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct EventService {
    store: Arc<dyn TicketStore>,
}

impl EventService {
    pub fn new(store: Arc<dyn TicketStore>) -> Self {
        Self { store }
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, EventError> {
        Ok(self.store.list_events().await?)
    }

    pub async fn get_event(&self, id: Uuid) -> Result<EventWithOrganizer, EventError> {
        self.store
            .get_event_detail(id)
            .await?
            .ok_or(EventError::NotFound)
    }

    pub async fn create_event(&self, caller: &Caller, input: NewEvent) -> Result<Event, EventError> {
        authorize(EVENT_MANAGERS, caller.role)?;
        input.validate()?;
        let event = self
            .store
            .insert_event(InsertEvent {
                title: input.title,
                description: input.description,
                category: input.category,
                location: input.location,
                date: input.date,
                time: input.time,
                price: input.price,
                ticket_limit: input.ticket_limit,
                image: image_or_default(input.image),
                organizer: caller.id,
            })
            .await?;
        info!(event_id = %event.id, organizer = %caller.id, "Event created");
        Ok(event)
    }

    pub async fn update_event(
        &self,
        caller: &Caller,
        id: Uuid,
        mut patch: EventPatch,
    ) -> Result<Event, EventError> {
        authorize(EVENT_MANAGERS, caller.role)?;
        let existing = self.store.get_event(id).await?.ok_or(EventError::NotFound)?;
        ensure_owner_or_admin(&existing, caller)?;
        validate_patch(&patch)?;
        if patch.image.is_some() {
            patch.image = Some(image_or_default(patch.image));
        }

        match self.store.update_event(UpdateEvent { id, patch }).await? {
            EventUpdate::Updated(event) => {
                info!(event_id = %id, editor = %caller.id, "Event updated");
                Ok(event)
            }
            EventUpdate::NotFound => Err(EventError::NotFound),
            EventUpdate::LimitBelowSold { sold_tickets } => Err(EventError::Validation(format!(
                "ticketLimit cannot be lower than the {sold_tickets} tickets already sold"
            ))),
        }
    }

    /// Delete an event. Its bookings stay behind.
    pub async fn delete_event(&self, caller: &Caller, id: Uuid) -> Result<Uuid, EventError> {
        authorize(EVENT_MANAGERS, caller.role)?;
        let existing = self.store.get_event(id).await?.ok_or(EventError::NotFound)?;
        ensure_owner_or_admin(&existing, caller)?;
        if !self.store.delete_event(id).await? {
            return Err(EventError::NotFound);
        }
        info!(event_id = %id, editor = %caller.id, "Event deleted");
        Ok(id)
    }

    pub async fn list_my_events(&self, caller: &Caller) -> Result<Vec<Event>, EventError> {
        authorize(EVENT_MANAGERS, caller.role)?;
        Ok(self.store.list_events_by_organizer(caller.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::UserRole;
    use crate::entities::user::InsertUser;
    use crate::store::MemoryTicketStore;
    use time::macros::date;

    fn new_event(title: &str, date: time::Date) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "An evening".to_string(),
            category: EventCategory::Arts,
            location: "Gallery".to_string(),
            date,
            time: "19:30".to_string(),
            price: Decimal::new(1500, 2),
            ticket_limit: 50,
            image: None,
        }
    }

    async fn organizer(store: &MemoryTicketStore, email: &str) -> Caller {
        let user = store
            .insert_user(InsertUser {
                name: "Organizer".to_string(),
                email: email.to_string(),
                password_hash: "x".to_string(),
                role: UserRole::Organizer,
            })
            .await
            .unwrap();
        Caller {
            id: user.id,
            role: user.role,
        }
    }

    #[tokio::test]
    async fn test_create_sets_organizer_and_defaults() {
        let store = Arc::new(MemoryTicketStore::new());
        let service = EventService::new(store.clone());
        let owner = organizer(&store, "o@example.com").await;

        let event = service
            .create_event(&owner, new_event("Opening", date!(2026 - 11 - 01)))
            .await
            .unwrap();
        assert_eq!(event.organizer, owner.id);
        assert_eq!(event.sold_tickets, 0);
        assert_eq!(event.image, DEFAULT_EVENT_IMAGE);

        let detail = service.get_event(event.id).await.unwrap();
        assert_eq!(detail.organizer_email, "o@example.com");
    }

    #[tokio::test]
    async fn test_create_validates_input() {
        let store = Arc::new(MemoryTicketStore::new());
        let service = EventService::new(store.clone());
        let owner = organizer(&store, "o@example.com").await;

        let mut blank = new_event("  ", date!(2026 - 11 - 01));
        assert!(matches!(
            service.create_event(&owner, blank.clone()).await,
            Err(EventError::Validation(_))
        ));
        blank.title = "Fine".to_string();
        blank.price = Decimal::new(-1, 0);
        assert!(matches!(
            service.create_event(&owner, blank.clone()).await,
            Err(EventError::Validation(_))
        ));
        blank.price = Decimal::ZERO;
        blank.ticket_limit = 0;
        assert!(matches!(
            service.create_event(&owner, blank).await,
            Err(EventError::Validation(_))
        ));
        assert!(service.list_events().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_price_must_fit_two_decimal_places() {
        let store = Arc::new(MemoryTicketStore::new());
        let service = EventService::new(store.clone());
        let owner = organizer(&store, "o@example.com").await;
        assert_eq!(MAX_EVENT_PRICE.to_string(), "9999999999.99");

        let mut input = new_event("Gala", date!(2026 - 11 - 01));
        for price in [
            Decimal::MAX,
            MAX_EVENT_PRICE + Decimal::new(1, 2),
            Decimal::new(10_005, 3),
        ] {
            input.price = price;
            assert!(
                matches!(
                    service.create_event(&owner, input.clone()).await,
                    Err(EventError::Validation(_))
                ),
                "{price} accepted"
            );
        }
        assert!(service.list_events().await.unwrap().is_empty());

        input.price = MAX_EVENT_PRICE;
        let event = service.create_event(&owner, input.clone()).await.unwrap();
        input.price = Decimal::new(10_500, 3);
        service.create_event(&owner, input).await.unwrap();

        let patch = EventPatch {
            price: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(matches!(
            service.update_event(&owner, event.id, patch).await,
            Err(EventError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_attendee_cannot_create() {
        let store = Arc::new(MemoryTicketStore::new());
        let service = EventService::new(store);
        let attendee = Caller {
            id: Uuid::now_v7(),
            role: UserRole::User,
        };
        assert!(matches!(
            service
                .create_event(&attendee, new_event("Nope", date!(2026 - 11 - 01)))
                .await,
            Err(EventError::Access(AccessError::Forbidden { .. }))
        ));
    }

    #[tokio::test]
    async fn test_non_owner_cannot_edit_or_delete() {
        let store = Arc::new(MemoryTicketStore::new());
        let service = EventService::new(store.clone());
        let owner = organizer(&store, "owner@example.com").await;
        let rival = organizer(&store, "rival@example.com").await;
        let event = service
            .create_event(&owner, new_event("Mine", date!(2026 - 11 - 01)))
            .await
            .unwrap();

        let patch = EventPatch {
            title: Some("Stolen".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_event(&rival, event.id, patch).await,
            Err(EventError::Access(AccessError::NotOwner))
        ));
        assert!(matches!(
            service.delete_event(&rival, event.id).await,
            Err(EventError::Access(AccessError::NotOwner))
        ));
        assert_eq!(store.get_event(event.id).await.unwrap(), Some(event));
    }

    #[tokio::test]
    async fn test_admin_can_edit_any_event() {
        let store = Arc::new(MemoryTicketStore::new());
        let service = EventService::new(store.clone());
        let owner = organizer(&store, "owner@example.com").await;
        let admin = Caller {
            id: Uuid::now_v7(),
            role: UserRole::Admin,
        };
        let event = service
            .create_event(&owner, new_event("Mine", date!(2026 - 11 - 01)))
            .await
            .unwrap();

        let updated = service
            .update_event(
                &admin,
                event.id,
                EventPatch {
                    location: Some("Main Hall".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.location, "Main Hall");
        assert_eq!(updated.title, "Mine");
        assert_eq!(service.delete_event(&admin, event.id).await.unwrap(), event.id);
        assert!(matches!(
            service.get_event(event.id).await,
            Err(EventError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_my_events_sorted_by_date() {
        let store = Arc::new(MemoryTicketStore::new());
        let service = EventService::new(store.clone());
        let owner = organizer(&store, "owner@example.com").await;
        let other = organizer(&store, "other@example.com").await;
        service
            .create_event(&owner, new_event("Later", date!(2026 - 12 - 01)))
            .await
            .unwrap();
        service
            .create_event(&owner, new_event("Sooner", date!(2026 - 11 - 01)))
            .await
            .unwrap();
        service
            .create_event(&other, new_event("Elsewhere", date!(2026 - 10 - 30)))
            .await
            .unwrap();

        let titles: Vec<String> = service
            .list_my_events(&owner)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.title)
            .collect();
        assert_eq!(titles, vec!["Sooner", "Later"]);
        assert_eq!(service.list_events().await.unwrap().len(), 3);
    }
}
