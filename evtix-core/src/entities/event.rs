use crate::entities::EventCategory;
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Image used when an event is created without one.
pub const DEFAULT_EVENT_IMAGE: &str = "https://via.placeholder.com/800x400?text=Event+Image";

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: String,
    #[sqlx(rename = "event_date")]
    pub date: time::Date,
    /// Free-text start time, e.g. "18:30" or "doors at 7".
    #[sqlx(rename = "start_time")]
    pub time: String,
    pub price: Decimal,
    pub ticket_limit: i32,
    pub sold_tickets: i32,
    pub image: String,
    #[sqlx(rename = "organizer_id")]
    pub organizer: Uuid,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

impl Event {
    pub fn remaining_tickets(&self) -> i32 {
        self.ticket_limit - self.sold_tickets
    }
}

/// An event joined with its organizer's public profile.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EventWithOrganizer {
    #[sqlx(flatten)]
    pub event: Event,
    pub organizer_name: String,
    pub organizer_email: String,
}

#[derive(Debug, Clone)]
/// List every event, soonest first.
pub struct ListEvents;

impl Processor<ListEvents> for DatabaseProcessor {
    type Output = Vec<Event>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListEvents")]
    async fn process(&self, _query: ListEvents) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, category, location, event_date, start_time,
                   price, ticket_limit, sold_tickets, image, organizer_id, created_at, updated_at
            FROM events
            ORDER BY event_date ASC, created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// List the events owned by one organizer, soonest first.
pub struct ListEventsByOrganizer {
    pub organizer: Uuid,
}

impl Processor<ListEventsByOrganizer> for DatabaseProcessor {
    type Output = Vec<Event>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListEventsByOrganizer")]
    async fn process(&self, query: ListEventsByOrganizer) -> Result<Vec<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, category, location, event_date, start_time,
                   price, ticket_limit, sold_tickets, image, organizer_id, created_at, updated_at
            FROM events
            WHERE organizer_id = $1
            ORDER BY event_date ASC, created_at ASC
            "#,
        )
        .bind(query.organizer)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
pub struct GetEventById {
    pub id: Uuid,
}

impl Processor<GetEventById> for DatabaseProcessor {
    type Output = Option<Event>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEventById")]
    async fn process(&self, query: GetEventById) -> Result<Option<Event>, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, category, location, event_date, start_time,
                   price, ticket_limit, sold_tickets, image, organizer_id, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(query.id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Fetch several events at once. Ids with no matching row are skipped.
pub struct GetEventsByIds {
    pub ids: Vec<Uuid>,
}

impl Processor<GetEventsByIds> for DatabaseProcessor {
    type Output = Vec<Event>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEventsByIds")]
    async fn process(&self, query: GetEventsByIds) -> Result<Vec<Event>, sqlx::Error> {
        if query.ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, description, category, location, event_date, start_time,
                   price, ticket_limit, sold_tickets, image, organizer_id, created_at, updated_at
            FROM events
            WHERE id = ANY($1)
            "#,
        )
        .bind(query.ids)
        .fetch_all(&self.pool)
        .await
    }
}

#[derive(Debug, Clone)]
/// Fetch one event together with its organizer's name and email.
pub struct GetEventWithOrganizer {
    pub id: Uuid,
}

impl Processor<GetEventWithOrganizer> for DatabaseProcessor {
    type Output = Option<EventWithOrganizer>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:GetEventWithOrganizer")]
    async fn process(
        &self,
        query: GetEventWithOrganizer,
    ) -> Result<Option<EventWithOrganizer>, sqlx::Error> {
        sqlx::query_as::<_, EventWithOrganizer>(
            r#"
            SELECT e.id, e.title, e.description, e.category, e.location, e.event_date,
                   e.start_time, e.price, e.ticket_limit, e.sold_tickets, e.image,
                   e.organizer_id, e.created_at, e.updated_at,
                   u.name AS organizer_name, u.email AS organizer_email
            FROM events e
            JOIN users u ON u.id = e.organizer_id
            WHERE e.id = $1
            "#,
        )
        .bind(query.id)
        .fetch_optional(&self.pool)
        .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Data for inserting a new event. `sold_tickets` always starts at zero.
pub struct InsertEvent {
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: String,
    pub date: time::Date,
    pub time: String,
    pub price: Decimal,
    pub ticket_limit: i32,
    pub image: String,
    pub organizer: Uuid,
}

impl Processor<InsertEvent> for DatabaseProcessor {
    type Output = Event;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:InsertEvent")]
    async fn process(&self, insert: InsertEvent) -> Result<Event, sqlx::Error> {
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events
            (id, title, description, category, location, event_date, start_time,
             price, ticket_limit, image, organizer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, description, category, location, event_date, start_time,
                      price, ticket_limit, sold_tickets, image, organizer_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(insert.title)
        .bind(insert.description)
        .bind(insert.category)
        .bind(insert.location)
        .bind(insert.date)
        .bind(insert.time)
        .bind(insert.price)
        .bind(insert.ticket_limit)
        .bind(insert.image)
        .bind(insert.organizer)
        .fetch_one(&self.pool)
        .await
    }
}

/// Editable event fields. `None` leaves the field unchanged.
///
/// `sold_tickets` and `organizer` are deliberately absent: they only change
/// through bookings and never through an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<EventCategory>,
    pub location: Option<String>,
    pub date: Option<time::Date>,
    pub time: Option<String>,
    pub price: Option<Decimal>,
    pub ticket_limit: Option<i32>,
    pub image: Option<String>,
}

impl EventPatch {
    /// Apply the present fields to `event` in place.
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(description) = self.description {
            event.description = description;
        }
        if let Some(category) = self.category {
            event.category = category;
        }
        if let Some(location) = self.location {
            event.location = location;
        }
        if let Some(date) = self.date {
            event.date = date;
        }
        if let Some(time) = self.time {
            event.time = time;
        }
        if let Some(price) = self.price {
            event.price = price;
        }
        if let Some(ticket_limit) = self.ticket_limit {
            event.ticket_limit = ticket_limit;
        }
        if let Some(image) = self.image {
            event.image = image;
        }
    }
}

/// Result of an [`UpdateEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventUpdate {
    Updated(Event),
    NotFound,
    /// The new ticket limit would fall below the tickets already sold.
    LimitBelowSold { sold_tickets: i32 },
}

#[derive(Debug, Clone)]
/// Apply an [`EventPatch`]. The capacity guard is part of the `UPDATE`
/// predicate so a concurrent booking cannot slip past a lowered limit.
pub struct UpdateEvent {
    pub id: Uuid,
    pub patch: EventPatch,
}

impl Processor<UpdateEvent> for DatabaseProcessor {
    type Output = EventUpdate;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:UpdateEvent")]
    async fn process(&self, update: UpdateEvent) -> Result<EventUpdate, sqlx::Error> {
        let patch = update.patch;
        let updated = sqlx::query_as::<_, Event>(
            r#"
            UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                location = COALESCE($5, location),
                event_date = COALESCE($6, event_date),
                start_time = COALESCE($7, start_time),
                price = COALESCE($8, price),
                ticket_limit = COALESCE($9, ticket_limit),
                image = COALESCE($10, image),
                updated_at = NOW()
            WHERE id = $1 AND COALESCE($9, ticket_limit) >= sold_tickets
            RETURNING id, title, description, category, location, event_date, start_time,
                      price, ticket_limit, sold_tickets, image, organizer_id, created_at, updated_at
            "#,
        )
        .bind(update.id)
        .bind(patch.title)
        .bind(patch.description)
        .bind(patch.category)
        .bind(patch.location)
        .bind(patch.date)
        .bind(patch.time)
        .bind(patch.price)
        .bind(patch.ticket_limit)
        .bind(patch.image)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(event) = updated {
            return Ok(EventUpdate::Updated(event));
        }

        let sold = sqlx::query_scalar::<_, i32>("SELECT sold_tickets FROM events WHERE id = $1")
            .bind(update.id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(match sold {
            Some(sold_tickets) => EventUpdate::LimitBelowSold { sold_tickets },
            None => EventUpdate::NotFound,
        })
    }
}

#[derive(Debug, Clone)]
/// Delete an event. Returns whether a row was removed.
pub struct DeleteEvent {
    pub id: Uuid,
}

impl Processor<DeleteEvent> for DatabaseProcessor {
    type Output = bool;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:DeleteEvent")]
    async fn process(&self, delete: DeleteEvent) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(delete.id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Seats taken by a successful reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReservedSeats {
    pub price: Decimal,
    pub sold_tickets: i32,
    pub ticket_limit: i32,
}

/// Outcome of a conditional seat reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reservation {
    Reserved(ReservedSeats),
    EventNotFound,
    Insufficient { remaining: i32 },
}

impl Event {
    /// Atomically add `tickets` to `sold_tickets` if the event still has room.
    ///
    /// The capacity check lives in the `UPDATE` predicate, so two concurrent
    /// reservations can never both pass against the same remaining seats.
    pub async fn reserve_seats_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        event_id: Uuid,
        tickets: i32,
    ) -> Result<Reservation, sqlx::Error> {
        let reserved = sqlx::query_as::<_, (Decimal, i32, i32)>(
            r#"
            UPDATE events
            SET sold_tickets = sold_tickets + $2, updated_at = NOW()
            WHERE id = $1 AND ticket_limit - sold_tickets >= $2
            RETURNING price, sold_tickets, ticket_limit
            "#,
        )
        .bind(event_id)
        .bind(tickets)
        .fetch_optional(&mut **tx)
        .await?;

        if let Some((price, sold_tickets, ticket_limit)) = reserved {
            return Ok(Reservation::Reserved(ReservedSeats {
                price,
                sold_tickets,
                ticket_limit,
            }));
        }

        let remaining = sqlx::query_scalar::<_, i32>(
            "SELECT ticket_limit - sold_tickets FROM events WHERE id = $1",
        )
        .bind(event_id)
        .fetch_optional(&mut **tx)
        .await?;
        Ok(match remaining {
            Some(remaining) => Reservation::Insufficient { remaining },
            None => Reservation::EventNotFound,
        })
    }
}
