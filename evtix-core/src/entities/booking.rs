use crate::entities::BookingStatus;
use crate::entities::event::{Event, Reservation};
use crate::framework::DatabaseProcessor;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Not a foreign key: bookings outlive the event they were made for.
    pub event_id: Uuid,
    pub tickets: i32,
    pub total_amount: Decimal,
    pub status: BookingStatus,
    pub payment_id: Option<String>,
    pub created_at: time::OffsetDateTime,
}

impl Booking {
    async fn insert_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        book: &BookSeats,
        total_amount: Decimal,
    ) -> Result<Booking, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            INSERT INTO bookings (id, user_id, event_id, tickets, total_amount, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, event_id, tickets, total_amount, status, payment_id, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(book.user_id)
        .bind(book.event_id)
        .bind(book.tickets)
        .bind(total_amount)
        .bind(book.status)
        .fetch_one(&mut **tx)
        .await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reserve seats on an event and record the booking, all or nothing.
pub struct BookSeats {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub tickets: i32,
    pub status: BookingStatus,
}

/// Result of a [`BookSeats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookOutcome {
    Booked {
        booking: Booking,
        sold_tickets: i32,
        ticket_limit: i32,
    },
    EventNotFound,
    Insufficient {
        remaining: i32,
    },
}

impl Processor<BookSeats> for DatabaseProcessor {
    type Output = BookOutcome;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:BookSeats")]
    async fn process(&self, book: BookSeats) -> Result<BookOutcome, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let seats = match Event::reserve_seats_tx(&mut tx, book.event_id, book.tickets).await? {
            Reservation::Reserved(seats) => seats,
            Reservation::EventNotFound => {
                tx.rollback().await?;
                return Ok(BookOutcome::EventNotFound);
            }
            Reservation::Insufficient { remaining } => {
                tx.rollback().await?;
                return Ok(BookOutcome::Insufficient { remaining });
            }
        };
        let total_amount = seats.price * Decimal::from(book.tickets);
        let booking = Booking::insert_tx(&mut tx, &book, total_amount).await?;
        tx.commit().await?;
        Ok(BookOutcome::Booked {
            booking,
            sold_tickets: seats.sold_tickets,
            ticket_limit: seats.ticket_limit,
        })
    }
}

#[derive(Debug, Clone)]
/// A user's bookings, newest first.
pub struct ListBookingsForUser {
    pub user_id: Uuid,
}

impl Processor<ListBookingsForUser> for DatabaseProcessor {
    type Output = Vec<Booking>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListBookingsForUser")]
    async fn process(&self, query: ListBookingsForUser) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            r#"
            SELECT id, user_id, event_id, tickets, total_amount, status, payment_id, created_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(query.user_id)
        .fetch_all(&self.pool)
        .await
    }
}

/// Amount and timestamp of one confirmed booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct SaleRecord {
    pub created_at: time::OffsetDateTime,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone)]
/// Confirmed bookings on an organizer's events created at or after `since`.
pub struct ListConfirmedSalesSince {
    pub organizer: Uuid,
    pub since: time::OffsetDateTime,
}

impl Processor<ListConfirmedSalesSince> for DatabaseProcessor {
    type Output = Vec<SaleRecord>;
    type Error = sqlx::Error;
    #[tracing::instrument(skip_all, err, name = "SQL:ListConfirmedSalesSince")]
    async fn process(&self, query: ListConfirmedSalesSince) -> Result<Vec<SaleRecord>, sqlx::Error> {
        sqlx::query_as::<_, SaleRecord>(
            r#"
            SELECT b.created_at, b.total_amount
            FROM bookings b
            JOIN events e ON e.id = b.event_id
            WHERE e.organizer_id = $1
              AND b.status = 'confirmed'
              AND b.created_at >= $2
            "#,
        )
        .bind(query.organizer)
        .bind(query.since)
        .fetch_all(&self.pool)
        .await
    }
}
