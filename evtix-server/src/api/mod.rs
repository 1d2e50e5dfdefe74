//! REST API handlers, mounted under `/api`.
//!
//! # Endpoints
//!
//! - `POST   /auth/register`            – create an account, returns a token
//! - `POST   /auth/login`               – exchange credentials for a token
//! - `GET    /auth/me`                  – current user
//! - `GET    /events`                   – list events
//! - `POST   /events`                   – create an event (organizer/admin)
//! - `GET    /events/my-events`         – caller's events (organizer/admin)
//! - `GET    /events/{id}`              – event detail with organizer
//! - `PUT    /events/{id}`              – edit (owner or admin)
//! - `DELETE /events/{id}`              – delete (owner or admin)
//! - `POST   /bookings`                 – book tickets (user)
//! - `GET    /bookings/my-bookings`     – caller's bookings (user)
//! - `GET    /bookings/organizer-stats` – dashboard numbers (organizer/admin)

use axum::{
    Router,
    routing::{get, post},
};
use evtix_core::entities::booking::Booking;
use evtix_core::entities::event::{Event, EventWithOrganizer};
use evtix_core::entities::user::User;
use evtix_sdk::objects::{BookingResponse, EventResponse, OrganizerSummary, UserResponse};

use crate::state::AppState;

pub mod auth;
pub mod bookings;
pub mod error;
pub mod events;
pub mod extractors;
pub mod ws;

pub use error::ApiError;

/// Build the REST API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route(
            "/events",
            get(events::list::list_events).post(events::create::create_event),
        )
        .route("/events/my-events", get(events::my_events::my_events))
        .route(
            "/events/{id}",
            get(events::get::get_event)
                .put(events::update::update_event)
                .delete(events::delete::delete_event),
        )
        .route("/bookings", post(bookings::create_booking))
        .route("/bookings/my-bookings", get(bookings::my_bookings))
        .route("/bookings/organizer-stats", get(bookings::organizer_stats))
}

/// Convert an `Event` (DB model) into an `EventResponse` (API model) with
/// the organizer's id.
pub(crate) fn event_to_response(event: &Event) -> EventResponse {
    event_with_organizer(event, event.organizer)
}

/// Convert an event joined with its organizer into the detail response.
pub(crate) fn detail_to_response(detail: &EventWithOrganizer) -> EventResponse<OrganizerSummary> {
    event_with_organizer(
        &detail.event,
        OrganizerSummary {
            id: detail.event.organizer,
            name: detail.organizer_name.clone(),
            email: detail.organizer_email.clone(),
        },
    )
}

fn event_with_organizer<O>(event: &Event, organizer: O) -> EventResponse<O> {
    EventResponse {
        id: event.id,
        title: event.title.clone(),
        description: event.description.clone(),
        category: event.category.into(),
        location: event.location.clone(),
        date: event.date,
        time: event.time.clone(),
        price: event.price,
        ticket_limit: event.ticket_limit,
        sold_tickets: event.sold_tickets,
        remaining_tickets: event.remaining_tickets(),
        image: event.image.clone(),
        organizer,
        created_at: event.created_at.unix_timestamp(),
        updated_at: event.updated_at.unix_timestamp(),
    }
}

/// Convert a `Booking` into a `BookingResponse`, with `event` as the
/// caller-chosen event representation.
pub(crate) fn booking_to_response<E>(booking: &Booking, event: E) -> BookingResponse<E> {
    BookingResponse {
        id: booking.id,
        user: booking.user_id,
        event,
        tickets: booking.tickets,
        total_amount: booking.total_amount,
        status: booking.status.into(),
        payment_id: booking.payment_id.clone(),
        created_at: booking.created_at.unix_timestamp(),
    }
}

pub(crate) fn user_to_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.into(),
    }
}
