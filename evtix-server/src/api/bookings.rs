use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use evtix_sdk::objects::{
    CategoryCount, CreateBookingRequest, DailySales, EventResponse, OrganizerStatsResponse,
};

use super::{ApiError, booking_to_response, event_to_response};
use crate::api::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// `POST /bookings`: reserve tickets on an event.
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateBookingRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = state
        .bookings
        .create_booking(&auth.caller(), payload.event_id, payload.tickets)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(booking_to_response(&booking, booking.event_id)),
    ))
}

/// `GET /bookings/my-bookings`: the caller's bookings, newest first.
///
/// `event` is `null` for bookings whose event has since been deleted.
pub async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = state.bookings.list_my_bookings(&auth.caller()).await?;
    let response: Vec<_> = bookings
        .iter()
        .map(|entry| {
            let event: Option<EventResponse> = entry.event.as_ref().map(event_to_response);
            booking_to_response(&entry.booking, event)
        })
        .collect();
    Ok(Json(response))
}

/// `GET /bookings/organizer-stats`: 30-day sales chart and category split.
pub async fn organizer_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let stats = state.bookings.organizer_stats(&auth.caller()).await?;
    Ok(Json(OrganizerStatsResponse {
        sales_volume: stats
            .sales_volume
            .into_iter()
            .map(|(date, amount)| DailySales { date, amount })
            .collect(),
        category_distribution: stats
            .category_distribution
            .into_iter()
            .map(|(category, count)| CategoryCount {
                category: category.into(),
                count,
            })
            .collect(),
    }))
}
