use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use evtix_core::catalog::NewEvent;
use evtix_sdk::objects::CreateEventRequest;

use crate::api::extractors::{ApiJson, AuthUser};
use crate::api::{ApiError, event_to_response};
use crate::state::AppState;

/// `POST /events`: create an event owned by the caller.
pub async fn create_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state
        .events
        .create_event(
            &auth.caller(),
            NewEvent {
                title: payload.title,
                description: payload.description,
                category: payload.category.into(),
                location: payload.location,
                date: payload.date,
                time: payload.time,
                price: payload.price,
                ticket_limit: payload.ticket_limit,
                image: payload.image,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(event_to_response(&event))))
}
