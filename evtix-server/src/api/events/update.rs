use axum::{Json, extract::State, response::IntoResponse};
use evtix_core::entities::event::EventPatch;
use evtix_sdk::objects::UpdateEventRequest;
use uuid::Uuid;

use crate::api::extractors::{ApiJson, ApiPath, AuthUser};
use crate::api::{ApiError, event_to_response};
use crate::state::AppState;

/// `PUT /events/{id}`: edit an event. Owner or admin only.
///
/// Absent fields are left unchanged. `soldTickets` and `organizer` cannot
/// be edited and are ignored if sent.
pub async fn update_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<UpdateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let patch = EventPatch {
        title: payload.title,
        description: payload.description,
        category: payload.category.map(Into::into),
        location: payload.location,
        date: payload.date,
        time: payload.time,
        price: payload.price,
        ticket_limit: payload.ticket_limit,
        image: payload.image,
    };
    let event = state.events.update_event(&auth.caller(), id, patch).await?;
    Ok(Json(event_to_response(&event)))
}
