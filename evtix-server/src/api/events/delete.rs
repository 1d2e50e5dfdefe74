use axum::{Json, extract::State, response::IntoResponse};
use evtix_sdk::objects::DeletedEventResponse;
use uuid::Uuid;

use crate::api::ApiError;
use crate::api::extractors::{ApiPath, AuthUser};
use crate::state::AppState;

/// `DELETE /events/{id}`: delete an event. Owner or admin only.
///
/// Bookings made for the event are kept.
pub async fn delete_event(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.events.delete_event(&auth.caller(), id).await?;
    Ok(Json(DeletedEventResponse { id }))
}
