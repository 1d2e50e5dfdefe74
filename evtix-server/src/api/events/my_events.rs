use axum::{Json, extract::State, response::IntoResponse};

use crate::api::extractors::AuthUser;
use crate::api::{ApiError, event_to_response};
use crate::state::AppState;

/// `GET /events/my-events`: events owned by the caller.
pub async fn my_events(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let events = state.events.list_my_events(&auth.caller()).await?;
    let response: Vec<_> = events.iter().map(event_to_response).collect();
    Ok(Json(response))
}
