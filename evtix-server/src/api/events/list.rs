use axum::{Json, extract::State, response::IntoResponse};

use crate::api::{ApiError, event_to_response};
use crate::state::AppState;

/// `GET /events`: every event, soonest first. Public.
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = state.events.list_events().await?;
    let response: Vec<_> = events.iter().map(event_to_response).collect();
    Ok(Json(response))
}
