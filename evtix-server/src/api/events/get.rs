use axum::{Json, extract::State, response::IntoResponse};
use uuid::Uuid;

use crate::api::extractors::ApiPath;
use crate::api::{ApiError, detail_to_response};
use crate::state::AppState;

/// `GET /events/{id}`: one event with its organizer's name and email. Public.
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state.events.get_event(id).await?;
    Ok(Json(detail_to_response(&detail)))
}
