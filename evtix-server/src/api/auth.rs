use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use evtix_core::accounts::{Registration, Session};
use evtix_sdk::objects::{AuthResponse, LoginRequest, RegisterRequest};

use super::{ApiError, user_to_response};
use crate::api::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

fn session_to_response(session: &Session) -> AuthResponse {
    AuthResponse {
        token: session.token.clone(),
        user: user_to_response(&session.user),
    }
}

/// `POST /auth/register`: create an account and sign a token for it.
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .accounts
        .register(Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role.map(Into::into),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(session_to_response(&session))))
}

/// `POST /auth/login`: exchange email and password for a token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .accounts
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(session_to_response(&session)))
}

/// `GET /auth/me`
pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(user_to_response(&user))
}
