//! Custom Axum extractors.
//!
//! Provides `AuthUser`, which resolves an `Authorization: Bearer <token>`
//! header to the current user record. Token verification is delegated to
//! [`evtix_sdk::token`] through the account service.
//!
//! `ApiJson` and `ApiPath` wrap axum's `Json` and `Path` so that malformed
//! bodies and path segments are rejected as a `400` [`ApiError`] instead of
//! axum's plain-text rejections.

use axum::{
    extract::{FromRequest, FromRequestParts},
    http::request::Parts,
};
use evtix_core::access::Caller;
use evtix_core::entities::user::User;
use evtix_sdk::token::{AUTHORIZATION_HEADER, strip_bearer};

use crate::api::ApiError;
use crate::state::AppState;

/// The authenticated user behind a request.
///
/// Rejects with `401` when the header is missing or malformed, the token
/// fails verification or has expired, or its user no longer exists. The
/// user is re-read on every request so role changes apply immediately.
///
/// Implements `FromRequestParts` so it can be combined with `Json<T>`,
/// `Path<T>`, etc.
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn caller(&self) -> Caller {
        Caller {
            id: self.0.id,
            role: self.0.role,
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(strip_bearer)
            .ok_or_else(ApiError::unauthorized)?;

        let user = state.accounts.authenticate(token).await?;
        Ok(AuthUser(user))
    }
}

/// JSON request body rejected as [`ApiError::Validation`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Path parameters rejected as [`ApiError::Validation`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
