//! Session tokens for authenticated API calls.
//!
//! A token is issued on register/login and sent back on every protected
//! request:
//!
//! ```text
//! Authorization: Bearer {user_id}.{expires_at}.{base64_signature}
//! ```
//!
//! The signature is `HMAC-SHA256("{user_id}.{expires_at}", secret)` where
//! `expires_at` is a unix timestamp in seconds.

use uuid::Uuid;

/// Header carrying the session token.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Scheme prefix expected in front of the token.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Errors produced by token operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid token format")]
    InvalidFormat,
    #[error("invalid base64 encoding")]
    InvalidBase64,
    #[error("invalid signature")]
    SignatureMismatch,
    #[error("token expired")]
    Expired,
}

impl From<ring::error::Unspecified> for TokenError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

/// The verified claims of a session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionToken {
    pub user_id: Uuid,
    pub expires_at: i64,
}

impl SessionToken {
    /// Create claims for `user_id` expiring `ttl_secs` from now.
    pub fn new(user_id: Uuid, ttl_secs: i64) -> Self {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        Self {
            user_id,
            expires_at: now.saturating_add(ttl_secs),
        }
    }

    fn payload(&self) -> String {
        format!("{}.{}", self.user_id, self.expires_at)
    }

    /// Sign the claims and format the full token string.
    pub fn sign(&self, key: &[u8]) -> String {
        let payload = self.payload();
        let sig = ring::hmac::sign(
            &ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key),
            payload.as_bytes(),
        );
        format!(
            "{payload}.{}",
            fast32::base64::RFC4648_NOPAD.encode(sig.as_ref())
        )
    }

    /// Verify `token` against `key` and the current time.
    pub fn verify(token: &str, key: &[u8]) -> Result<Self, TokenError> {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        Self::verify_at(token, key, now)
    }

    /// Verify `token` against `key`, treating `now` as the current unix time.
    pub fn verify_at(token: &str, key: &[u8], now: i64) -> Result<Self, TokenError> {
        let (claims, signature) = parse_token(token)?;
        ring::hmac::verify(
            &ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key),
            claims.payload().as_bytes(),
            &signature,
        )?;
        if now >= claims.expires_at {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}

/// Split a token into its claims and raw signature bytes without verifying.
fn parse_token(token: &str) -> Result<(SessionToken, Vec<u8>), TokenError> {
    let mut parts = token.splitn(3, '.');
    let (Some(user_id), Some(expires_at), Some(signature)) =
        (parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::InvalidFormat);
    };
    let user_id = Uuid::parse_str(user_id).map_err(|_| TokenError::InvalidFormat)?;
    let expires_at: i64 = expires_at.parse().map_err(|_| TokenError::InvalidFormat)?;
    let signature = fast32::base64::RFC4648_NOPAD
        .decode_str(signature)
        .map_err(|_| TokenError::InvalidBase64)?;
    Ok((
        SessionToken {
            user_id,
            expires_at,
        },
        signature,
    ))
}

/// Extract the token from an `Authorization` header value.
pub fn strip_bearer(header_value: &str) -> Option<&str> {
    header_value
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test-secret";

    #[test]
    fn test_signed_token_verifies() {
        let claims = SessionToken {
            user_id: Uuid::from_u128(0x1234),
            expires_at: 2_000,
        };
        let token = claims.sign(KEY);
        assert_eq!(SessionToken::verify_at(&token, KEY, 1_000), Ok(claims));
    }

    #[test]
    fn test_rejects_wrong_key_and_tampering() {
        let claims = SessionToken {
            user_id: Uuid::from_u128(0x1234),
            expires_at: 2_000,
        };
        let token = claims.sign(KEY);
        assert_eq!(
            SessionToken::verify_at(&token, b"other", 1_000),
            Err(TokenError::SignatureMismatch)
        );

        let forged = token.replacen("2000", "9000", 1);
        assert_eq!(
            SessionToken::verify_at(&forged, KEY, 1_000),
            Err(TokenError::SignatureMismatch)
        );
    }

    #[test]
    fn test_expired_token() {
        let claims = SessionToken {
            user_id: Uuid::from_u128(0x1234),
            expires_at: 2_000,
        };
        let token = claims.sign(KEY);
        assert_eq!(
            SessionToken::verify_at(&token, KEY, 2_000),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(
            SessionToken::verify_at("garbage", KEY, 0),
            Err(TokenError::InvalidFormat)
        );
        assert_eq!(
            SessionToken::verify_at("not-a-uuid.5.abc", KEY, 0),
            Err(TokenError::InvalidFormat)
        );
        let id = Uuid::nil();
        assert_eq!(
            SessionToken::verify_at(&format!("{id}.5.!!!"), KEY, 0),
            Err(TokenError::InvalidBase64)
        );
    }

    #[test]
    fn test_strip_bearer() {
        assert_eq!(strip_bearer("Bearer abc"), Some("abc"));
        assert_eq!(strip_bearer("Bearer "), None);
        assert_eq!(strip_bearer("Basic abc"), None);
    }
}
