//! Session token configuration.

/// Key material and lifetime for session tokens.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Secret key bytes for HMAC signing.
    pub token_secret: Box<[u8]>,
    /// Seconds a freshly issued token stays valid.
    pub token_ttl_secs: i64,
}

impl AuthConfig {
    pub fn new(token_secret: impl Into<Box<[u8]>>, token_ttl_secs: i64) -> Self {
        Self {
            token_secret: token_secret.into(),
            token_ttl_secs,
        }
    }

    /// Get the secret key bytes for HMAC signing.
    pub fn secret_bytes(&self) -> &[u8] {
        &self.token_secret
    }
}
