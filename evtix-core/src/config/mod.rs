//! Configuration types for the ticketing backend.
//!
//! These types represent the validated runtime configuration used by the
//! services and can be shared across crates. Loading and parsing the TOML
//! file is handled by the server crate.

mod auth;
mod booking;
mod config_store;
mod server;

pub use auth::AuthConfig;
pub use booking::BookingConfig;
pub use config_store::ConfigStore;
pub use server::ServerConfig;

/// Shared configuration state with a separate store for each section.
///
/// Sections are read and replaced independently, so a SIGHUP reload of one
/// never blocks readers of another.
#[derive(Clone)]
pub struct SharedConfig {
    /// Listen address and CORS origins.
    pub server: ConfigStore<ServerConfig>,
    /// Session token signing.
    pub auth: ConfigStore<AuthConfig>,
    /// Booking confirmation behaviour.
    pub booking: ConfigStore<BookingConfig>,
}

impl SharedConfig {
    pub fn new(server: ServerConfig, auth: AuthConfig, booking: BookingConfig) -> Self {
        Self {
            server: ConfigStore::new(server),
            auth: ConfigStore::new(auth),
            booking: ConfigStore::new(booking),
        }
    }
}
