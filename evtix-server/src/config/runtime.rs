//! Runtime configuration re-exports.
//!
//! The runtime config types are defined in `evtix-core::config` so the
//! services can read them directly.

pub use evtix_core::config::{AuthConfig, BookingConfig, ServerConfig, SharedConfig};
