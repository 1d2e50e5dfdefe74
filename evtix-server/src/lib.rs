//! HTTP and WebSocket surface of the evtix ticketing backend.

pub mod api;
pub mod config;
pub mod server;
pub mod shutdown;
pub mod state;
