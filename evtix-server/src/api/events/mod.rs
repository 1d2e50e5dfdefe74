//! Event catalog handlers.

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod my_events;
pub mod update;
