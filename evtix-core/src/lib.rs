#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod access;
pub mod accounts;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod events;
pub mod framework;
pub mod store;
pub mod utils;
