//! Ticket booking: the capacity-safe reservation flow, its confirmation
//! step, and the organizer dashboard aggregates.

mod confirmation;
mod service;
mod stats;

pub use confirmation::{AutoConfirm, BookingDraft, ConfirmationMode, ConfirmationStep, HoldForPayment};
pub use service::{BookingError, BookingService, BookingWithEvent};
pub use stats::{OrganizerStats, STATS_WINDOW_DAYS, aggregate_organizer_stats};
