pub mod auth;
pub mod booking;
pub mod event;
pub mod stats;
pub mod ws;

pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse, UserRole};
pub use booking::{BookingResponse, BookingStatus, CreateBookingRequest};
pub use event::{
    CreateEventRequest, DeletedEventResponse, EventCategory, EventResponse, OrganizerSummary,
    UpdateEventRequest,
};
pub use stats::{CategoryCount, DailySales, OrganizerStatsResponse};

use serde::{Deserialize, Serialize};

/// JSON body returned alongside every non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
