//! Booking request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Booking status for API responses.
///
/// This is the API/DTO version without sqlx::Type.
/// For database operations, use the version in `evtix-core::entities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Request body for `POST /bookings`.
///
/// `tickets` is signed so that zero and negative counts reach the booking
/// validation instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub event_id: Uuid,
    pub tickets: i64,
}

/// A booking as returned by the bookings API.
///
/// `E` is the event representation: the event id after creation, or the
/// joined event (`null` once deleted) when listing the caller's bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse<E = Uuid> {
    pub id: Uuid,
    pub user: Uuid,
    pub event: E,
    pub tickets: i32,
    pub total_amount: rust_decimal::Decimal,
    pub status: BookingStatus,
    pub payment_id: Option<String>,
    pub created_at: i64,
}
