//! Organizer dashboard statistics.

use serde::{Deserialize, Serialize};

use super::event::EventCategory;

/// Revenue booked on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySales {
    pub date: time::Date,
    pub amount: rust_decimal::Decimal,
}

/// Tickets sold across all of an organizer's events in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: EventCategory,
    pub count: i64,
}

/// Response body for `GET /bookings/organizer-stats`.
///
/// `sales_volume` always holds one entry per day of the trailing window,
/// oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizerStatsResponse {
    pub sales_volume: Vec<DailySales>,
    pub category_distribution: Vec<CategoryCount>,
}
