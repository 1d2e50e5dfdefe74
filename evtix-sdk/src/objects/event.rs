//! Event request and response types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event category for API requests and responses.
///
/// This is the API/DTO version without sqlx::Type.
/// For database operations, use the version in `evtix-core::entities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    Music,
    Technology,
    Sports,
    Business,
    Arts,
    Education,
    Social,
    Other,
}

impl EventCategory {
    pub const ALL: [EventCategory; 8] = [
        EventCategory::Music,
        EventCategory::Technology,
        EventCategory::Sports,
        EventCategory::Business,
        EventCategory::Arts,
        EventCategory::Education,
        EventCategory::Social,
        EventCategory::Other,
    ];
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventCategory::Music => "Music",
            EventCategory::Technology => "Technology",
            EventCategory::Sports => "Sports",
            EventCategory::Business => "Business",
            EventCategory::Arts => "Arts",
            EventCategory::Education => "Education",
            EventCategory::Social => "Social",
            EventCategory::Other => "Other",
        };
        f.write_str(name)
    }
}

/// Public view of the user that owns an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// An event as returned by the events API.
///
/// `O` is the organizer representation: the organizer's id for list
/// endpoints, or an [`OrganizerSummary`] on the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse<O = Uuid> {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: String,
    pub date: time::Date,
    pub time: String,
    pub price: rust_decimal::Decimal,
    pub ticket_limit: i32,
    pub sold_tickets: i32,
    pub remaining_tickets: i32,
    pub image: String,
    pub organizer: O,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Request body for `POST /events`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: String,
    pub category: EventCategory,
    pub location: String,
    pub date: time::Date,
    pub time: String,
    #[serde(default)]
    pub price: rust_decimal::Decimal,
    pub ticket_limit: i32,
    #[serde(default)]
    pub image: Option<String>,
}

/// Request body for `PUT /events/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<EventCategory>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub date: Option<time::Date>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub price: Option<rust_decimal::Decimal>,
    #[serde(default)]
    pub ticket_limit: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Response body for `DELETE /events/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedEventResponse {
    pub id: Uuid,
}
