pub mod booking;
pub mod event;
pub mod user;

use evtix_sdk::objects::{
    BookingStatus as SdkBookingStatus, EventCategory as SdkEventCategory, UserRole as SdkUserRole,
};

/// Event category for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `evtix_sdk::objects::EventCategory`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, sqlx::Type)]
#[sqlx(type_name = "event_category")]
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

impl From<EventCategory> for SdkEventCategory {
    fn from(value: EventCategory) -> Self {
        match value {
            EventCategory::Music => SdkEventCategory::Music,
            EventCategory::Technology => SdkEventCategory::Technology,
            EventCategory::Sports => SdkEventCategory::Sports,
            EventCategory::Business => SdkEventCategory::Business,
            EventCategory::Arts => SdkEventCategory::Arts,
            EventCategory::Education => SdkEventCategory::Education,
            EventCategory::Social => SdkEventCategory::Social,
            EventCategory::Other => SdkEventCategory::Other,
        }
    }
}

impl From<SdkEventCategory> for EventCategory {
    fn from(value: SdkEventCategory) -> Self {
        match value {
            SdkEventCategory::Music => EventCategory::Music,
            SdkEventCategory::Technology => EventCategory::Technology,
            SdkEventCategory::Sports => EventCategory::Sports,
            SdkEventCategory::Business => EventCategory::Business,
            SdkEventCategory::Arts => EventCategory::Arts,
            SdkEventCategory::Education => EventCategory::Education,
            SdkEventCategory::Social => EventCategory::Social,
            SdkEventCategory::Other => EventCategory::Other,
        }
    }
}

/// Booking status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `evtix_sdk::objects::BookingStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "booking_status")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl From<BookingStatus> for SdkBookingStatus {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Pending => SdkBookingStatus::Pending,
            BookingStatus::Confirmed => SdkBookingStatus::Confirmed,
            BookingStatus::Cancelled => SdkBookingStatus::Cancelled,
        }
    }
}

/// Caller role for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see `evtix_sdk::objects::UserRole`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "user_role")]
pub enum UserRole {
    User,
    Organizer,
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        SdkUserRole::from(*self).fmt(f)
    }
}

impl From<UserRole> for SdkUserRole {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::User => SdkUserRole::User,
            UserRole::Organizer => SdkUserRole::Organizer,
            UserRole::Admin => SdkUserRole::Admin,
        }
    }
}

impl From<SdkUserRole> for UserRole {
    fn from(value: SdkUserRole) -> Self {
        match value {
            SdkUserRole::User => UserRole::User,
            SdkUserRole::Organizer => UserRole::Organizer,
            SdkUserRole::Admin => UserRole::Admin,
        }
    }
}
