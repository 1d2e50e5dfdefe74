//! Role and ownership checks.

use crate::entities::UserRole;
use crate::entities::event::Event;
use thiserror::Error;
use uuid::Uuid;

/// Roles allowed to book tickets.
pub const ATTENDEE: &[UserRole] = &[UserRole::User];

/// Roles allowed to create and manage events.
pub const EVENT_MANAGERS: &[UserRole] = &[UserRole::Organizer, UserRole::Admin];

/// The authenticated user behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: Uuid,
    pub role: UserRole,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("role {role} is not allowed to perform this action")]
    Forbidden { role: UserRole },

    #[error("only the event's organizer or an admin may change it")]
    NotOwner,
}

/// Succeeds when `role` is one of `required`.
pub fn authorize(required: &[UserRole], role: UserRole) -> Result<(), AccessError> {
    if required.contains(&role) {
        Ok(())
    } else {
        Err(AccessError::Forbidden { role })
    }
}

/// Admins may change any event, organizers only their own.
pub fn ensure_owner_or_admin(event: &Event, caller: &Caller) -> Result<(), AccessError> {
    if caller.role == UserRole::Admin || event.organizer == caller.id {
        Ok(())
    } else {
        Err(AccessError::NotOwner)
    }
}
