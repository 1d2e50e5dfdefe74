use crate::booking::ConfirmationMode;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingConfig {
    /// Which confirmation step new bookings pass through.
    pub confirmation: ConfirmationMode,
}
