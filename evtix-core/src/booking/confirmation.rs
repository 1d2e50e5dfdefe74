use crate::entities::BookingStatus;
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

/// A booking about to be placed, as seen by a [`ConfirmationStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingDraft {
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub tickets: i32,
}

/// Decides the status a new booking starts in.
///
/// Seats are reserved whatever the outcome; a `pending` booking holds its
/// seats until something outside this crate settles it.
#[async_trait]
pub trait ConfirmationStep: Send + Sync {
    async fn initial_status(&self, draft: &BookingDraft) -> BookingStatus;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Confirms every booking immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

#[async_trait]
impl ConfirmationStep for AutoConfirm {
    async fn initial_status(&self, _draft: &BookingDraft) -> BookingStatus {
        BookingStatus::Confirmed
    }

    fn name(&self) -> &'static str {
        "auto"
    }
}

/// Leaves every booking pending, awaiting payment.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoldForPayment;

#[async_trait]
impl ConfirmationStep for HoldForPayment {
    async fn initial_status(&self, _draft: &BookingDraft) -> BookingStatus {
        BookingStatus::Pending
    }

    fn name(&self) -> &'static str {
        "hold"
    }
}

/// Configured choice of [`ConfirmationStep`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationMode {
    #[default]
    Auto,
    Hold,
}

impl ConfirmationMode {
    pub fn step(self) -> &'static dyn ConfirmationStep {
        match self {
            ConfirmationMode::Auto => &AutoConfirm,
            ConfirmationMode::Hold => &HoldForPayment,
        }
    }
}
