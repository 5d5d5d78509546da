use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Statuses that still claim their slot.
    pub const ACTIVE: [AppointmentStatus; 2] = [Self::Pending, Self::Approved];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }

    pub fn blocks_slot(&self) -> bool {
        !self.is_terminal()
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved)
                | (Self::Pending, Self::Rejected)
                | (Self::Pending, Self::Cancelled)
                | (Self::Approved, Self::Completed)
                | (Self::Approved, Self::Cancelled)
        )
    }
}
