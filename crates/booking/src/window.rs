use serde::{Deserialize, Serialize};

use crate::{TimeSlot, generate_slots};

/// Working hours of an owner and the length of one session in minutes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingWindow {
    pub start_hour: u8,
    pub end_hour: u8,
    pub session_duration: u16,
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            session_duration: 45,
        }
    }
}

impl BookingWindow {
    pub const MIN_SESSION_DURATION: u16 = 5;
    pub const MAX_SESSION_DURATION: u16 = 480;

    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour
            && self.end_hour <= 24
            && (Self::MIN_SESSION_DURATION..=Self::MAX_SESSION_DURATION)
                .contains(&self.session_duration)
    }

    pub fn slots(&self) -> Vec<TimeSlot> {
        generate_slots(
            self.start_hour.into(),
            self.end_hour.into(),
            self.session_duration.into(),
        )
    }
}
