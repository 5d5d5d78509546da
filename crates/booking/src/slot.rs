use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::BookingWindow;

#[derive(Debug, thiserror::Error)]
#[error("invalid time `{0}`, expected HH:MM")]
pub struct ParseTimeSlotError(String);

/// Wall-clock start of a session, minute precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    minutes: u16,
}

impl TimeSlot {
    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }

        Some(Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    pub fn hour(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    /// Minutes since midnight.
    pub fn minutes(&self) -> u16 {
        self.minutes
    }

    pub fn to_time(&self) -> time::Time {
        time::Time::from_hms(self.hour(), self.minute(), 0).unwrap_or(time::Time::MIDNIGHT)
    }
}

impl From<time::Time> for TimeSlot {
    fn from(value: time::Time) -> Self {
        Self {
            minutes: u16::from(value.hour()) * 60 + u16::from(value.minute()),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeSlot {
    type Err = ParseTimeSlotError;

    /// Accepts `HH:MM` and `HH:MM:SS`; seconds are dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseTimeSlotError(s.to_owned());

        let parts = s
            .trim()
            .split(':')
            .map(|part| part.parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>, _>>()?;

        match parts[..] {
            [hour, minute] => Self::new(hour, minute).ok_or_else(invalid),
            [hour, minute, second] if second < 60 => Self::new(hour, minute).ok_or_else(invalid),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = ParseTimeSlotError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(value: TimeSlot) -> Self {
        value.to_string()
    }
}

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Session start times of a working day.
///
/// Starts at `start_hour:00` and keeps adding `duration` minutes while the
/// session still ends by `end_hour:00`. A duration outside one minute to a
/// full day, or an hour outside `0..=24`, falls back to
/// [`BookingWindow::default`].
pub fn generate_slots(start_hour: i64, end_hour: i64, duration: i64) -> Vec<TimeSlot> {
    let hours = 0..=24;

    let (start_hour, end_hour, duration) =
        if !(1..=MINUTES_PER_DAY).contains(&duration)
            || !hours.contains(&start_hour)
            || !hours.contains(&end_hour)
        {
            tracing::warn!(
                start_hour,
                end_hour,
                duration,
                "invalid booking window, using default"
            );

            let window = BookingWindow::default();
            (
                i64::from(window.start_hour),
                i64::from(window.end_hour),
                i64::from(window.session_duration),
            )
        } else {
            (start_hour, end_hour, duration)
        };

    let end = end_hour * 60;
    let mut current = start_hour * 60;
    let mut slots = vec![];

    while current + duration <= end {
        slots.push(TimeSlot {
            minutes: current as u16,
        });
        current += duration;
    }

    slots
}

pub fn find_slot_index(time: TimeSlot, slots: &[TimeSlot]) -> Option<usize> {
    slots.iter().position(|slot| *slot == time)
}

/// Exact match, otherwise the slot nearest in minutes (earliest on a tie).
pub fn find_closest_slot_index(time: TimeSlot, slots: &[TimeSlot]) -> Option<usize> {
    if let Some(index) = find_slot_index(time, slots) {
        return Some(index);
    }

    slots
        .iter()
        .enumerate()
        .min_by_key(|(_, slot)| slot.minutes().abs_diff(time.minutes()))
        .map(|(index, _)| index)
}
