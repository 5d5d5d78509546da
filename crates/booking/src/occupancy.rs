use std::collections::BTreeSet;

use serde::Serialize;

use crate::TimeSlot;

/// Times of day already claimed by a pending or approved appointment.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Occupancy(BTreeSet<TimeSlot>);

impl Occupancy {
    pub fn is_taken(&self, slot: TimeSlot) -> bool {
        self.0.contains(&slot)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TimeSlot> for Occupancy {
    fn from_iter<T: IntoIterator<Item = TimeSlot>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    pub time: TimeSlot,
    pub available: bool,
}

pub fn day_schedule(slots: &[TimeSlot], occupancy: &Occupancy) -> Vec<SlotAvailability> {
    slots
        .iter()
        .map(|time| SlotAvailability {
            time: *time,
            available: !occupancy.is_taken(*time),
        })
        .collect()
}
