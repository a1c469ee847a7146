//! Itinerary root aggregate.
//!
//! Serialized transparently as a JSON array of Day objects, which is the shape
//! of both the durable slot and the export document.

use crate::model::day::Day;
use serde::{Deserialize, Serialize};

/// Ordered sequence of Days. Order drives default labels and display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Itinerary {
    days: Vec<Day>,
}

impl Itinerary {
    /// Empty itinerary (zero days).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh itinerary used when nothing is stored yet: one `Day 1`.
    pub fn starter() -> Self {
        Self::from_days(vec![Day::new(1)])
    }

    pub fn from_days(days: Vec<Day>) -> Self {
        Self { days }
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<&Day> {
        self.days.get(index)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub(crate) fn day_mut(&mut self, index: usize) -> Option<&mut Day> {
        self.days.get_mut(index)
    }

    pub(crate) fn push(&mut self, day: Day) {
        self.days.push(day);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Option<Day> {
        (index < self.days.len()).then(|| self.days.remove(index))
    }
}
