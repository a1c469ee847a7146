//! Day domain model.
//!
//! # Invariants
//! - `activities` keeps insertion order; order drives numbering and duplicate placement.
//! - Growth paths check `has_capacity()` first; decoded documents may still hold more.

use crate::model::activity::Activity;
use crate::model::id::{null_as_fresh_id, ItemId};
use crate::model::null_as_default;
use serde::{Deserialize, Serialize};

/// Upper bound on activities a Day may grow to.
pub const MAX_ACTIVITIES_PER_DAY: usize = 10;

/// One day of the trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    #[serde(default = "ItemId::generate", deserialize_with = "null_as_fresh_id")]
    pub id: ItemId,
    /// Display label, not a validated calendar date.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub activities: Vec<Activity>,
}

impl Day {
    /// Creates the `position`-th day (1-based) with one empty activity.
    pub fn new(position: usize) -> Self {
        Self::labeled(default_label(position))
    }

    /// Creates a day with a caller-provided label and one empty activity.
    pub fn labeled(date: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            date: date.into(),
            activities: vec![Activity::new()],
        }
    }

    pub fn has_capacity(&self) -> bool {
        self.activities.len() < MAX_ACTIVITIES_PER_DAY
    }

    /// Slots left before the cap; zero when already at or past it.
    pub fn remaining_capacity(&self) -> usize {
        MAX_ACTIVITIES_PER_DAY.saturating_sub(self.activities.len())
    }

    pub fn position_of(&self, activity_id: &ItemId) -> Option<usize> {
        self.activities
            .iter()
            .position(|activity| &activity.id == activity_id)
    }

    pub fn activity_mut(&mut self, activity_id: &ItemId) -> Option<&mut Activity> {
        self.activities
            .iter_mut()
            .find(|activity| &activity.id == activity_id)
    }

    /// Label used by day lists, e.g. `3 activities`.
    pub fn summary(&self) -> String {
        format!("{} activities", self.activities.len())
    }
}

/// Default label for the `position`-th day (1-based).
pub fn default_label(position: usize) -> String {
    format!("Day {position}")
}
