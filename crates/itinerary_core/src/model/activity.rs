//! Activity domain model.
//!
//! # Responsibility
//! - Define the atomic editable unit of a Day (title, time window, notes, link).
//! - Apply partial-field patches with time-of-day validation.
//!
//! # Invariants
//! - `id` is assigned at creation and never changed by a patch.
//! - `time_from`/`time_to` are empty or `HH:MM`; no ordering between them is enforced.

use crate::model::id::{null_as_fresh_id, ItemId};
use crate::model::null_as_default;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid time-of-day regex"));

const NO_TIME_LABEL: &str = "No time set";
const MISSING_TIME_PLACEHOLDER: &str = "—";

/// One planned event within a Day.
///
/// Every field except `id` defaults to empty when missing or `null` in a
/// decoded document; such an `id` is replaced with a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(default = "ItemId::generate", deserialize_with = "null_as_fresh_id")]
    pub id: ItemId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    /// `HH:MM` or empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_from: String,
    /// `HH:MM` or empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_to: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
    /// Free text, usually a URL. Only probed for video previews.
    #[serde(default, deserialize_with = "null_as_default")]
    pub link: String,
}

/// Partial update for an Activity. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityPatch {
    pub title: Option<String>,
    pub time_from: Option<String>,
    pub time_to: Option<String>,
    pub notes: Option<String>,
    pub link: Option<String>,
}

/// Rejected Activity patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityValidationError {
    InvalidTimeOfDay { field: &'static str, value: String },
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTimeOfDay { field, value } => {
                write!(f, "{field} must be empty or HH:MM, got `{value}`")
            }
        }
    }
}

impl Error for ActivityValidationError {}

impl Activity {
    /// Creates an empty activity with a fresh id.
    pub fn new() -> Self {
        Self::titled("")
    }

    /// Creates an activity with only `title` set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            title: title.into(),
            time_from: String::new(),
            time_to: String::new(),
            notes: String::new(),
            link: String::new(),
        }
    }

    /// Returns a copy of this activity under a fresh id.
    pub fn duplicate(&self) -> Self {
        Self {
            id: ItemId::generate(),
            ..self.clone()
        }
    }

    /// Merges `patch` into this activity.
    ///
    /// The patch is validated as a whole before any field changes, so a
    /// rejected patch leaves the activity untouched.
    pub fn apply(&mut self, patch: &ActivityPatch) -> Result<(), ActivityValidationError> {
        patch.validate()?;

        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(time_from) = &patch.time_from {
            self.time_from.clone_from(time_from);
        }
        if let Some(time_to) = &patch.time_to {
            self.time_to.clone_from(time_to);
        }
        if let Some(notes) = &patch.notes {
            self.notes.clone_from(notes);
        }
        if let Some(link) = &patch.link {
            self.link.clone_from(link);
        }
        Ok(())
    }

    /// Human label for the time window, e.g. `09:00 → —`.
    pub fn time_span_label(&self) -> String {
        if self.time_from.is_empty() && self.time_to.is_empty() {
            return NO_TIME_LABEL.to_string();
        }
        format!(
            "{} → {}",
            non_empty_or(&self.time_from, MISSING_TIME_PLACEHOLDER),
            non_empty_or(&self.time_to, MISSING_TIME_PLACEHOLDER)
        )
    }
}

impl Default for Activity {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.time_from.is_none()
            && self.time_to.is_none()
            && self.notes.is_none()
            && self.link.is_none()
    }

    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        validate_time_of_day("timeFrom", self.time_from.as_deref())?;
        validate_time_of_day("timeTo", self.time_to.as_deref())
    }
}

/// Returns whether `value` is empty or a valid 24h `HH:MM` time.
pub fn is_time_of_day(value: &str) -> bool {
    value.is_empty() || TIME_OF_DAY_RE.is_match(value)
}

fn validate_time_of_day(
    field: &'static str,
    value: Option<&str>,
) -> Result<(), ActivityValidationError> {
    match value {
        Some(value) if !is_time_of_day(value) => Err(ActivityValidationError::InvalidTimeOfDay {
            field,
            value: value.to_string(),
        }),
        _ => Ok(()),
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}
