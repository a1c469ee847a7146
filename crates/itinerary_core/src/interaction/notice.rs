//! Transient status messages.
//!
//! A notice is considered cleared once its time-to-live elapses; nothing has
//! to run at expiry time.

use std::time::{Duration, Instant};

pub const CAPACITY_NOTICE_TTL: Duration = Duration::from_millis(2_500);
pub const IMPORT_NOTICE_TTL: Duration = Duration::from_millis(2_500);
pub const SERVICE_SUGGESTION_NOTICE_TTL: Duration = Duration::from_millis(2_500);
pub const FALLBACK_SUGGESTION_NOTICE_TTL: Duration = Duration::from_millis(3_500);
pub const COPY_NOTICE_TTL: Duration = Duration::from_millis(1_800);

pub const CAPACITY_MESSAGE: &str = "Each day is limited to 10 activities.";
pub const IMPORT_SUCCESS_MESSAGE: &str = "Itinerary imported successfully.";
pub const SERVICE_SUGGESTION_MESSAGE: &str = "Suggestions added (from server).";
pub const FALLBACK_SUGGESTION_MESSAGE: &str =
    "Suggestions added (local fallback). Configure a suggestion endpoint to use a real service.";
pub const COPY_DAY_MESSAGE: &str = "Day copied as JSON.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Warning,
}

/// Non-blocking message with a fixed lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
    pub issued_at: Instant,
    pub ttl: Duration,
}

impl Notice {
    pub fn new(text: impl Into<String>, kind: NoticeKind, ttl: Duration) -> Self {
        Self::issued_at(text, kind, ttl, Instant::now())
    }

    pub fn issued_at(
        text: impl Into<String>,
        kind: NoticeKind,
        ttl: Duration,
        issued_at: Instant,
    ) -> Self {
        Self {
            text: text.into(),
            kind,
            issued_at,
            ttl,
        }
    }

    /// Whether the notice is still visible at `now`.
    pub fn is_active_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.issued_at) < self.ttl
    }
}
