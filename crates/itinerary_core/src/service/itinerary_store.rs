//! Itinerary store use-case service.
//!
//! # Responsibility
//! - Own the itinerary snapshot and every mutation of it.
//! - Persist each committed mutation through the injected `ItineraryStorage`.
//! - Track the selected day, the transient notice and the suggestion busy flag.
//!
//! # Invariants
//! - Snapshots are immutable once published; mutations build a new snapshot
//!   and swap it in, so readers holding an `Arc<Itinerary>` never see tearing.
//! - Growth operations never push a Day past `MAX_ACTIVITIES_PER_DAY`.
//! - Invalid indices and ids are silent no-ops, never errors.
//! - Slot write failures are logged and otherwise ignored.

use crate::config::EditorConfig;
use crate::interaction::notice::{
    Notice, NoticeKind, CAPACITY_MESSAGE, CAPACITY_NOTICE_TTL, COPY_DAY_MESSAGE,
    COPY_NOTICE_TTL, FALLBACK_SUGGESTION_MESSAGE, FALLBACK_SUGGESTION_NOTICE_TTL,
    IMPORT_NOTICE_TTL, IMPORT_SUCCESS_MESSAGE, SERVICE_SUGGESTION_MESSAGE,
    SERVICE_SUGGESTION_NOTICE_TTL,
};
use crate::interaction::prompter::Prompter;
use crate::model::activity::{Activity, ActivityPatch, ActivityValidationError};
use crate::model::day::{default_label, Day};
use crate::model::id::ItemId;
use crate::model::itinerary::Itinerary;
use crate::repo::slot_repo::ItineraryStorage;
use crate::suggest::{
    fallback_suggestions, SuggestionProvider, SuggestionRequest, SuggestionResult,
};
use crate::transfer::{self, TransferError, TransferResult};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Confirmation asked before a day is removed.
pub const REMOVE_DAY_PROMPT: &str = "Delete this day?";
const IMPORT_FAILURE_PREFIX: &str = "Failed to import JSON: ";

/// Result of a store mutation that may be refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    Applied,
    /// The target day already holds the maximum number of activities.
    AtCapacity,
    /// Day index or activity id/index did not resolve.
    NotFound,
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Where applied suggestions came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionSource {
    Service,
    LocalFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionOutcome {
    pub source: SuggestionSource,
    /// Activities appended, after truncation to remaining capacity.
    pub added: usize,
}

/// Single-owner itinerary editor state.
pub struct ItineraryStore<S: ItineraryStorage, P: Prompter> {
    snapshot: Arc<Itinerary>,
    selected: usize,
    notice: Option<Notice>,
    suggesting: bool,
    storage: S,
    prompter: P,
    config: EditorConfig,
}

impl<S: ItineraryStorage, P: Prompter> ItineraryStore<S, P> {
    /// Loads the slot, or starts from a one-day itinerary when it is absent
    /// or unreadable. The resulting state is written back immediately.
    pub fn open(storage: S, prompter: P, config: EditorConfig) -> Self {
        let snapshot = match storage.load() {
            Some(itinerary) => {
                info!(
                    "event=store_open module=store status=ok source=slot days={}",
                    itinerary.len()
                );
                itinerary
            }
            None => {
                info!("event=store_open module=store status=ok source=fresh days=1");
                Itinerary::starter()
            }
        };

        let store = Self {
            snapshot: Arc::new(snapshot),
            selected: 0,
            notice: None,
            suggesting: false,
            storage,
            prompter,
            config,
        };
        store.persist("store_open");
        store
    }

    /// Read-only handle to the current snapshot.
    pub fn snapshot(&self) -> Arc<Itinerary> {
        Arc::clone(&self.snapshot)
    }

    pub fn itinerary(&self) -> &Itinerary {
        &self.snapshot
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Currently selected day; `None` on an empty itinerary.
    pub fn selected_day(&self) -> Option<&Day> {
        self.snapshot.day(self.selected)
    }

    /// Selects `index` when it names an existing day.
    pub fn select_day(&mut self, index: usize) -> bool {
        if index >= self.snapshot.len() {
            return false;
        }
        self.selected = index;
        true
    }

    /// Latest notice, expired or not.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Latest notice if it is still within its lifetime at `now`.
    pub fn active_notice(&self, now: Instant) -> Option<&Notice> {
        self.notice
            .as_ref()
            .filter(|notice| notice.is_active_at(now))
    }

    /// True while a suggestion request is outstanding.
    pub fn is_suggesting(&self) -> bool {
        self.suggesting
    }

    /// Appends `Day {n+1}` with one empty activity and selects it.
    pub fn add_day(&mut self) -> usize {
        let index = self.snapshot.len();
        self.commit("day_add", |itinerary| {
            itinerary.push(Day::new(index + 1));
            Some(())
        });
        self.selected = index;
        index
    }

    /// Removes the day at `index` after user confirmation.
    ///
    /// The selection steps back by one regardless of which day was removed.
    pub fn remove_day(&mut self, index: usize) -> bool {
        if index >= self.snapshot.len() {
            return false;
        }
        if !self.prompter.confirm(REMOVE_DAY_PROMPT) {
            info!("event=day_remove module=store status=cancelled day_index={index}");
            return false;
        }

        self.commit("day_remove", |itinerary| itinerary.remove(index).map(|_| ()));
        self.selected = self.selected.saturating_sub(1);
        true
    }

    /// Merges `patch` into the activity `activity_id` of day `day_index`.
    ///
    /// Returns `Ok(false)` when the day or activity does not exist.
    ///
    /// # Errors
    /// - `ActivityValidationError` when a time field is not empty or `HH:MM`.
    pub fn update_activity(
        &mut self,
        day_index: usize,
        activity_id: &ItemId,
        patch: &ActivityPatch,
    ) -> Result<bool, ActivityValidationError> {
        patch.validate()?;
        let exists = self
            .snapshot
            .day(day_index)
            .and_then(|day| day.position_of(activity_id))
            .is_some();
        if !exists {
            return Ok(false);
        }

        let applied = self.commit("activity_update", |itinerary| {
            itinerary
                .day_mut(day_index)?
                .activity_mut(activity_id)?
                .apply(patch)
                .ok()
        });
        Ok(applied.is_some())
    }

    /// Appends an empty activity unless the day is full.
    pub fn add_activity(&mut self, day_index: usize) -> MutationOutcome {
        let Some(day) = self.snapshot.day(day_index) else {
            return MutationOutcome::NotFound;
        };
        if !day.has_capacity() {
            return self.reject_at_capacity("activity_add", day_index);
        }

        self.commit("activity_add", |itinerary| {
            itinerary.day_mut(day_index)?.activities.push(Activity::new());
            Some(())
        });
        MutationOutcome::Applied
    }

    pub fn remove_activity(&mut self, day_index: usize, activity_id: &ItemId) -> MutationOutcome {
        let Some(position) = self
            .snapshot
            .day(day_index)
            .and_then(|day| day.position_of(activity_id))
        else {
            return MutationOutcome::NotFound;
        };

        self.commit("activity_remove", |itinerary| {
            itinerary.day_mut(day_index)?.activities.remove(position);
            Some(())
        });
        MutationOutcome::Applied
    }

    /// Inserts a copy (fresh id) right after the activity at `activity_index`.
    ///
    /// Refused like `add_activity` when the day is full.
    pub fn duplicate_activity(&mut self, day_index: usize, activity_index: usize) -> MutationOutcome {
        let Some(day) = self.snapshot.day(day_index) else {
            return MutationOutcome::NotFound;
        };
        if activity_index >= day.activities.len() {
            return MutationOutcome::NotFound;
        }
        if !day.has_capacity() {
            return self.reject_at_capacity("activity_duplicate", day_index);
        }

        self.commit("activity_duplicate", |itinerary| {
            let activities = &mut itinerary.day_mut(day_index)?.activities;
            let copy = activities.get(activity_index)?.duplicate();
            activities.insert(activity_index + 1, copy);
            Some(())
        });
        MutationOutcome::Applied
    }

    /// Replaces the day's activities with a single empty one.
    pub fn reset_day(&mut self, day_index: usize) -> MutationOutcome {
        let applied = self.commit("day_reset", |itinerary| {
            itinerary.day_mut(day_index)?.activities = vec![Activity::new()];
            Some(())
        });
        match applied {
            Some(()) => MutationOutcome::Applied,
            None => MutationOutcome::NotFound,
        }
    }

    /// Appends one titled activity per suggestion, truncated to the day's
    /// remaining capacity. Returns how many were appended.
    pub fn apply_suggestions(&mut self, day_index: usize, suggestions: &[String]) -> usize {
        let Some(day) = self.snapshot.day(day_index) else {
            return 0;
        };
        let additions: Vec<Activity> = suggestions
            .iter()
            .take(day.remaining_capacity())
            .map(|title| Activity::titled(title.as_str()))
            .collect();
        let added = additions.len();

        self.commit("suggestions_apply", |itinerary| {
            itinerary.day_mut(day_index)?.activities.extend(additions);
            Some(())
        });
        added
    }

    /// Starts a suggestion round for `day_index` and raises the busy flag.
    ///
    /// Returns `None` while another round is outstanding or when the day does
    /// not exist.
    pub fn begin_suggestion(&mut self, day_index: usize) -> Option<SuggestionRequest> {
        if self.suggesting {
            info!("event=suggest module=store status=rejected reason=busy day_index={day_index}");
            return None;
        }
        let day = self.snapshot.day(day_index)?;
        let date = if day.date.trim().is_empty() {
            default_label(day_index + 1)
        } else {
            day.date.clone()
        };
        let request = SuggestionRequest {
            day_index,
            date,
            context: Itinerary::clone(&self.snapshot),
        };

        self.suggesting = true;
        self.notice = None;
        debug!("event=suggest module=store status=start day_index={day_index}");
        Some(request)
    }

    /// Completes a suggestion round and lowers the busy flag.
    ///
    /// Any error substitutes the local fallback list.
    pub fn finish_suggestion(
        &mut self,
        day_index: usize,
        result: SuggestionResult<Vec<String>>,
    ) -> SuggestionOutcome {
        self.suggesting = false;

        let (source, suggestions) = match result {
            Ok(suggestions) => (SuggestionSource::Service, suggestions),
            Err(err) => {
                warn!(
                    "event=suggest module=store status=fallback day_index={day_index} error={err}"
                );
                (
                    SuggestionSource::LocalFallback,
                    fallback_suggestions(self.config.fallback_take),
                )
            }
        };

        let added = self.apply_suggestions(day_index, &suggestions);
        match source {
            SuggestionSource::Service => self.notify(
                SERVICE_SUGGESTION_MESSAGE,
                NoticeKind::Info,
                SERVICE_SUGGESTION_NOTICE_TTL,
            ),
            SuggestionSource::LocalFallback => self.notify(
                FALLBACK_SUGGESTION_MESSAGE,
                NoticeKind::Info,
                FALLBACK_SUGGESTION_NOTICE_TTL,
            ),
        }
        info!(
            "event=suggest module=store status=ok day_index={day_index} source={source:?} added={added}"
        );
        SuggestionOutcome { source, added }
    }

    /// Runs a full suggestion round against `provider`.
    pub fn suggest<Q: SuggestionProvider + ?Sized>(
        &mut self,
        day_index: usize,
        provider: &Q,
    ) -> Option<SuggestionOutcome> {
        let request = self.begin_suggestion(day_index)?;
        let result = provider.suggest(&request);
        Some(self.finish_suggestion(day_index, result))
    }

    /// Pretty-printed export document of the current snapshot.
    pub fn export_json(&self) -> TransferResult<String> {
        transfer::export_pretty(&self.snapshot)
    }

    /// Writes the export document into `dir` under the configured file name.
    pub fn export_to_dir(&self, dir: &Path) -> TransferResult<PathBuf> {
        transfer::write_export_file(dir, &self.config.export_file_name, &self.snapshot)
    }

    /// Replaces the whole itinerary with the decoded `contents`.
    ///
    /// # Errors
    /// - `TransferError::Parse` / `TransferError::InvalidFormat`; the user is
    ///   alerted and the current itinerary is kept.
    pub fn import_json(&mut self, contents: &str) -> TransferResult<()> {
        match transfer::parse_import(contents) {
            Ok(itinerary) => {
                let days = itinerary.len();
                self.install("import", itinerary);
                self.selected = self.selected.min(days.saturating_sub(1));
                self.notify(IMPORT_SUCCESS_MESSAGE, NoticeKind::Info, IMPORT_NOTICE_TTL);
                info!("event=import module=store status=ok days={days}");
                Ok(())
            }
            Err(err) => Err(self.reject_import(err)),
        }
    }

    /// Reads `path` and imports it like `import_json`.
    pub fn import_file(&mut self, path: &Path) -> TransferResult<()> {
        match std::fs::read_to_string(path) {
            Ok(contents) => self.import_json(&contents),
            Err(err) => Err(self.reject_import(err.into())),
        }
    }

    /// Pretty JSON of one day for the clipboard.
    pub fn copy_day_json(&mut self, day_index: usize) -> Option<String> {
        let day = self.snapshot.day(day_index)?;
        let json = transfer::day_pretty(day).ok()?;
        self.notify(COPY_DAY_MESSAGE, NoticeKind::Info, COPY_NOTICE_TTL);
        Some(json)
    }

    fn commit<T>(
        &mut self,
        event: &'static str,
        mutate: impl FnOnce(&mut Itinerary) -> Option<T>,
    ) -> Option<T> {
        let mut next = Itinerary::clone(&self.snapshot);
        let result = mutate(&mut next)?;
        self.install(event, next);
        Some(result)
    }

    fn install(&mut self, event: &'static str, next: Itinerary) {
        self.snapshot = Arc::new(next);
        self.persist(event);
    }

    fn persist(&self, event: &'static str) {
        match self.storage.save(&self.snapshot) {
            Ok(()) => debug!(
                "event={event} module=store status=ok days={}",
                self.snapshot.len()
            ),
            Err(err) => warn!(
                "event={event} module=store status=error error_code=slot_save_failed error={err}"
            ),
        }
    }

    fn notify(&mut self, text: &str, kind: NoticeKind, ttl: std::time::Duration) {
        self.notice = Some(Notice::new(text, kind, ttl));
    }

    fn reject_at_capacity(&mut self, event: &'static str, day_index: usize) -> MutationOutcome {
        info!("event={event} module=store status=rejected reason=capacity day_index={day_index}");
        self.notify(CAPACITY_MESSAGE, NoticeKind::Warning, CAPACITY_NOTICE_TTL);
        MutationOutcome::AtCapacity
    }

    fn reject_import(&self, err: TransferError) -> TransferError {
        warn!("event=import module=store status=error error={err}");
        self.prompter
            .alert(&format!("{IMPORT_FAILURE_PREFIX}{err}"));
        err
    }
}

#[cfg(test)]
mod tests {
    use super::{ItineraryStore, MutationOutcome};
    use crate::config::EditorConfig;
    use crate::interaction::prompter::AutoConfirm;
    use crate::repo::slot_repo::MemorySlotStorage;

    fn store() -> ItineraryStore<MemorySlotStorage, AutoConfirm> {
        ItineraryStore::open(MemorySlotStorage::new(), AutoConfirm, EditorConfig::default())
    }

    #[test]
    fn prior_snapshots_are_not_mutated() {
        let mut store = store();
        let before = store.snapshot();

        assert_eq!(store.add_activity(0), MutationOutcome::Applied);
        assert_eq!(before.day(0).unwrap().activities.len(), 1);
        assert_eq!(store.itinerary().day(0).unwrap().activities.len(), 2);
    }

    #[test]
    fn reset_missing_day_is_not_found_and_keeps_snapshot() {
        let mut store = store();
        let before = store.snapshot();

        assert_eq!(store.reset_day(4), MutationOutcome::NotFound);
        assert!(std::sync::Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn select_day_ignores_out_of_range() {
        let mut store = store();
        store.add_day();
        assert!(store.select_day(0));
        assert!(!store.select_day(2));
        assert_eq!(store.selected_index(), 0);
    }
}
