use itinerary_core::{
    ActivityPatch, ActivityValidationError, EditorConfig, ItemId, ItineraryStorage, ItineraryStore,
    MemorySlotStorage, MutationOutcome, NoticeKind, Prompter, MAX_ACTIVITIES_PER_DAY,
    REMOVE_DAY_PROMPT,
};
use std::cell::RefCell;
use std::time::{Duration, Instant};

#[derive(Default)]
struct ScriptedPrompter {
    answer: bool,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_string());
        self.answer
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

fn open_store(prompter: &ScriptedPrompter) -> (TestStore<'_>, MemorySlotStorage) {
    let storage = MemorySlotStorage::new();
    let store = ItineraryStore::open(storage.clone(), prompter, EditorConfig::default());
    (store, storage)
}

type TestStore<'p> = ItineraryStore<MemorySlotStorage, &'p ScriptedPrompter>;

fn activity_count(store: &TestStore<'_>, day: usize) -> usize {
    store.itinerary().day(day).unwrap().activities.len()
}

fn activity_ids(store: &TestStore<'_>, day: usize) -> Vec<ItemId> {
    store
        .itinerary()
        .day(day)
        .unwrap()
        .activities
        .iter()
        .map(|activity| activity.id.clone())
        .collect()
}

#[test]
fn open_without_slot_starts_with_one_day_and_persists_it() {
    let prompter = ScriptedPrompter::answering(true);
    let (store, storage) = open_store(&prompter);

    let day = store.selected_day().expect("starter day should be selected");
    assert_eq!(store.itinerary().len(), 1);
    assert_eq!(day.date, "Day 1");
    assert_eq!(day.activities.len(), 1);
    assert_eq!(storage.load().as_ref(), Some(store.itinerary()));
}

#[test]
fn open_with_corrupt_slot_falls_back_to_fresh_itinerary() {
    let storage = MemorySlotStorage::with_raw(r#"{"days": "broken"#);
    let prompter = ScriptedPrompter::answering(true);
    let store = ItineraryStore::open(storage, &prompter, EditorConfig::default());

    assert_eq!(store.itinerary().len(), 1);
    assert_eq!(store.itinerary().day(0).unwrap().date, "Day 1");
}

#[test]
fn add_day_labels_by_count_and_selects_new_day() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);

    assert_eq!(store.add_day(), 1);
    assert_eq!(store.add_day(), 2);

    assert_eq!(store.selected_index(), 2);
    assert_eq!(store.selected_day().unwrap().date, "Day 3");
    assert_eq!(store.selected_day().unwrap().activities.len(), 1);
}

#[test]
fn add_activity_never_exceeds_cap_and_eleventh_attempt_is_rejected() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    store.reset_day(0);
    let only = store.itinerary().day(0).unwrap().activities[0].id.clone();
    assert_eq!(store.remove_activity(0, &only), MutationOutcome::Applied);
    assert_eq!(activity_count(&store, 0), 0);

    for _ in 0..MAX_ACTIVITIES_PER_DAY {
        assert_eq!(store.add_activity(0), MutationOutcome::Applied);
    }
    let full = store.snapshot();

    assert_eq!(store.add_activity(0), MutationOutcome::AtCapacity);
    assert_eq!(activity_count(&store, 0), MAX_ACTIVITIES_PER_DAY);
    assert_eq!(store.itinerary(), full.as_ref());

    let notice = store.notice().expect("capacity notice should be raised");
    assert_eq!(notice.text, "Each day is limited to 10 activities.");
    assert_eq!(notice.kind, NoticeKind::Warning);
    assert!(store.active_notice(notice.issued_at).is_some());
    assert!(store
        .active_notice(notice.issued_at + Duration::from_millis(2_500))
        .is_none());
}

#[test]
fn update_activity_merges_patch_fields_only() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, storage) = open_store(&prompter);
    let id = store.itinerary().day(0).unwrap().activities[0].id.clone();

    let patch = ActivityPatch {
        title: Some("Visit Senso-ji".to_string()),
        time_from: Some("09:00".to_string()),
        ..ActivityPatch::default()
    };
    assert_eq!(store.update_activity(0, &id, &patch), Ok(true));

    let notes = ActivityPatch {
        notes: Some("Arrive early\nBring cash".to_string()),
        ..ActivityPatch::default()
    };
    assert_eq!(store.update_activity(0, &id, &notes), Ok(true));

    let activity = &store.itinerary().day(0).unwrap().activities[0];
    assert_eq!(activity.id, id);
    assert_eq!(activity.title, "Visit Senso-ji");
    assert_eq!(activity.time_from, "09:00");
    assert_eq!(activity.time_to, "");
    assert_eq!(activity.notes, "Arrive early\nBring cash");
    assert_eq!(storage.load().as_ref(), Some(store.itinerary()));
}

#[test]
fn update_activity_with_unknown_target_is_noop() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    let before = store.snapshot();
    let id = before.day(0).unwrap().activities[0].id.clone();
    let patch = ActivityPatch {
        title: Some("x".to_string()),
        ..ActivityPatch::default()
    };

    assert_eq!(store.update_activity(3, &id, &patch), Ok(false));
    assert_eq!(
        store.update_activity(0, &ItemId::from("missing"), &patch),
        Ok(false)
    );
    assert_eq!(store.itinerary(), before.as_ref());
}

#[test]
fn update_activity_rejects_malformed_time() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    let id = store.itinerary().day(0).unwrap().activities[0].id.clone();
    let patch = ActivityPatch {
        time_from: Some("7pm".to_string()),
        ..ActivityPatch::default()
    };

    let err = store.update_activity(0, &id, &patch).unwrap_err();
    assert_eq!(
        err,
        ActivityValidationError::InvalidTimeOfDay {
            field: "timeFrom",
            value: "7pm".to_string(),
        }
    );
    assert_eq!(store.itinerary().day(0).unwrap().activities[0].time_from, "");
}

#[test]
fn remove_activity_filters_matching_id_only() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    store.add_activity(0);
    store.add_activity(0);
    let ids = activity_ids(&store, 0);

    assert_eq!(store.remove_activity(0, &ids[1]), MutationOutcome::Applied);
    assert_eq!(store.remove_activity(0, &ids[1]), MutationOutcome::NotFound);

    assert_eq!(activity_ids(&store, 0), vec![ids[0].clone(), ids[2].clone()]);
}

#[test]
fn duplicate_inserts_copy_right_after_source_with_new_id() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    store.add_activity(0);
    store.add_activity(0);
    let source_id = store.itinerary().day(0).unwrap().activities[1].id.clone();
    store
        .update_activity(
            0,
            &source_id,
            &ActivityPatch {
                title: Some("Fushimi Inari".to_string()),
                time_from: Some("06:30".to_string()),
                time_to: Some("08:00".to_string()),
                notes: Some("Hike to the top".to_string()),
                link: Some("https://youtu.be/abc123".to_string()),
            },
        )
        .unwrap();
    let before = store.snapshot().day(0).unwrap().activities.clone();

    assert_eq!(store.duplicate_activity(0, 1), MutationOutcome::Applied);

    let after = &store.itinerary().day(0).unwrap().activities;
    assert_eq!(after.len(), 4);
    assert_eq!(after[0], before[0]);
    assert_eq!(after[1], before[1]);
    assert_eq!(after[3], before[2]);

    let copy = &after[2];
    assert_ne!(copy.id, before[1].id);
    assert_eq!(copy.title, before[1].title);
    assert_eq!(copy.time_from, before[1].time_from);
    assert_eq!(copy.time_to, before[1].time_to);
    assert_eq!(copy.notes, before[1].notes);
    assert_eq!(copy.link, before[1].link);
}

#[test]
fn duplicate_respects_cap_and_missing_source() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    while store.add_activity(0).is_applied() {}
    assert_eq!(activity_count(&store, 0), MAX_ACTIVITIES_PER_DAY);

    assert_eq!(store.duplicate_activity(0, 0), MutationOutcome::AtCapacity);
    assert_eq!(store.duplicate_activity(0, 42), MutationOutcome::NotFound);
    assert_eq!(store.duplicate_activity(9, 0), MutationOutcome::NotFound);
    assert_eq!(activity_count(&store, 0), MAX_ACTIVITIES_PER_DAY);
}

#[test]
fn reset_day_leaves_single_fresh_activity() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    store.add_activity(0);
    store.add_activity(0);
    let old_ids = activity_ids(&store, 0);

    assert_eq!(store.reset_day(0), MutationOutcome::Applied);

    let activities = &store.itinerary().day(0).unwrap().activities;
    assert_eq!(activities.len(), 1);
    assert!(activities[0].title.is_empty());
    assert!(!old_ids.contains(&activities[0].id));
}

#[test]
fn apply_suggestions_appends_min_of_list_and_capacity_in_order() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    for _ in 0..6 {
        store.add_activity(0);
    }
    assert_eq!(activity_count(&store, 0), 7);

    let suggestions: Vec<String> = ["Onsen", "Arcade", "Izakaya", "Karaoke", "Market"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(store.apply_suggestions(0, &suggestions), 3);

    let activities = &store.itinerary().day(0).unwrap().activities;
    assert_eq!(activities.len(), MAX_ACTIVITIES_PER_DAY);
    let titles: Vec<&str> = activities[7..].iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Onsen", "Arcade", "Izakaya"]);
    for added in &activities[7..] {
        assert_eq!(added.time_from, "");
        assert_eq!(added.time_to, "");
        assert_eq!(added.notes, "");
        assert_eq!(added.link, "");
    }

    assert_eq!(store.apply_suggestions(0, &suggestions), 0);
    assert_eq!(activity_count(&store, 0), MAX_ACTIVITIES_PER_DAY);
    assert_eq!(store.apply_suggestions(5, &suggestions), 0);
}

#[test]
fn remove_day_asks_for_confirmation_and_steps_selection_back() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    store.add_day();
    store.add_day();
    assert_eq!(store.selected_index(), 2);

    assert!(store.remove_day(0));
    assert_eq!(prompter.confirms.borrow().as_slice(), [REMOVE_DAY_PROMPT]);
    assert_eq!(store.itinerary().len(), 2);
    assert_eq!(store.selected_index(), 1);
    assert_eq!(store.selected_day().unwrap().date, "Day 3");

    assert!(store.remove_day(1));
    assert_eq!(store.selected_index(), 0);

    assert!(store.remove_day(0));
    assert!(store.itinerary().is_empty());
    assert_eq!(store.selected_index(), 0);
    assert!(store.selected_day().is_none());
    assert!(!store.select_day(0));
}

#[test]
fn remove_day_steps_back_even_when_later_day_is_removed() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    store.add_day();
    store.add_day();
    store.select_day(1);

    assert!(store.remove_day(2));
    assert_eq!(store.selected_index(), 0);
}

#[test]
fn declined_or_out_of_range_remove_day_keeps_state() {
    let prompter = ScriptedPrompter::answering(false);
    let (mut store, _) = open_store(&prompter);
    store.add_day();
    let before = store.snapshot();

    assert!(!store.remove_day(0));
    assert!(!store.remove_day(7));
    assert_eq!(store.itinerary(), before.as_ref());
    assert_eq!(prompter.confirms.borrow().len(), 1);
}

#[test]
fn every_mutation_is_written_to_the_slot() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, storage) = open_store(&prompter);

    store.add_day();
    assert_eq!(storage.load().map(|it| it.len()), Some(2));
    store.add_activity(1);
    assert_eq!(storage.load().as_ref(), Some(store.itinerary()));
    store.reset_day(1);
    assert_eq!(storage.load().as_ref(), Some(store.itinerary()));
}

#[test]
fn failed_slot_writes_do_not_block_editing() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, storage) = open_store(&prompter);
    let persisted = storage.raw();
    storage.set_fail_writes(true);

    assert_eq!(store.add_activity(0), MutationOutcome::Applied);
    assert_eq!(activity_count(&store, 0), 2);
    assert_eq!(storage.raw(), persisted);
    assert!(prompter.alerts.borrow().is_empty());
}

#[test]
fn copy_day_json_renders_single_day_and_raises_notice() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);

    let json = store.copy_day_json(0).expect("day 0 exists");
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["date"], "Day 1");
    assert!(json.contains('\n'), "day JSON should be pretty-printed");
    assert_eq!(store.notice().unwrap().text, "Day copied as JSON.");
    assert!(store
        .active_notice(Instant::now() + Duration::from_secs(2))
        .is_none());

    assert!(store.copy_day_json(4).is_none());
}

#[test]
fn snapshots_handed_out_stay_frozen() {
    let prompter = ScriptedPrompter::answering(true);
    let (mut store, _) = open_store(&prompter);
    let frozen = store.snapshot();

    store.add_day();
    store.add_activity(0);

    assert_eq!(frozen.len(), 1);
    assert_eq!(frozen.day(0).unwrap().activities.len(), 1);
}
