use super::store::{KeyValueStore, StoreError};
use crate::config::Config;
use crate::domain::{
    run_daily_check, LastCompletion, Mood, PlannerState, RecurrenceCheck, Streak, Task, TaskId,
    Theme, Vibe,
};
use crate::logging;
use chrono::NaiveDate;
use std::collections::HashSet;

pub const KEY_TASKS: &str = "tasks";
pub const KEY_NOTES: &str = "notes";
pub const KEY_VIBE: &str = "vibe";
pub const KEY_MOOD: &str = "mood";
pub const KEY_THEME: &str = "theme";
pub const KEY_STREAK: &str = "streak";
pub const KEY_LAST_COMPLETION: &str = "lastCompletionDate";
pub const KEY_LAST_RECURRING_CHECK: &str = "lastRecurringCheck";

/// Stored calendar-day format
pub const DAY_FORMAT: &str = "%Y-%m-%d";
/// Day format written by the browser version ("Sun Oct 18 2026")
pub const LEGACY_DAY_FORMAT: &str = "%a %b %d %Y";

pub fn format_day(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a stored day in either the current or the legacy format
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DAY_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_DAY_FORMAT))
        .ok()
}

/// Decode the stored task collection. Anything unparseable means "no tasks".
pub fn decode_tasks(raw: &str) -> Vec<Task> {
    match serde_json::from_str::<Vec<Task>>(raw) {
        Ok(tasks) => dedupe_ids(tasks),
        Err(e) => {
            logging::warn(&format!("Ignoring malformed stored tasks: {}", e));
            Vec::new()
        }
    }
}

/// Give any repeated id a fresh one so ids stay unique
fn dedupe_ids(mut tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::new();
    for task in &mut tasks {
        if !seen.insert(task.id) {
            logging::warn(&format!("Duplicate task id {}; assigning a new one", task.id));
            task.id = TaskId::new();
            seen.insert(task.id);
        }
    }
    tasks
}

fn read_key(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            logging::warn(&format!("Could not read '{}', using default: {}", key, e));
            None
        }
    }
}

/// Parse an optional stored value, logging and dropping anything invalid
fn read_parsed<T>(store: &dyn KeyValueStore, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let raw = read_key(store, key)?;
    let parsed = parse(&raw);
    if parsed.is_none() {
        logging::warn(&format!("Ignoring invalid value for '{}': {:?}", key, raw));
    }
    parsed
}

/// Rebuild planner state from the store, falling back to defaults per key
pub fn load_state(store: &dyn KeyValueStore, config: &Config) -> PlannerState {
    let mut state = PlannerState::new(config.phase_durations());

    if let Some(raw) = read_key(store, KEY_TASKS) {
        state.tasks = decode_tasks(&raw);
    }
    if let Some(notes) = read_key(store, KEY_NOTES) {
        state.notes = notes;
    }
    if let Some(vibe) = read_parsed(store, KEY_VIBE, Vibe::parse) {
        state.vibe = vibe;
    }
    if let Some(theme) = read_parsed(store, KEY_THEME, Theme::parse) {
        state.theme = theme;
    }

    // The browser version stored the literal "null" for an unset mood
    state.mood = match read_key(store, KEY_MOOD) {
        Some(raw) if raw.trim().is_empty() || raw.trim() == "null" => None,
        Some(raw) => {
            let mood = Mood::parse(&raw);
            if mood.is_none() {
                logging::warn(&format!("Ignoring invalid value for '{}': {:?}", KEY_MOOD, raw));
            }
            mood
        }
        None => None,
    };

    let count = read_parsed(store, KEY_STREAK, |s| s.trim().parse::<u32>().ok()).unwrap_or(0);
    // A present but unreadable day still breaks the streak on the next completion
    let last_completion = match read_key(store, KEY_LAST_COMPLETION) {
        None => LastCompletion::Unset,
        Some(raw) => match parse_day(&raw) {
            Some(day) => LastCompletion::Day(day),
            None => {
                logging::warn(&format!(
                    "Unreadable value for '{}': {:?}",
                    KEY_LAST_COMPLETION, raw
                ));
                LastCompletion::Unrecognized
            }
        },
    };
    state.streak = Streak::new(count, last_completion);

    state.last_recurring_check = read_parsed(store, KEY_LAST_RECURRING_CHECK, parse_day);

    state
}

/// Load state and run the daily recurrence pass; saves when the pass ran
pub fn start_session(
    store: &mut dyn KeyValueStore,
    config: &Config,
    today: NaiveDate,
) -> (PlannerState, RecurrenceCheck) {
    let mut state = load_state(&*store, config);
    let check = run_daily_check(&mut state, today, config.weekly_day());

    if let RecurrenceCheck::Ran { added } = check {
        logging::info(&format!("Recurrence pass for {}: {} new task(s)", today, added));
        if let Err(e) = save_state(store, &state) {
            logging::error(&format!("Failed to save after recurrence pass: {}", e));
        }
    }

    (state, check)
}

fn write_optional(store: &mut dyn KeyValueStore, key: &str, value: Option<String>) -> Result<(), StoreError> {
    match value {
        Some(value) => store.set(key, &value),
        None => store.remove(key),
    }
}

/// Mirror every field to its own key.
///
/// Each key is written independently; a failed write is logged and the
/// remaining keys are still attempted. The first error is returned.
pub fn save_state(store: &mut dyn KeyValueStore, state: &PlannerState) -> Result<(), StoreError> {
    let mut first_error: Option<StoreError> = None;
    let mut note = |key: &str, result: Result<(), StoreError>| {
        if let Err(e) = result {
            logging::error(&format!("Failed to persist '{}': {}", key, e));
            if first_error.is_none() {
                first_error = Some(e);
            }
        }
    };

    let tasks = serde_json::to_string(&state.tasks)
        .map_err(StoreError::from)
        .and_then(|json| store.set(KEY_TASKS, &json));
    note(KEY_TASKS, tasks);
    note(KEY_NOTES, store.set(KEY_NOTES, &state.notes));
    note(KEY_VIBE, store.set(KEY_VIBE, state.vibe.as_str()));
    note(
        KEY_MOOD,
        write_optional(store, KEY_MOOD, state.mood.map(|m| m.as_str().to_string())),
    );
    note(KEY_THEME, store.set(KEY_THEME, state.theme.as_str()));
    note(KEY_STREAK, store.set(KEY_STREAK, &state.streak.count.to_string()));
    // An unrecognized value is left as stored
    let last_completion = match state.streak.last_completion {
        LastCompletion::Day(day) => store.set(KEY_LAST_COMPLETION, &format_day(day)),
        LastCompletion::Unset => store.remove(KEY_LAST_COMPLETION),
        LastCompletion::Unrecognized => Ok(()),
    };
    note(KEY_LAST_COMPLETION, last_completion);
    note(
        KEY_LAST_RECURRING_CHECK,
        write_optional(store, KEY_LAST_RECURRING_CHECK, state.last_recurring_check.map(format_day)),
    );

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Priority, RecurringType, TaskDraft};
    use crate::persistence::MemoryStore;
    use chrono::Duration;
    use pretty_assertions::assert_eq;
    use std::io;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    /// Accepts reads, refuses writes to one key
    struct StubbornStore {
        inner: MemoryStore,
        broken_key: &'static str,
    }

    impl KeyValueStore for StubbornStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.broken_key {
                return Err(StoreError::Write {
                    key: key.to_string(),
                    source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                });
            }
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn test_empty_store_gives_defaults() {
        let store = MemoryStore::new();
        let state = load_state(&store, &Config::default());

        assert!(state.tasks.is_empty());
        assert_eq!(state.vibe, Vibe::Focus);
        assert_eq!(state.theme, Theme::Warm);
        assert_eq!(state.mood, None);
        assert_eq!(state.streak, Streak::default());
        assert_eq!(state.timer.remaining_secs(), 1500);
        assert_eq!(state.last_recurring_check, None);
    }

    #[test]
    fn test_save_then_load_restores_fields() {
        let mut state = PlannerState::default();
        state.add_task(
            &TaskDraft::new("stretch")
                .with_priority(Priority::High)
                .with_recurrence(Some(RecurringType::Daily)),
            today(),
        );
        state.set_notes("line one\nline two");
        state.set_vibe(Vibe::Chill);
        state.set_mood(Some(Mood::Meh));
        state.set_theme(Theme::Sunset);
        state.streak = Streak::new(9, Some(today()));
        state.last_recurring_check = Some(today());

        let mut store = MemoryStore::new();
        save_state(&mut store, &state).unwrap();
        assert_eq!(store.get(KEY_STREAK).unwrap().as_deref(), Some("9"));
        assert_eq!(store.get(KEY_LAST_COMPLETION).unwrap().as_deref(), Some("2026-10-18"));

        let loaded = load_state(&store, &Config::default());
        assert_eq!(loaded.tasks, state.tasks);
        assert_eq!(loaded.notes, state.notes);
        assert_eq!(loaded.vibe, Vibe::Chill);
        assert_eq!(loaded.mood, Some(Mood::Meh));
        assert_eq!(loaded.theme, Theme::Sunset);
        assert_eq!(loaded.streak, state.streak);
        assert_eq!(loaded.last_recurring_check, Some(today()));
    }

    #[test]
    fn test_unset_mood_removes_key() {
        let mut store = MemoryStore::new();
        store.set(KEY_MOOD, "good").unwrap();

        let state = PlannerState::default();
        save_state(&mut store, &state).unwrap();
        assert_eq!(store.get(KEY_MOOD).unwrap(), None);
    }

    #[test]
    fn test_malformed_tasks_mean_no_tasks() {
        let mut store = MemoryStore::new();
        store.set(KEY_TASKS, "{not json").unwrap();
        store.set(KEY_NOTES, "still here").unwrap();

        let state = load_state(&store, &Config::default());
        assert!(state.tasks.is_empty());
        assert_eq!(state.notes, "still here");
    }

    #[test]
    fn test_invalid_scalars_fall_back() {
        let mut store = MemoryStore::new();
        store.set(KEY_VIBE, "sleepy").unwrap();
        store.set(KEY_THEME, "neon").unwrap();
        store.set(KEY_MOOD, "null").unwrap();
        store.set(KEY_STREAK, "lots").unwrap();
        store.set(KEY_LAST_COMPLETION, "someday").unwrap();

        let state = load_state(&store, &Config::default());
        assert_eq!(state.vibe, Vibe::Focus);
        assert_eq!(state.theme, Theme::Warm);
        assert_eq!(state.mood, None);
        assert_eq!(state.streak, Streak::new(0, LastCompletion::Unrecognized));
    }

    #[test]
    fn test_unreadable_last_completion_restarts_streak() {
        let mut store = MemoryStore::new();
        store.set(KEY_STREAK, "5").unwrap();
        store.set(KEY_LAST_COMPLETION, "not-a-date").unwrap();

        let mut state = load_state(&store, &Config::default());
        assert_eq!(state.streak.count, 5);
        assert_eq!(state.streak.last_completion, LastCompletion::Unrecognized);

        save_state(&mut store, &state).unwrap();
        assert_eq!(
            store.get(KEY_LAST_COMPLETION).unwrap().as_deref(),
            Some("not-a-date")
        );

        state.record_completion_today(today());
        assert_eq!(state.streak, Streak::new(1, Some(today())));
    }

    #[test]
    fn test_legacy_day_format() {
        assert_eq!(parse_day("Sun Oct 18 2026"), Some(today()));
        assert_eq!(parse_day("2026-10-18"), Some(today()));
        assert_eq!(parse_day("18/10/2026"), None);
    }

    #[test]
    fn test_duplicate_ids_are_reassigned() {
        let task = Task::new("a", Priority::Low, None, today()).unwrap();
        let mut twin = task.clone();
        twin.text = "b".to_string();
        let json = serde_json::to_string(&vec![task.clone(), twin]).unwrap();

        let tasks = decode_tasks(&json);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, task.id);
        assert_ne!(tasks[1].id, task.id);
    }

    #[test]
    fn test_start_session_runs_recurrence_once() {
        let yesterday = today() - Duration::days(1);
        let mut seed = PlannerState::default();
        seed.add_task(
            &TaskDraft::new("floss").with_recurrence(Some(RecurringType::Daily)),
            yesterday,
        );
        seed.last_recurring_check = Some(yesterday);

        let mut store = MemoryStore::new();
        save_state(&mut store, &seed).unwrap();

        let (state, check) = start_session(&mut store, &Config::default(), today());
        assert_eq!(check, RecurrenceCheck::Ran { added: 1 });
        assert_eq!(state.tasks.len(), 2);
        assert_eq!(store.get(KEY_LAST_RECURRING_CHECK).unwrap().as_deref(), Some("2026-10-18"));

        let (again, check) = start_session(&mut store, &Config::default(), today());
        assert_eq!(check, RecurrenceCheck::AlreadyRan);
        assert_eq!(again.tasks.len(), 2);
    }

    #[test]
    fn test_failed_key_does_not_block_others() {
        let mut store = StubbornStore {
            inner: MemoryStore::new(),
            broken_key: KEY_NOTES,
        };
        let mut state = PlannerState::default();
        state.set_notes("lost");
        state.set_theme(Theme::Ocean);

        let result = save_state(&mut store, &state);
        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert_eq!(store.get(KEY_THEME).unwrap().as_deref(), Some("ocean"));
        assert_eq!(store.get(KEY_NOTES).unwrap(), None);
    }
}
