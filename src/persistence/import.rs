use super::codec::{
    format_day, parse_day, KEY_LAST_COMPLETION, KEY_LAST_RECURRING_CHECK, KEY_MOOD, KEY_NOTES,
    KEY_STREAK, KEY_TASKS, KEY_THEME, KEY_VIBE,
};
use super::store::KeyValueStore;
use crate::domain::{Mood, Priority, RecurringType, Task, TaskId, Theme, Vibe};
use crate::logging;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

/// Prefix the browser version put in front of every localStorage key
pub const LEGACY_PREFIX: &str = "kadamsplanner";

/// What an import brought over
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub tasks: usize,
    pub skipped_tasks: usize,
    pub keys: Vec<&'static str>,
}

/// Task as the browser version stored it
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyTask {
    #[serde(default)]
    text: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    recurring: bool,
    #[serde(default)]
    recurring_type: Option<String>,
    #[serde(default)]
    created_date: Option<String>,
}

impl LegacyTask {
    fn into_task(self, fallback_day: NaiveDate) -> Option<Task> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }

        let recurring_type = self.recurring_type.as_deref().and_then(RecurringType::parse);
        Some(Task {
            id: TaskId::new(),
            text: text.to_string(),
            completed: self.completed,
            priority: self
                .priority
                .as_deref()
                .and_then(Priority::parse)
                .unwrap_or_default(),
            recurring: self.recurring,
            recurring_type: if self.recurring { recurring_type } else { None },
            created_date: self
                .created_date
                .as_deref()
                .and_then(parse_day)
                .unwrap_or(fallback_day),
        })
    }
}

/// localStorage values are strings; a hand-made dump may inline them instead
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn legacy<'a>(dump: &'a serde_json::Map<String, Value>, suffix: &str) -> Option<&'a Value> {
    dump.get(&format!("{}{}", LEGACY_PREFIX, suffix))
}

fn decode_legacy_tasks(value: &Value, today: NaiveDate) -> Result<(Vec<Task>, usize)> {
    let raw: Vec<LegacyTask> = match value {
        Value::String(s) => serde_json::from_str(s).context("Stored task list is not valid JSON")?,
        other => serde_json::from_value(other.clone()).context("Task list has an unexpected shape")?,
    };

    let total = raw.len();
    let tasks: Vec<Task> = raw.into_iter().filter_map(|t| t.into_task(today)).collect();
    let skipped = total - tasks.len();
    Ok((tasks, skipped))
}

/// Import a browser localStorage dump (a JSON object keyed by the old key names).
///
/// Keys present in the dump overwrite the stored values; keys missing from it
/// are left alone. Task ids are regenerated.
pub fn import_browser_dump(
    store: &mut dyn KeyValueStore,
    dump_json: &str,
    today: NaiveDate,
) -> Result<ImportSummary> {
    let root: Value = serde_json::from_str(dump_json).context("Import file is not valid JSON")?;
    let dump = root
        .as_object()
        .context("Import file must contain a JSON object of storage keys")?;

    let mut summary = ImportSummary::default();

    if let Some(value) = legacy(dump, "Tasks") {
        let (tasks, skipped) = decode_legacy_tasks(value, today)?;
        let json = serde_json::to_string(&tasks)?;
        store.set(KEY_TASKS, &json)?;
        summary.tasks = tasks.len();
        summary.skipped_tasks = skipped;
        summary.keys.push(KEY_TASKS);
    }

    if let Some(notes) = legacy(dump, "Notes").and_then(as_text) {
        store.set(KEY_NOTES, &notes)?;
        summary.keys.push(KEY_NOTES);
    }

    if let Some(vibe) = legacy(dump, "Vibe").and_then(as_text).and_then(|v| Vibe::parse(&v)) {
        store.set(KEY_VIBE, vibe.as_str())?;
        summary.keys.push(KEY_VIBE);
    }

    if let Some(value) = legacy(dump, "Mood") {
        match as_text(value).and_then(|m| Mood::parse(&m)) {
            Some(mood) => store.set(KEY_MOOD, mood.as_str())?,
            None => store.remove(KEY_MOOD)?,
        }
        summary.keys.push(KEY_MOOD);
    }

    if let Some(theme) = legacy(dump, "Theme").and_then(as_text).and_then(|t| Theme::parse(&t)) {
        store.set(KEY_THEME, theme.as_str())?;
        summary.keys.push(KEY_THEME);
    }

    if let Some(streak) = legacy(dump, "Streak")
        .and_then(as_text)
        .and_then(|s| s.trim().parse::<u32>().ok())
    {
        store.set(KEY_STREAK, &streak.to_string())?;
        summary.keys.push(KEY_STREAK);
    }

    if let Some(day) = legacy(dump, "LastDate").and_then(as_text).and_then(|d| parse_day(&d)) {
        store.set(KEY_LAST_COMPLETION, &format_day(day))?;
        summary.keys.push(KEY_LAST_COMPLETION);
    }

    if let Some(day) = legacy(dump, "LastRecurringCheck")
        .and_then(as_text)
        .and_then(|d| parse_day(&d))
    {
        store.set(KEY_LAST_RECURRING_CHECK, &format_day(day))?;
        summary.keys.push(KEY_LAST_RECURRING_CHECK);
    }

    logging::info(&format!(
        "Imported {} task(s) ({} skipped), keys: {}",
        summary.tasks,
        summary.skipped_tasks,
        summary.keys.join(", ")
    ));

    Ok(summary)
}
