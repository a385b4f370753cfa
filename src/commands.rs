use crate::app::AppState;
use crate::config::Config;
use crate::domain::{
    completion_box, format_countdown, format_long_date, priority_badge, Mood, PhaseDurations,
    PlannerState, Priority, RecurringType, TaskDraft, TaskId, Theme, Timer, TimerMode, Vibe,
};
use crate::logging;
use crate::notifications;
use crate::persistence::{
    import_browser_dump, read_file, store_dir, FileStore, ImportSummary, KeyValueStore, MemoryStore,
};
use crate::ticker;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

/// Open the on-disk store and start a session for `today`
pub fn open_session(today: NaiveDate) -> Result<AppState> {
    let config = Config::load()?;
    let store = open_store()?;
    Ok(AppState::open(Box::new(store), config, today))
}

fn open_store() -> Result<FileStore> {
    let dir = store_dir()?;
    let store = FileStore::open(&dir)
        .with_context(|| format!("Failed to open store: {}", dir.display()))?;
    logging::debug(&format!("Using store at {}", store.dir().display()));
    Ok(store)
}

fn save(app: &mut AppState) -> Result<()> {
    app.save().context("Failed to save planner state")
}

/// Find the one task whose id starts with `prefix`
pub fn resolve_task(planner: &PlannerState, prefix: &str) -> Result<TaskId> {
    let prefix = prefix.trim();
    if prefix.is_empty() {
        anyhow::bail!("Task id prefix must not be empty");
    }

    let matches: Vec<TaskId> = planner
        .tasks
        .iter()
        .filter(|t| t.id.matches_prefix(prefix))
        .map(|t| t.id)
        .collect();

    match matches.as_slice() {
        [id] => Ok(*id),
        [] => anyhow::bail!("No task matches id '{}'", prefix),
        _ => anyhow::bail!(
            "Id '{}' matches {} tasks, use more characters",
            prefix,
            matches.len()
        ),
    }
}

/// Adds a new task for today.
pub fn cmd_add(
    app: &mut AppState,
    text: &str,
    priority: Priority,
    recurrence: Option<RecurringType>,
) -> Result<String> {
    let draft = TaskDraft::new(text)
        .with_priority(priority)
        .with_recurrence(recurrence);

    let Some(task) = app.planner.add_task(&draft, app.today) else {
        anyhow::bail!("Task text must not be empty");
    };
    let message = format!("Task added ({}): {}", task.id.short(), task.text);
    logging::info(&format!("Added task '{}' from the command line", task.text));

    save(app)?;
    Ok(message)
}

/// Task list in display order, one line per task
pub fn cmd_list(app: &AppState) -> String {
    if app.planner.tasks.is_empty() {
        return "No tasks for today.".to_string();
    }

    app.planner
        .sorted_for_display()
        .map(|task| {
            let repeat = match task.recurrence() {
                Some(kind) => format!("  ({})", kind),
                None => String::new(),
            };
            format!(
                "{} {} {} {}{}",
                task.id.short(),
                completion_box(task),
                priority_badge(task.priority),
                task.text,
                repeat
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Toggles completion for the task matching `prefix`.
pub fn cmd_toggle(app: &mut AppState, prefix: &str) -> Result<String> {
    let id = resolve_task(&app.planner, prefix)?;
    let completed = app
        .planner
        .toggle_task(id, app.today)
        .context("Task disappeared while toggling")?;
    save(app)?;

    let state = if completed { "done" } else { "not done" };
    Ok(format!(
        "Task {} marked {}. Streak: {} day(s)",
        id.short(),
        state,
        app.planner.streak.count
    ))
}

/// Removes the task matching `prefix`.
pub fn cmd_delete(app: &mut AppState, prefix: &str) -> Result<String> {
    let id = resolve_task(&app.planner, prefix)?;
    let task = app
        .planner
        .delete_task(id)
        .context("Task disappeared while deleting")?;
    save(app)?;
    Ok(format!("Deleted: {}", task.text))
}

pub fn cmd_stats(app: &AppState) -> String {
    let stats = app.stats();
    let mood = match app.planner.mood {
        Some(mood) => format!("{} {}", mood.emoji(), mood),
        None => "not set".to_string(),
    };
    [
        format_long_date(app.today),
        format!(
            "Tasks:    {}/{} done ({}%)",
            stats.completed, stats.total, stats.progress_percent
        ),
        format!("Streak:   {} day(s)", app.planner.streak.count),
        format!("Vibe:     {}", app.planner.vibe.label()),
        format!("Mood:     {}", mood),
        format!("Theme:    {}", app.planner.theme),
    ]
    .join("\n")
}

/// Print the notes, or replace them when `text` is given.
pub fn cmd_notes(app: &mut AppState, text: Option<String>) -> Result<String> {
    match text {
        Some(text) => {
            app.planner.set_notes(text);
            save(app)?;
            Ok("Notes updated.".to_string())
        }
        None if app.planner.notes.is_empty() => Ok("(no notes)".to_string()),
        None => Ok(app.planner.notes.clone()),
    }
}

pub fn cmd_vibe(app: &mut AppState, vibe: Vibe) -> Result<String> {
    app.planner.set_vibe(vibe);
    save(app)?;
    Ok(format!("Vibe set to {}", vibe.label()))
}

/// `raw` is a mood name or "none" to clear it
pub fn cmd_mood(app: &mut AppState, raw: &str) -> Result<String> {
    let mood = if raw.trim().eq_ignore_ascii_case("none") {
        None
    } else {
        Some(raw.parse::<Mood>()?)
    };

    app.planner.set_mood(mood);
    save(app)?;
    Ok(match mood {
        Some(mood) => format!("Mood set to {} {}", mood.emoji(), mood),
        None => "Mood cleared".to_string(),
    })
}

pub fn cmd_theme(app: &mut AppState, theme: Theme) -> Result<String> {
    app.planner.set_theme(theme);
    save(app)?;
    Ok(format!("Theme set to {}", theme))
}

/// Run one phase in the foreground, printing the countdown until it crosses zero.
pub fn cmd_timer(phase: TimerMode, durations: PhaseDurations) -> Result<()> {
    let mut timer = Timer::new(durations);
    timer.select_phase(phase);
    timer.start(Instant::now());
    logging::info(&format!("Foreground {} timer started", phase.label()));

    let mut stdout = io::stdout();
    loop {
        write!(
            stdout,
            "\r{} {}  ",
            phase.label(),
            format_countdown(timer.remaining_secs())
        )?;
        stdout.flush()?;

        let poll = ticker::poll_duration();
        let wait = timer
            .time_until_next_tick(Instant::now())
            .map_or(poll, |next| next.min(poll));
        std::thread::sleep(wait);

        if let Some(change) = timer.advance(Instant::now()) {
            writeln!(stdout, "\r{} {}  ", phase.label(), format_countdown(0))?;
            println!("{}", notifications::phase_finished_message(change.finished));
            notifications::notify_phase_finished(change.finished);
            logging::info(&format!("{} phase finished", change.finished.label()));
            return Ok(());
        }
    }
}

/// Load a browser localStorage dump into `store`
pub fn cmd_import(store: &mut dyn KeyValueStore, path: &Path, today: NaiveDate) -> Result<ImportSummary> {
    if !path.exists() {
        anyhow::bail!("Import file not found: {}", path.display());
    }
    let dump = read_file(path)?;
    let summary = import_browser_dump(store, &dump, today)?;
    logging::info(&format!(
        "Imported {} task(s) and {} key(s) from {}",
        summary.tasks,
        summary.keys.len(),
        path.display()
    ));
    Ok(summary)
}

/// Import into the on-disk store, or into a throwaway one for a dry run
pub fn cmd_import_file(path: &Path, today: NaiveDate, dry_run: bool) -> Result<ImportSummary> {
    if dry_run {
        let mut scratch = MemoryStore::new();
        return cmd_import(&mut scratch, path, today);
    }
    let mut store = open_store()?;
    cmd_import(&mut store, path, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{atomic_write, codec::load_state};
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn test_app() -> AppState {
        AppState::new(
            PlannerState::default(),
            Box::new(MemoryStore::new()),
            Config::default(),
            today(),
        )
    }

    #[test]
    fn test_add_saves_and_lists() {
        let mut app = test_app();
        cmd_add(&mut app, "buy milk", Priority::Low, None).unwrap();
        cmd_add(&mut app, "ship it", Priority::High, Some(RecurringType::Daily)).unwrap();

        let listing = cmd_list(&app);
        let lines: Vec<&str> = listing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("ship it  (daily)"));
        assert!(lines[1].contains("[ ]"));

        let reloaded = load_state(app.store.as_ref(), &Config::default());
        assert_eq!(reloaded.tasks.len(), 2);
    }

    #[test]
    fn test_add_rejects_blank() {
        let mut app = test_app();
        assert!(cmd_add(&mut app, "  ", Priority::Medium, None).is_err());
        assert!(app.planner.tasks.is_empty());
    }

    #[test]
    fn test_resolve_prefix() {
        let mut app = test_app();
        cmd_add(&mut app, "one", Priority::Medium, None).unwrap();
        let id = app.planner.tasks[0].id;

        assert_eq!(resolve_task(&app.planner, &id.short()).unwrap(), id);
        assert!(resolve_task(&app.planner, "").is_err());
        assert!(resolve_task(&app.planner, "zzzz").is_err());
    }

    #[test]
    fn test_ambiguous_prefix_is_error() {
        let mut app = test_app();
        cmd_add(&mut app, "one", Priority::Medium, None).unwrap();
        cmd_add(&mut app, "two", Priority::Medium, None).unwrap();
        app.planner.tasks[0].id =
            serde_json::from_str("\"abcd0000-0000-4000-8000-000000000001\"").unwrap();
        app.planner.tasks[1].id =
            serde_json::from_str("\"abcd0000-0000-4000-8000-000000000002\"").unwrap();

        let err = resolve_task(&app.planner, "abcd").unwrap_err();
        assert!(err.to_string().contains("matches 2 tasks"));
        assert_eq!(
            resolve_task(&app.planner, "abcd0000-0000-4000-8000-000000000002").unwrap(),
            app.planner.tasks[1].id
        );
    }

    #[test]
    fn test_toggle_and_delete() {
        let mut app = test_app();
        cmd_add(&mut app, "stretch", Priority::Medium, None).unwrap();
        let short = app.planner.tasks[0].id.short();

        let message = cmd_toggle(&mut app, &short).unwrap();
        assert!(message.contains("marked done"));
        assert_eq!(app.planner.streak.count, 1);

        cmd_delete(&mut app, &short).unwrap();
        assert!(app.planner.tasks.is_empty());
        assert_eq!(cmd_list(&app), "No tasks for today.");
    }

    #[test]
    fn test_preferences() {
        let mut app = test_app();
        cmd_vibe(&mut app, Vibe::Grind).unwrap();
        cmd_theme(&mut app, Theme::Ocean).unwrap();
        cmd_mood(&mut app, "meh").unwrap();
        assert_eq!(app.planner.mood, Some(Mood::Meh));
        assert!(cmd_mood(&mut app, "ecstatic").is_err());

        cmd_mood(&mut app, "none").unwrap();
        assert_eq!(app.planner.mood, None);

        let stats = cmd_stats(&app);
        assert!(stats.contains("Theme:    ocean"));
        assert!(stats.contains("Mood:     not set"));
    }

    #[test]
    fn test_notes_show_and_set() {
        let mut app = test_app();
        assert_eq!(cmd_notes(&mut app, None).unwrap(), "(no notes)");
        cmd_notes(&mut app, Some("remember keys".to_string())).unwrap();
        assert_eq!(cmd_notes(&mut app, None).unwrap(), "remember keys");
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryStore::new();
        let result = cmd_import(&mut store, &dir.path().join("nope.json"), today());
        assert!(result.is_err());
    }

    #[test]
    fn test_import_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dump.json");
        atomic_write(
            &path,
            r#"{"kadamsplannerTasks": "[{\"text\":\"old task\",\"priority\":\"high\"}]"}"#,
        )
        .unwrap();

        let mut store = MemoryStore::new();
        let summary = cmd_import(&mut store, &path, today()).unwrap();
        assert_eq!(summary.tasks, 1);
        assert_eq!(load_state(&store, &Config::default()).tasks[0].text, "old task");
    }
}
