use crate::domain::{completion_box, format_long_date, PlannerState, Priority, Task};
use crate::persistence::{atomic_write, report_file};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::PathBuf;

fn recurrence_suffix(task: &Task) -> String {
    match task.recurrence() {
        Some(kind) => format!(" _(repeats {})_", kind),
        None => String::new(),
    }
}

/// Render the markdown day summary for `state` as of `date`
pub fn render_report(state: &PlannerState, date: NaiveDate) -> String {
    let stats = state.stats();
    let mut report = String::new();

    // Header
    report.push_str(&format!("# Day Plan - {}\n\n", format_long_date(date)));

    // Summary Section
    report.push_str("## Summary\n\n");
    report.push_str(&format!(
        "- **Tasks:** {} of {} done ({}%)\n",
        stats.completed, stats.total, stats.progress_percent
    ));
    let streak_state = if state.streak.is_active(date) {
        ""
    } else {
        " (not kept up)"
    };
    report.push_str(&format!(
        "- **Streak:** {} day(s){}\n",
        state.streak.count, streak_state
    ));
    report.push_str(&format!("- **Vibe:** {}\n", state.vibe.label()));
    match state.mood {
        Some(mood) => report.push_str(&format!("- **Mood:** {} {}\n", mood.emoji(), mood)),
        None => report.push_str("- **Mood:** not set\n"),
    }
    report.push_str(&format!("- **Theme:** {}\n\n", state.theme));

    // Tasks by priority
    report.push_str("## Tasks\n\n");
    if state.tasks.is_empty() {
        report.push_str("_No tasks._\n\n");
    }
    for priority in Priority::all() {
        let tasks: Vec<&Task> = state
            .sorted_for_display()
            .filter(|t| t.priority == *priority)
            .collect();
        if tasks.is_empty() {
            continue;
        }

        report.push_str(&format!("### {} priority\n\n", capitalize(priority.as_str())));
        for task in tasks {
            report.push_str(&format!(
                "- {} {}{}\n",
                completion_box(task),
                task.text,
                recurrence_suffix(task)
            ));
        }
        report.push('\n');
    }

    // Recurring templates
    let recurring: Vec<&Task> = state.tasks.iter().filter(|t| t.recurrence().is_some()).collect();
    if !recurring.is_empty() {
        report.push_str("## Recurring\n\n");
        let mut seen: Vec<&str> = Vec::new();
        for task in recurring {
            if seen.contains(&task.text.as_str()) {
                continue;
            }
            seen.push(&task.text);
            report.push_str(&format!("- {}{}\n", task.text, recurrence_suffix(task)));
        }
        report.push('\n');
    }

    // Notes
    if !state.notes.trim().is_empty() {
        report.push_str("## Notes\n\n");
        report.push_str(state.notes.trim_end());
        report.push_str("\n\n");
    }

    report.push_str(&format!(
        "---\n_Generated {}_\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));

    report
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Write the summary of the session day `today` to `output_path`
/// (default: `<data dir>/report-YYYY-MM-DD.md`)
pub fn generate_report(
    state: &PlannerState,
    today: NaiveDate,
    output_path: Option<PathBuf>,
) -> Result<PathBuf> {
    let path = match output_path {
        Some(path) => path,
        None => report_file(today)?,
    };

    let report = render_report(state, today);
    atomic_write(&path, &report)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;

    Ok(path)
}
