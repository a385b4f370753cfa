use super::enums::Priority;
use super::task::Task;
use chrono::NaiveDate;

/// Completion summary for the task list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub progress_percent: u8,
}

/// Tasks ordered high → medium → low, insertion order kept within a priority.
///
/// Lazy and cloneable, so a caller can walk it more than once. Storage order
/// is never touched.
pub fn sorted_for_display(tasks: &[Task]) -> impl Iterator<Item = &Task> + Clone + '_ {
    Priority::all()
        .iter()
        .flat_map(move |priority| tasks.iter().filter(move |t| t.priority == *priority))
}

/// Count tasks and compute the rounded completion percentage
pub fn compute_stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();
    let progress_percent = if total > 0 {
        (completed as f64 * 100.0 / total as f64).round() as u8
    } else {
        0
    };

    TaskStats {
        total,
        completed,
        progress_percent,
    }
}

/// Format seconds as "MM:SS"
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// "Sunday, October 18, 2026"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Checkbox glyph for a task row
pub fn completion_box(task: &Task) -> &'static str {
    if task.completed {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Short priority badge
pub fn priority_badge(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "!!!",
        Priority::Medium => "!! ",
        Priority::Low => "!  ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(text: &str, priority: Priority) -> Task {
        Task::new(text, priority, None, NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()).unwrap()
    }

    #[test]
    fn test_sorted_for_display_is_stable() {
        let tasks = vec![
            task("a-low", Priority::Low),
            task("b-high", Priority::High),
            task("c-medium", Priority::Medium),
            task("d-high", Priority::High),
        ];

        let order: Vec<&str> = sorted_for_display(&tasks).map(|t| t.text.as_str()).collect();
        assert_eq!(order, vec!["b-high", "d-high", "c-medium", "a-low"]);

        // Storage order untouched
        assert_eq!(tasks[0].text, "a-low");
    }

    #[test]
    fn test_sorted_for_display_is_restartable() {
        let tasks = vec![task("x", Priority::Low), task("y", Priority::High)];
        let view = sorted_for_display(&tasks);
        let first: Vec<_> = view.clone().map(|t| t.id).collect();
        let second: Vec<_> = view.map(|t| t.id).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stats_quarter_done() {
        let mut tasks = vec![
            task("1", Priority::High),
            task("2", Priority::High),
            task("3", Priority::Low),
            task("4", Priority::Low),
        ];
        tasks[2].completed = true;

        assert_eq!(
            compute_stats(&tasks),
            TaskStats {
                total: 4,
                completed: 1,
                progress_percent: 25,
            }
        );
    }

    #[test]
    fn test_stats_empty() {
        assert_eq!(compute_stats(&[]), TaskStats::default());
    }

    #[test]
    fn test_stats_rounds() {
        let mut tasks = vec![
            task("1", Priority::High),
            task("2", Priority::High),
            task("3", Priority::High),
        ];
        tasks[0].completed = true;
        assert_eq!(compute_stats(&tasks).progress_percent, 33);
        tasks[1].completed = true;
        assert_eq!(compute_stats(&tasks).progress_percent, 67);
    }

    #[test]
    fn test_format_countdown() {
        assert_eq!(format_countdown(1500), "25:00");
        assert_eq!(format_countdown(299), "04:59");
        assert_eq!(format_countdown(0), "00:00");
    }

    #[test]
    fn test_format_long_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(format_long_date(date), "Sunday, October 18, 2026");
    }
}
