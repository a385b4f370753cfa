use super::enums::RecurringType;
use super::state::PlannerState;
use super::task::Task;
use chrono::{Datelike, NaiveDate, Weekday};

/// Day of the week weekly tasks come back on, unless configured otherwise
pub const DEFAULT_WEEKLY_DAY: Weekday = Weekday::Mon;

/// Outcome of the once-a-day recurrence pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecurrenceCheck {
    /// Today was already processed
    AlreadyRan,
    /// Processed now; `added` new instances were appended
    Ran { added: usize },
}

/// Whether a recurring task is due for a fresh instance on `today`
pub fn should_regenerate(task: &Task, today: NaiveDate, weekly_day: Weekday) -> bool {
    match task.recurrence() {
        Some(RecurringType::Daily) => true,
        Some(RecurringType::Weekly) => today.weekday() == weekly_day,
        None => false,
    }
}

/// Append today's instances of every due recurring task.
///
/// An instance is skipped when an incomplete task with the same text was
/// already created today. Only the text is compared, so two templates with
/// identical text share one instance.
pub fn regenerate_recurring(tasks: &mut Vec<Task>, today: NaiveDate, weekly_day: Weekday) -> usize {
    let templates: Vec<Task> = tasks
        .iter()
        .filter(|t| should_regenerate(t, today, weekly_day))
        .cloned()
        .collect();

    let mut added = 0;
    for template in &templates {
        let exists = tasks
            .iter()
            .any(|t| t.text == template.text && !t.completed && t.created_date == today);

        if !exists {
            tasks.push(template.instance_for(today));
            added += 1;
        }
    }

    added
}

/// Run the recurrence pass unless it already ran today
pub fn run_daily_check(state: &mut PlannerState, today: NaiveDate, weekly_day: Weekday) -> RecurrenceCheck {
    if state.last_recurring_check == Some(today) {
        return RecurrenceCheck::AlreadyRan;
    }

    let added = regenerate_recurring(&mut state.tasks, today, weekly_day);
    state.last_recurring_check = Some(today);
    RecurrenceCheck::Ran { added }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::enums::Priority;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    // 2026-10-19 is a Monday
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn recurring(text: &str, kind: RecurringType, created: NaiveDate) -> Task {
        Task::new(text, Priority::Medium, Some(kind), created).unwrap()
    }

    #[test]
    fn test_daily_task_gets_one_instance() {
        let yesterday = monday() - Duration::days(1);
        let mut state = PlannerState::default();
        state.tasks.push(recurring("meditate", RecurringType::Daily, yesterday));

        let result = run_daily_check(&mut state, monday(), DEFAULT_WEEKLY_DAY);
        assert_eq!(result, RecurrenceCheck::Ran { added: 1 });
        assert_eq!(state.tasks.len(), 2);

        let instance = &state.tasks[1];
        assert_eq!(instance.text, "meditate");
        assert_eq!(instance.created_date, monday());
        assert!(!instance.completed);
        assert_eq!(state.last_recurring_check, Some(monday()));
    }

    #[test]
    fn test_second_run_same_day_adds_nothing() {
        let yesterday = monday() - Duration::days(1);
        let mut state = PlannerState::default();
        state.tasks.push(recurring("meditate", RecurringType::Daily, yesterday));

        run_daily_check(&mut state, monday(), DEFAULT_WEEKLY_DAY);
        let again = run_daily_check(&mut state, monday(), DEFAULT_WEEKLY_DAY);

        assert_eq!(again, RecurrenceCheck::AlreadyRan);
        assert_eq!(state.tasks.len(), 2);
    }

    #[test]
    fn test_existing_instance_suppresses_duplicate_even_without_stamp() {
        let yesterday = monday() - Duration::days(1);
        let mut tasks = vec![recurring("meditate", RecurringType::Daily, yesterday)];

        assert_eq!(regenerate_recurring(&mut tasks, monday(), DEFAULT_WEEKLY_DAY), 1);
        // Both template and instance are recurring; neither adds another
        assert_eq!(regenerate_recurring(&mut tasks, monday(), DEFAULT_WEEKLY_DAY), 0);
        assert_eq!(tasks.len(), 2);
    }

    #[test]
    fn test_task_created_today_is_its_own_instance() {
        let mut tasks = vec![recurring("read", RecurringType::Daily, monday())];
        assert_eq!(regenerate_recurring(&mut tasks, monday(), DEFAULT_WEEKLY_DAY), 0);
    }

    #[test]
    fn test_completed_instance_does_not_count() {
        let mut tasks = vec![recurring("read", RecurringType::Daily, monday())];
        tasks[0].completed = true;
        assert_eq!(regenerate_recurring(&mut tasks, monday(), DEFAULT_WEEKLY_DAY), 1);
    }

    #[test]
    fn test_weekly_only_on_anchor_day() {
        let last_week = monday() - Duration::days(7);
        let tuesday = monday() + Duration::days(1);

        let mut tasks = vec![recurring("plan week", RecurringType::Weekly, last_week)];
        assert_eq!(regenerate_recurring(&mut tasks, tuesday, DEFAULT_WEEKLY_DAY), 0);
        assert_eq!(regenerate_recurring(&mut tasks, monday(), DEFAULT_WEEKLY_DAY), 1);
    }

    #[test]
    fn test_weekly_anchor_is_configurable() {
        let friday = monday() + Duration::days(4);
        let mut tasks = vec![recurring("timesheet", RecurringType::Weekly, monday())];
        assert_eq!(regenerate_recurring(&mut tasks, friday, Weekday::Fri), 1);
    }

    #[test]
    fn test_same_text_templates_share_one_instance() {
        let yesterday = monday() - Duration::days(1);
        let mut tasks = vec![
            recurring("standup", RecurringType::Daily, yesterday),
            recurring("standup", RecurringType::Daily, yesterday),
        ];
        assert_eq!(regenerate_recurring(&mut tasks, monday(), DEFAULT_WEEKLY_DAY), 1);
    }

    #[test]
    fn test_recurring_flag_without_type_never_regenerates() {
        let mut task = recurring("odd", RecurringType::Daily, monday() - Duration::days(1));
        task.recurring_type = None;
        assert!(!should_regenerate(&task, monday(), DEFAULT_WEEKLY_DAY));

        let mut plain = task.clone();
        plain.recurring = false;
        plain.recurring_type = Some(RecurringType::Daily);
        assert!(!should_regenerate(&plain, monday(), DEFAULT_WEEKLY_DAY));
    }
}
