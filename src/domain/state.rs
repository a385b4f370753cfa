use super::enums::{Mood, Theme, Vibe};
use super::streak::{Streak, StreakUpdate};
use super::task::{Task, TaskDraft, TaskId};
use super::timer::{PhaseDurations, Timer};
use super::views::{compute_stats, sorted_for_display, TaskStats};
use chrono::NaiveDate;

/// Everything the planner knows during one session
#[derive(Debug, Clone)]
pub struct PlannerState {
    /// Insertion order; display order is derived
    pub tasks: Vec<Task>,
    pub notes: String,
    pub vibe: Vibe,
    pub mood: Option<Mood>,
    pub theme: Theme,
    pub streak: Streak,
    /// Last day the recurrence pass ran (separate from the streak date)
    pub last_recurring_check: Option<NaiveDate>,
    pub timer: Timer,
}

impl PlannerState {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            tasks: Vec::new(),
            notes: String::new(),
            vibe: Vibe::default(),
            mood: None,
            theme: Theme::default(),
            streak: Streak::default(),
            last_recurring_check: None,
            timer: Timer::new(durations),
        }
    }

    /// Append a task built from `draft`. Blank text is ignored.
    pub fn add_task(&mut self, draft: &TaskDraft, today: NaiveDate) -> Option<&Task> {
        let task = Task::new(&draft.text, draft.priority, draft.recurrence(), today)?;
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Flip completion on `id`; returns the new state, `None` if not found.
    ///
    /// Afterwards, if any task at all is completed, today is credited to the
    /// streak, even when this toggle un-completed a task.
    pub fn toggle_task(&mut self, id: TaskId, today: NaiveDate) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;

        if self.tasks.iter().any(|t| t.completed) {
            self.record_completion_today(today);
        }

        Some(completed)
    }

    /// Remove `id`; returns the removed task, if any
    pub fn delete_task(&mut self, id: TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn sorted_for_display(&self) -> impl Iterator<Item = &Task> + Clone + '_ {
        sorted_for_display(&self.tasks)
    }

    pub fn stats(&self) -> TaskStats {
        compute_stats(&self.tasks)
    }

    pub fn record_completion_today(&mut self, today: NaiveDate) -> StreakUpdate {
        self.streak.record_completion(today)
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    pub fn set_vibe(&mut self, vibe: Vibe) {
        self.vibe = vibe;
    }

    pub fn set_mood(&mut self, mood: Option<Mood>) {
        self.mood = mood;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

impl Default for PlannerState {
    fn default() -> Self {
        Self::new(PhaseDurations::default())
    }
}
