use crate::config::Config;
use crate::domain::{
    run_daily_check, Mood, PhaseChange, PlannerState, Priority, RecurrenceCheck, RecurringType,
    TaskDraft, TaskId, TaskStats, TimerMode, UiMode,
};
use crate::logging;
use crate::notifications;
use crate::persistence::{save_state, start_session, KeyValueStore, StoreError};
use chrono::NaiveDate;
use std::time::Instant;

/// Which add-form field has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Text,
    Priority,
    Recurrence,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Text => Self::Priority,
            Self::Priority => Self::Recurrence,
            Self::Recurrence => Self::Text,
        }
    }
}

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub draft: TaskDraft,
    pub editing_field: FormField,
}

impl InputFormState {
    fn new() -> Self {
        Self {
            draft: TaskDraft::default(),
            editing_field: FormField::Text,
        }
    }

    /// Step the recurrence field: none → daily → weekly → none
    fn cycle_recurrence(&mut self) {
        let next = match self.draft.recurrence() {
            None => Some(RecurringType::Daily),
            Some(RecurringType::Daily) => Some(RecurringType::Weekly),
            Some(RecurringType::Weekly) => None,
        };
        self.draft.recurring = next.is_some();
        if let Some(kind) = next {
            self.draft.recurring_type = kind;
        }
    }
}

/// Main application state: one planner session plus its UI bits
pub struct AppState {
    pub planner: PlannerState,
    pub store: Box<dyn KeyValueStore>,
    pub config: Config,
    pub today: NaiveDate, // Day the session is tracking; recurrence reruns when it changes
    pub ui_mode: UiMode,
    pub resume_mode: UiMode, // Mode to return to once a notice is dismissed
    pub selected_index: usize, // Index into the priority-sorted view
    pub input_form: InputFormState,
    pub notes_cursor_pos: usize, // Byte offset into notes, always on a char boundary
    pub notice: Option<String>,  // One-shot alert text (phase change, new day)
    pub status: Option<String>,  // Last save problem, shown in the header
    pub needs_save: bool,
}

impl AppState {
    pub fn new(
        planner: PlannerState,
        store: Box<dyn KeyValueStore>,
        config: Config,
        today: NaiveDate,
    ) -> Self {
        let notes_cursor_pos = planner.notes.len();
        Self {
            planner,
            store,
            config,
            today,
            ui_mode: UiMode::Normal,
            resume_mode: UiMode::Normal,
            selected_index: 0,
            input_form: InputFormState::new(),
            notes_cursor_pos,
            notice: None,
            status: None,
            needs_save: false,
        }
    }

    /// Load state from `store`, run the daily recurrence pass and wrap it in a session
    pub fn open(mut store: Box<dyn KeyValueStore>, config: Config, today: NaiveDate) -> Self {
        let (planner, check) = start_session(store.as_mut(), &config, today);
        if let RecurrenceCheck::Ran { added } = check {
            logging::info(&format!("Session opened for {} ({} recurring task(s) added)", today, added));
        }
        Self::new(planner, store, config, today)
    }

    /// Mirror the whole state to the store
    pub fn save(&mut self) -> Result<(), StoreError> {
        match save_state(self.store.as_mut(), &self.planner) {
            Ok(()) => {
                self.needs_save = false;
                self.status = None;
                Ok(())
            }
            Err(e) => {
                self.status = Some(format!("Save failed: {}", e));
                Err(e)
            }
        }
    }

    /// Save if anything changed; failures are kept in `status` and retried next time
    pub fn autosave(&mut self) {
        if self.needs_save {
            let _ = self.save();
        }
    }

    /// Stop the timer for good and write everything out
    pub fn shutdown(&mut self) -> Result<(), StoreError> {
        self.planner.timer.shutdown();
        self.save()
    }

    pub fn stats(&self) -> TaskStats {
        self.planner.stats()
    }

    pub fn visible_task_count(&self) -> usize {
        self.planner.tasks.len()
    }

    /// Id of the task under the cursor in the sorted view
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.planner
            .sorted_for_display()
            .nth(self.selected_index)
            .map(|t| t.id)
    }

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.visible_task_count() {
            self.selected_index += 1;
        }
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_task_count();
        if count == 0 {
            self.selected_index = 0;
        } else if self.selected_index >= count {
            self.selected_index = count - 1;
        }
    }

    /// Keep the cursor on `id` after the sorted view reshuffles
    fn select_task(&mut self, id: TaskId) {
        if let Some(index) = self.planner.sorted_for_display().position(|t| t.id == id) {
            self.selected_index = index;
        }
    }

    // --- Task store ---

    pub fn start_add_task(&mut self) {
        self.input_form.editing_field = FormField::Text;
        self.ui_mode = UiMode::AddingTask;
    }

    /// Close the form; the typed text is kept for next time
    pub fn cancel_input_form(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn form_next_field(&mut self) {
        let form = &mut self.input_form;
        form.editing_field = form.editing_field.next();
    }

    pub fn form_input_char(&mut self, c: char) {
        let form = &mut self.input_form;
        match form.editing_field {
            FormField::Text => form.draft.text.push(c),
            FormField::Priority => {
                if let Some(priority) = Priority::parse(&c.to_string()) {
                    form.draft.priority = priority;
                } else if c == ' ' {
                    form.draft.priority = form.draft.priority.cycle();
                }
            }
            FormField::Recurrence => {
                if c == ' ' {
                    form.cycle_recurrence();
                }
            }
        }
    }

    pub fn form_backspace(&mut self) {
        let form = &mut self.input_form;
        if form.editing_field == FormField::Text {
            form.draft.text.pop();
        }
    }

    /// Submit the add form. Blank text keeps the form open and adds nothing.
    pub fn submit_input_form(&mut self) {
        let added = self
            .planner
            .add_task(&self.input_form.draft, self.today)
            .map(|t| (t.id, t.text.clone()));

        if let Some((id, text)) = added {
            logging::info(&format!("Added task '{}'", text));
            self.input_form.draft.clear();
            self.ui_mode = UiMode::Normal;
            self.select_task(id);
            self.needs_save = true;
        }
    }

    pub fn toggle_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(completed) = self.planner.toggle_task(id, self.today) {
            if let Some(task) = self.planner.find_task(id) {
                logging::debug(&format!("Task '{}' completed={}", task.text, completed));
            }
            self.needs_save = true;
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(task) = self.planner.delete_task(id) {
            logging::info(&format!("Deleted task '{}'", task.text));
            self.clamp_selection();
            self.needs_save = true;
        }
    }

    // --- Timer ---

    pub fn toggle_timer(&mut self, now: Instant) {
        self.planner.timer.toggle(now);
    }

    pub fn reset_timer(&mut self) {
        self.planner.timer.reset();
    }

    pub fn select_phase(&mut self, mode: TimerMode) {
        self.planner.timer.select_phase(mode);
    }

    /// Drain due timer ticks; raises the alert on a zero crossing
    pub fn tick(&mut self, now: Instant) -> Option<PhaseChange> {
        let change = self.planner.timer.advance(now)?;
        logging::info(&format!("{} phase finished", change.finished.label()));
        notifications::notify_phase_finished(change.finished);
        let message = notifications::phase_finished_message(change.finished).to_string();
        self.raise_notice(message, UiMode::PhaseFinished);
        Some(change)
    }

    /// Show `message` over whatever is open; the form or editor comes back on dismiss
    fn raise_notice(&mut self, message: String, mode: UiMode) {
        if !matches!(self.ui_mode, UiMode::PhaseFinished | UiMode::DayChanged) {
            self.resume_mode = self.ui_mode;
        }
        self.notice = Some(message);
        self.ui_mode = mode;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.ui_mode = self.resume_mode;
        self.resume_mode = UiMode::Normal;
    }

    // --- Day change ---

    pub fn has_day_changed(&self, current: NaiveDate) -> bool {
        current != self.today
    }

    /// Move the session to `current` and run that day's recurrence pass
    pub fn roll_over_to(&mut self, current: NaiveDate) {
        self.today = current;
        let check = run_daily_check(&mut self.planner, current, self.config.weekly_day());
        if let RecurrenceCheck::Ran { added } = check {
            logging::info(&format!("New day {}: {} recurring task(s) added", current, added));
            let message = format!("A new day has begun. {} recurring task(s) added.", added);
            self.raise_notice(message, UiMode::DayChanged);
            self.needs_save = true;
        }
    }

    // --- Preferences ---

    pub fn cycle_vibe(&mut self) {
        self.planner.set_vibe(self.planner.vibe.cycle());
        self.needs_save = true;
    }

    pub fn cycle_mood(&mut self) {
        self.planner.set_mood(Mood::cycle(self.planner.mood));
        self.needs_save = true;
    }

    pub fn cycle_theme(&mut self) {
        self.planner.set_theme(self.planner.theme.cycle());
        self.needs_save = true;
    }

    // --- Notes editor ---

    pub fn start_editing_notes(&mut self) {
        self.notes_cursor_pos = self.planner.notes.len();
        self.ui_mode = UiMode::EditingNotes;
    }

    pub fn stop_editing_notes(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn notes_insert(&mut self, c: char) {
        let mut notes = std::mem::take(&mut self.planner.notes);
        notes.insert(self.notes_cursor_pos, c);
        self.notes_cursor_pos += c.len_utf8();
        self.planner.set_notes(notes);
        self.needs_save = true;
    }

    pub fn notes_backspace(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            let mut notes = std::mem::take(&mut self.planner.notes);
            notes.remove(prev);
            self.notes_cursor_pos = prev;
            self.planner.set_notes(notes);
            self.needs_save = true;
        }
    }

    pub fn notes_delete(&mut self) {
        if self.notes_cursor_pos < self.planner.notes.len() {
            let mut notes = std::mem::take(&mut self.planner.notes);
            notes.remove(self.notes_cursor_pos);
            self.planner.set_notes(notes);
            self.needs_save = true;
        }
    }

    pub fn notes_cursor_left(&mut self) {
        if let Some(prev) = self.prev_boundary() {
            self.notes_cursor_pos = prev;
        }
    }

    pub fn notes_cursor_right(&mut self) {
        if let Some(c) = self.planner.notes[self.notes_cursor_pos..].chars().next() {
            self.notes_cursor_pos += c.len_utf8();
        }
    }

    pub fn notes_cursor_home(&mut self) {
        self.notes_cursor_pos = 0;
    }

    pub fn notes_cursor_end(&mut self) {
        self.notes_cursor_pos = self.planner.notes.len();
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.planner.notes[..self.notes_cursor_pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }
}
