pub mod enums;
pub mod recurrence;
pub mod state;
pub mod streak;
pub mod task;
pub mod timer;
pub mod views;

pub use enums::{Mood, Priority, RecurringType, Theme, TimerMode, UiMode, Vibe};
pub use recurrence::{run_daily_check, RecurrenceCheck, DEFAULT_WEEKLY_DAY};
pub use state::PlannerState;
pub use streak::{LastCompletion, Streak};
pub use task::{Task, TaskDraft, TaskId};
pub use timer::{PhaseChange, PhaseDurations, Timer};
pub use views::{completion_box, format_countdown, format_long_date, priority_badge, TaskStats};
