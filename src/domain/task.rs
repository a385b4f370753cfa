use super::enums::{Priority, RecurringType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// First 8 hex digits, enough to pick a task on the command line
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// Whether the simple (dash-free) or hyphenated form starts with `prefix`
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        let prefix = prefix.trim().to_lowercase();
        !prefix.is_empty()
            && (self.0.simple().to_string().starts_with(&prefix)
                || self.0.hyphenated().to_string().starts_with(&prefix))
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    /// Trimmed, never empty
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub recurring: bool,
    /// Only meaningful when `recurring` is set
    #[serde(default)]
    pub recurring_type: Option<RecurringType>,
    /// Day this instance was created
    pub created_date: NaiveDate,
}

impl Task {
    /// Build a task from raw input; `None` when the text is blank
    pub fn new(
        text: &str,
        priority: Priority,
        recurrence: Option<RecurringType>,
        today: NaiveDate,
    ) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        Some(Self {
            id: TaskId::new(),
            text: text.to_string(),
            completed: false,
            priority,
            recurring: recurrence.is_some(),
            recurring_type: recurrence,
            created_date: today,
        })
    }

    /// Fresh, incomplete copy of this task's template fields for `day`
    pub fn instance_for(&self, day: NaiveDate) -> Self {
        Self {
            id: TaskId::new(),
            text: self.text.clone(),
            completed: false,
            priority: self.priority,
            recurring: self.recurring,
            recurring_type: self.recurring_type,
            created_date: day,
        }
    }

    /// Recurrence kind, if this task repeats at all
    pub fn recurrence(&self) -> Option<RecurringType> {
        if self.recurring {
            self.recurring_type
        } else {
            None
        }
    }
}

/// Pending input from the add-task form or the `add` command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub text: String,
    pub priority: Priority,
    pub recurring: bool,
    pub recurring_type: RecurringType,
}

impl TaskDraft {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_recurrence(mut self, recurrence: Option<RecurringType>) -> Self {
        self.recurring = recurrence.is_some();
        if let Some(kind) = recurrence {
            self.recurring_type = kind;
        }
        self
    }

    pub fn recurrence(&self) -> Option<RecurringType> {
        self.recurring.then_some(self.recurring_type)
    }

    /// Reset the form fields after a submit
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
