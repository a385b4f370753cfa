use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a stored or typed name does not match any variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// Wire up `Display`/`FromStr` for enums that already have `as_str`/`parse`/`all`
macro_rules! named_enum {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s).ok_or_else(|| ParseEnumError {
                    kind: $kind,
                    value: s.to_string(),
                    expected: Self::all()
                        .iter()
                        .map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
            }
        }
    };
}

/// Task priority, also the display sort key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Some(Self::High),
            "medium" | "med" | "m" => Some(Self::Medium),
            "low" | "l" => Some(Self::Low),
            _ => None,
        }
    }

    /// Display order, highest priority first
    pub fn all() -> &'static [Priority] {
        &[Priority::High, Priority::Medium, Priority::Low]
    }

    /// Next priority in the add-form cycle
    pub fn cycle(&self) -> Self {
        match self {
            Self::High => Self::Medium,
            Self::Medium => Self::Low,
            Self::Low => Self::High,
        }
    }
}

named_enum!(Priority, "priority");

/// How often a recurring task comes back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringType {
    #[default]
    Daily,
    Weekly,
}

impl RecurringType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daily" | "day" | "d" => Some(Self::Daily),
            "weekly" | "week" | "w" => Some(Self::Weekly),
            _ => None,
        }
    }

    pub fn all() -> &'static [RecurringType] {
        &[RecurringType::Daily, RecurringType::Weekly]
    }
}

named_enum!(RecurringType, "recurrence");

/// Working vibe tag for the day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vibe {
    #[default]
    Focus,
    Chill,
    Grind,
}

impl Vibe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Focus => "focus",
            Self::Chill => "chill",
            Self::Grind => "grind",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Focus => "Focus",
            Self::Chill => "Chill",
            Self::Grind => "Grind",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "focus" => Some(Self::Focus),
            "chill" => Some(Self::Chill),
            "grind" => Some(Self::Grind),
            _ => None,
        }
    }

    pub fn all() -> &'static [Vibe] {
        &[Vibe::Focus, Vibe::Chill, Vibe::Grind]
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Focus => Self::Chill,
            Self::Chill => Self::Grind,
            Self::Grind => Self::Focus,
        }
    }
}

named_enum!(Vibe, "vibe");

/// How the day feels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Amazing,
    Good,
    Okay,
    Meh,
    Stressed,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Amazing => "amazing",
            Self::Good => "good",
            Self::Okay => "okay",
            Self::Meh => "meh",
            Self::Stressed => "stressed",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Amazing => "🤩",
            Self::Good => "😊",
            Self::Okay => "😐",
            Self::Meh => "😔",
            Self::Stressed => "😰",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "amazing" => Some(Self::Amazing),
            "good" => Some(Self::Good),
            "okay" | "ok" => Some(Self::Okay),
            "meh" => Some(Self::Meh),
            "stressed" => Some(Self::Stressed),
            _ => None,
        }
    }

    pub fn all() -> &'static [Mood] {
        &[
            Mood::Amazing,
            Mood::Good,
            Mood::Okay,
            Mood::Meh,
            Mood::Stressed,
        ]
    }

    /// Step through the moods, passing through "unset" after the last one
    pub fn cycle(current: Option<Mood>) -> Option<Mood> {
        match current {
            None => Some(Mood::Amazing),
            Some(Mood::Amazing) => Some(Mood::Good),
            Some(Mood::Good) => Some(Mood::Okay),
            Some(Mood::Okay) => Some(Mood::Meh),
            Some(Mood::Meh) => Some(Mood::Stressed),
            Some(Mood::Stressed) => None,
        }
    }
}

named_enum!(Mood, "mood");

/// Named color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Warm,
    Dark,
    Ocean,
    Sunset,
    Forest,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warm => "warm",
            Self::Dark => "dark",
            Self::Ocean => "ocean",
            Self::Sunset => "sunset",
            Self::Forest => "forest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "warm" => Some(Self::Warm),
            "dark" => Some(Self::Dark),
            "ocean" => Some(Self::Ocean),
            "sunset" => Some(Self::Sunset),
            "forest" => Some(Self::Forest),
            _ => None,
        }
    }

    pub fn all() -> &'static [Theme] {
        &[
            Theme::Warm,
            Theme::Dark,
            Theme::Ocean,
            Theme::Sunset,
            Theme::Forest,
        ]
    }

    pub fn cycle(&self) -> Self {
        match self {
            Self::Warm => Self::Dark,
            Self::Dark => Self::Ocean,
            Self::Ocean => Self::Sunset,
            Self::Sunset => Self::Forest,
            Self::Forest => Self::Warm,
        }
    }
}

named_enum!(Theme, "theme");

/// Countdown phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Work,
    Break,
}

impl TimerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Focus",
            Self::Break => "Break",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "work" | "focus" => Some(Self::Work),
            "break" | "rest" => Some(Self::Break),
            _ => None,
        }
    }

    pub fn all() -> &'static [TimerMode] {
        &[TimerMode::Work, TimerMode::Break]
    }

    /// The phase that follows this one at the zero crossing
    pub fn flipped(&self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }
}

named_enum!(TimerMode, "timer phase");

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingNotes,
    PhaseFinished, // One-shot alert after a timer zero crossing
    DayChanged,    // Shown once after midnight, after recurring tasks are refreshed
}
