//! Configuration file support
//!
//! Loaded from `<data dir>/config.toml`. Every section is optional; a missing
//! file means all defaults.

use crate::domain::{PhaseDurations, DEFAULT_WEEKLY_DAY};
use crate::persistence::{config_file, read_file};
use anyhow::{Context, Result};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timer: TimerConfig,
    pub recurrence: RecurrenceConfig,
    pub display: DisplayConfig,
}

/// Phase lengths for the focus timer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Work phase in seconds (default: 1500)
    pub work_secs: u32,
    /// Break phase in seconds (default: 300)
    pub break_secs: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        let durations = PhaseDurations::default();
        Self {
            work_secs: durations.work_secs,
            break_secs: durations.break_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecurrenceConfig {
    /// Day weekly tasks come back on (default: "monday")
    pub weekly_day: String,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            weekly_day: "monday".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Show mood emoji in the header (default: true)
    pub use_emoji: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { use_emoji: true }
    }
}

impl Config {
    /// Load from the data directory's config.toml
    pub fn load() -> Result<Self> {
        Self::load_from(config_file()?)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_file(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.timer.work_secs == 0 || self.timer.break_secs == 0 {
            anyhow::bail!("timer.work_secs and timer.break_secs must be greater than zero");
        }
        self.parse_weekly_day()?;
        Ok(())
    }

    fn parse_weekly_day(&self) -> Result<Weekday> {
        self.recurrence
            .weekly_day
            .trim()
            .parse::<Weekday>()
            .map_err(|_| {
                anyhow::anyhow!(
                    "recurrence.weekly_day '{}' is not a weekday name",
                    self.recurrence.weekly_day
                )
            })
    }

    pub fn phase_durations(&self) -> PhaseDurations {
        PhaseDurations {
            work_secs: self.timer.work_secs,
            break_secs: self.timer.break_secs,
        }
    }

    /// Anchor day for weekly tasks; falls back to Monday if unparseable
    pub fn weekly_day(&self) -> Weekday {
        self.parse_weekly_day().unwrap_or(DEFAULT_WEEKLY_DAY)
    }
}
