//! File logging
//!
//! Logs to `<data dir>/logs/dayplan-YYYY-MM-DD.log`. Nothing is written until
//! [`init`] is called, so the engine can log freely in tests.

use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

/// How many days of log files to keep
const KEEP_DAYS: i64 = 7;

struct Logger {
    file: File,
}

impl Logger {
    fn open(path: &Path) -> Option<Self> {
        fs::create_dir_all(path.parent()?).ok()?;
        let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
        Some(Self { file })
    }

    fn write(&mut self, level: &str, message: &str) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {:<5} {}", timestamp, level, message);
    }
}

fn log_file_name() -> String {
    format!("dayplan-{}.log", Local::now().format("%Y-%m-%d"))
}

fn log(level: &str, message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(logger) = guard.as_mut() {
            logger.write(level, message);
        }
    }
}

/// Initialize the logger under `data_dir/logs` (call once at startup)
pub fn init(data_dir: &Path) {
    if let Ok(mut guard) = LOGGER.lock() {
        if guard.is_none() {
            *guard = Logger::open(&log_path(data_dir));
        }
    }
}

pub fn info(message: &str) {
    log("INFO", message);
}

pub fn warn(message: &str) {
    log("WARN", message);
}

pub fn error(message: &str) {
    log("ERROR", message);
}

/// Log a debug message (only if DAYPLAN_TRACE is set)
pub fn debug(message: &str) {
    if std::env::var_os("DAYPLAN_TRACE").is_some() {
        log("DEBUG", message);
    }
}

/// Path of today's log file
pub fn log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("logs").join(log_file_name())
}

/// Remove log files older than a week
pub fn cleanup_old_logs(data_dir: &Path) {
    let Ok(entries) = fs::read_dir(data_dir.join("logs")) else {
        return;
    };

    let cutoff = Local::now() - chrono::Duration::days(KEEP_DAYS);
    for entry in entries.flatten() {
        if let Ok(modified) = entry.metadata().and_then(|m| m.modified()) {
            let modified: chrono::DateTime<Local> = modified.into();
            if modified < cutoff {
                let _ = fs::remove_file(entry.path());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_before_init_is_silent() {
        // Must not panic or create anything
        info("not yet initialized");
        debug("still quiet");
    }

    #[test]
    fn test_log_path_is_dated() {
        let dir = tempfile::tempdir().unwrap();
        let path = log_path(dir.path());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("dayplan-"));
        assert!(name.ends_with(".log"));
        assert!(path.parent().unwrap().ends_with("logs"));
    }

    #[test]
    fn test_cleanup_without_log_dir() {
        let dir = tempfile::tempdir().unwrap();
        cleanup_old_logs(dir.path());
    }
}
