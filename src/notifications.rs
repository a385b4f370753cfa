//! Timer phase alerts
//! Desktop notifications are only implemented on macOS

use crate::domain::TimerMode;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Alert text shown when `finished` runs out
pub fn phase_finished_message(finished: TimerMode) -> &'static str {
    match finished {
        TimerMode::Work => "🎉 Great work! Time for a break!",
        TimerMode::Break => "✨ Break over! Ready to focus?",
    }
}

/// Send a desktop notification when a timer phase ends
pub fn notify_phase_finished(finished: TimerMode) {
    let message = phase_finished_message(finished);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "Day Plan - Timer""#,
            message.replace('"', "\\\"")
        );

        let _ = Command::new("osascript").arg("-e").arg(&script).output();
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}
