use crate::app::AppState;
use crate::domain::{TimerMode, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key, now),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::EditingNotes => handle_notes_editing_mode(app, key),
        UiMode::PhaseFinished | UiMode::DayChanged => handle_notice_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent, now: Instant) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }

        // Tasks
        KeyCode::Char(' ') | KeyCode::Enter => {
            app.toggle_selected();
            Ok(false)
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => {
            app.delete_selected();
            Ok(false)
        }

        // Timer
        KeyCode::Char('s') | KeyCode::Char('S') => {
            app.toggle_timer(now);
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_timer();
            Ok(false)
        }
        KeyCode::Char('w') | KeyCode::Char('W') => {
            app.select_phase(TimerMode::Work);
            Ok(false)
        }
        KeyCode::Char('b') | KeyCode::Char('B') => {
            app.select_phase(TimerMode::Break);
            Ok(false)
        }

        // Notes and preferences
        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.start_editing_notes();
            Ok(false)
        }
        KeyCode::Char('v') | KeyCode::Char('V') => {
            app.cycle_vibe();
            Ok(false)
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            app.cycle_mood();
            Ok(false)
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.cycle_theme();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Ok(true),

        _ => Ok(false),
    }
}

/// Handle keys in the add-task form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }
        // Text -> priority -> recurrence
        KeyCode::Tab => {
            app.form_next_field();
            Ok(false)
        }
        KeyCode::Backspace => {
            app.form_backspace();
            Ok(false)
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.form_input_char(c);
            Ok(false)
        }
        _ => Ok(false),
    }
}

/// Handle keys while editing notes in place
fn handle_notes_editing_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Only Esc leaves the editor
        KeyCode::Esc => app.stop_editing_notes(),
        KeyCode::Left => app.notes_cursor_left(),
        KeyCode::Right => app.notes_cursor_right(),
        KeyCode::Home => app.notes_cursor_home(),
        KeyCode::End => app.notes_cursor_end(),
        KeyCode::Enter => app.notes_insert('\n'),
        KeyCode::Backspace => app.notes_backspace(),
        KeyCode::Delete => app.notes_delete(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => app.notes_insert(c),
        _ => {}
    }
    Ok(false)
}

/// Phase-finished and day-changed notices: any of these keys dismisses
fn handle_notice_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            app.dismiss_notice();
            Ok(false)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => Ok(true),
        _ => Ok(false),
    }
}
