pub mod header_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod notes_pane;
pub mod styles;
pub mod task_pane;
pub mod timer_pane;

use crate::app::AppState;
use crate::domain::UiMode;
use header_pane::render_header_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::render_notice_modal;
use notes_pane::render_notes_pane;
use ratatui::Frame;
use task_pane::render_task_pane;
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app.ui_mode, layout.keybindings_area);

    render_header_pane(f, app, layout.header_area);
    render_task_pane(f, app, layout.task_area);
    render_timer_pane(f, app, layout.timer_area);
    render_notes_pane(f, app, layout.notes_area);

    match app.ui_mode {
        UiMode::AddingTask => render_input_form(f, app, size),
        UiMode::PhaseFinished | UiMode::DayChanged => render_notice_modal(f, app, size),
        UiMode::Normal | UiMode::EditingNotes => {}
    }
}
