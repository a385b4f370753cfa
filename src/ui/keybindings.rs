use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Hints for the keys that do something in `mode`
fn hints(mode: UiMode) -> Line<'static> {
    match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ↑/↓ select   "),
            Span::raw("Space done   "),
            Span::raw("a add   "),
            Span::raw("x delete   "),
            Span::raw("s start/pause   "),
            Span::raw("r reset   "),
            Span::raw("w/b work/break   "),
            Span::raw("n notes   "),
            Span::raw("v vibe   "),
            Span::raw("m mood   "),
            Span::raw("t theme   "),
            Span::raw("q quit"),
        ]),
        UiMode::AddingTask => Line::raw(" Tab next field   Enter add   Esc cancel"),
        UiMode::EditingNotes => Line::raw(" ←/→ Home/End move   Enter newline   Esc done"),
        UiMode::PhaseFinished | UiMode::DayChanged => Line::raw(" Enter dismiss   q quit"),
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, mode: UiMode, area: Rect) {
    let paragraph = Paragraph::new(hints(mode)).style(hint_style());
    f.render_widget(paragraph, area);
}
