use crate::app::AppState;
use crate::domain::{format_countdown, TimerMode};
use crate::ui::styles::{border_style, gauge_style, hint_style, paused_style, running_style, title_style};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the work/break countdown
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.planner.theme;
    let timer = &app.planner.timer;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" ⏱ Timer ", title_style(theme)));

    // Both phases shown, the active one highlighted
    let phases: Vec<Span> = [TimerMode::Work, TimerMode::Break]
        .iter()
        .flat_map(|mode| {
            let style = if *mode == timer.mode() {
                title_style(theme)
            } else {
                hint_style()
            };
            [Span::styled(format!(" {} ", mode.label()), style), Span::raw(" ")]
        })
        .collect();

    let (state, state_style) = if timer.is_running() {
        ("running", running_style())
    } else {
        ("paused", paused_style())
    };

    let lines = vec![
        Line::from(phases),
        Line::from(vec![
            Span::styled(format_countdown(timer.remaining_secs()), title_style(theme)),
            Span::raw("  "),
            Span::styled(state, state_style),
        ]),
    ];

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Phase + countdown
            Constraint::Length(1), // Elapsed gauge
        ])
        .split(block.inner(area));

    let gauge = Gauge::default()
        .gauge_style(gauge_style(theme))
        .ratio(timer.progress())
        .label("");

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    f.render_widget(gauge, chunks[1]);
}
