use crate::app::AppState;
use crate::domain::format_long_date;
use crate::ui::styles::{border_style, error_style, gauge_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Streak text, e.g. "🔥 3-day streak"
fn streak_label(count: u32, use_emoji: bool) -> String {
    let days = if count == 1 { "day" } else { "days" };
    if use_emoji {
        format!("🔥 {} {} streak", count, days)
    } else {
        format!("Streak: {} {}", count, days)
    }
}

/// Render the header: date, streak, preferences and today's progress
pub fn render_header_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.planner.theme;
    let use_emoji = app.config.display.use_emoji;
    let stats = app.stats();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(" dayplan ", title_style(theme)));

    let mut first_line = vec![
        Span::styled(format_long_date(app.today), title_style(theme)),
        Span::raw("   "),
        Span::raw(streak_label(app.planner.streak.count, use_emoji)),
    ];
    if let Some(status) = &app.status {
        first_line.push(Span::raw("   "));
        first_line.push(Span::styled(status.clone(), error_style()));
    }

    let mood = match app.planner.mood {
        Some(mood) if use_emoji => format!("{} {}", mood.emoji(), mood),
        Some(mood) => mood.to_string(),
        None => "-".to_string(),
    };
    let second_line = Line::from(vec![
        Span::raw(format!("Vibe: {}", app.planner.vibe.label())),
        Span::raw("   "),
        Span::raw(format!("Mood: {}", mood)),
        Span::raw("   "),
        Span::raw(format!("Theme: {}", theme)),
    ]);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Text lines
            Constraint::Length(1), // Progress gauge
        ])
        .split(block.inner(area));

    let gauge = Gauge::default()
        .gauge_style(gauge_style(theme))
        .percent(u16::from(stats.progress_percent))
        .label(format!(
            "{}/{} done ({}%)",
            stats.completed, stats.total, stats.progress_percent
        ));

    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(vec![Line::from(first_line), second_line]),
        chunks[0],
    );
    f.render_widget(gauge, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streak_label() {
        assert_eq!(streak_label(1, true), "🔥 1 day streak");
        assert_eq!(streak_label(4, false), "Streak: 4 days");
    }
}
