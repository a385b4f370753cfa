use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the one-shot notice: a finished timer phase or a new day
pub fn render_notice_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let title = match app.ui_mode {
        UiMode::PhaseFinished => " ⏰ Time's Up ",
        UiMode::DayChanged => " \u{1F305} New Day ",
        _ => return,
    };
    let Some(message) = &app.notice else {
        return;
    };

    let modal_area = create_modal_area(area, 8);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  {}", message)),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [Enter]", modal_title_style()),
            Span::raw(" OK  "),
            Span::styled("[q]", modal_title_style()),
            Span::raw(" Quit"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
