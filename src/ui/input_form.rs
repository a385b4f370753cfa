use crate::app::{AppState, FormField};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style, priority_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_label(label: &'static str, active: bool) -> Line<'static> {
    if active {
        Line::from(vec![Span::raw(label), Span::styled(" (editing)", modal_title_style())])
    } else {
        Line::raw(label)
    }
}

/// Render the add-task form
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let form = &app.input_form;
    let modal_area = create_modal_area(area, 14);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = Vec::new();

    // Text field
    lines.push(Line::raw(""));
    let editing_text = form.editing_field == FormField::Text;
    lines.push(field_label("Task:", editing_text));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(form.draft.text.clone(), modal_title_style()),
        if editing_text {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ]));
    lines.push(Line::raw(""));

    // Priority field
    lines.push(field_label("Priority (h/m/l or Space):", form.editing_field == FormField::Priority));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(form.draft.priority.to_string(), priority_style(form.draft.priority)),
    ]));
    lines.push(Line::raw(""));

    // Recurrence field
    let recurrence = match form.draft.recurrence() {
        Some(kind) => kind.to_string(),
        None => "no".to_string(),
    };
    lines.push(field_label("Repeat (Space to change):", form.editing_field == FormField::Recurrence));
    lines.push(Line::from(vec![
        Span::raw("> "),
        Span::styled(recurrence, modal_title_style()),
    ]));
    lines.push(Line::raw(""));

    // Instructions
    lines.push(Line::raw("Tab to switch fields  ·  Enter to add  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
