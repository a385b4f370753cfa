use crate::app::AppState;
use crate::domain::{completion_box, priority_badge, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, hint_style, priority_style, recurring_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task list in display order (priority, then insertion)
pub fn render_task_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.planner.theme;
    let stats = app.stats();
    let title = format!(" Today's Tasks ({}/{}) ", stats.completed, stats.total);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(theme))
        .title(Span::styled(title, title_style(theme)));

    if app.planner.tasks.is_empty() {
        let hint = Paragraph::new(Line::styled(
            "No tasks yet. Press 'a' to add one.",
            hint_style(),
        ))
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let use_emoji = app.config.display.use_emoji;
    let items: Vec<ListItem> = app
        .planner
        .sorted_for_display()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, use_emoji);
            let style = if idx == app.selected_index {
                selected_style(theme)
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Create a single task row
/// Format: [ ] !!! Write proposal  ↻ daily
fn create_task_line(task: &Task, use_emoji: bool) -> Line<'static> {
    let mut spans = vec![
        Span::raw(format!("{} ", completion_box(task))),
        Span::styled(
            format!("{} ", priority_badge(task.priority)),
            priority_style(task.priority),
        ),
    ];

    if task.completed {
        spans.push(Span::styled(task.text.clone(), done_style()));
    } else {
        spans.push(Span::raw(task.text.clone()));
    }

    if let Some(kind) = task.recurrence() {
        let marker = if use_emoji { "🔁" } else { "↻" };
        spans.push(Span::styled(format!("  {} {}", marker, kind), recurring_style()));
    }

    Line::from(spans)
}
