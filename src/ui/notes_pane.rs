use crate::app::AppState;
use crate::domain::UiMode;
use crate::ui::styles::{border_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Row and column of a byte offset in `text`, counted in lines and chars
fn cursor_position(text: &str, byte_pos: usize) -> (usize, usize) {
    let before = &text[..byte_pos];
    let row = before.matches('\n').count();
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
    (row, column)
}

/// Render the notes pane, editable in place
pub fn render_notes_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let theme = app.planner.theme;
    let is_editing = app.ui_mode == UiMode::EditingNotes;

    let title = if is_editing {
        " 📝 Notes - [Editing, Esc to finish] "
    } else {
        " 📝 Notes "
    };

    let border = if is_editing {
        selected_style(theme)
    } else {
        border_style(theme)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(Span::styled(title, title_style(theme)));

    let lines: Vec<Line> = if app.planner.notes.is_empty() && !is_editing {
        vec![Line::styled("Press 'n' to write notes for today.", hint_style())]
    } else {
        app.planner
            .notes
            .split('\n')
            .map(|line| Line::raw(line.to_string()))
            .collect()
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);

    // Show cursor when editing
    if is_editing {
        let (row, column) = cursor_position(&app.planner.notes, app.notes_cursor_pos);

        // Account for the border
        let cursor_x = area.x + 1 + column as u16;
        let cursor_y = area.y + 1 + row as u16;

        if cursor_x < area.x + area.width.saturating_sub(1)
            && cursor_y < area.y + area.height.saturating_sub(1)
        {
            f.set_cursor(cursor_x, cursor_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cursor_position() {
        assert_eq!(cursor_position("", 0), (0, 0));
        assert_eq!(cursor_position("ab\ncd", 5), (1, 2));
        // Right after a newline sits at the start of the next row
        assert_eq!(cursor_position("ab\n", 3), (1, 0));
        assert_eq!(cursor_position("né", 3), (0, 2));
    }
}
