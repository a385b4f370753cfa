use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub header_area: Rect,
    pub task_area: Rect,
    pub timer_area: Rect,
    pub notes_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Header: date, streak, progress (5 rows)
/// - Main area: Tasks (60%) | Timer above Notes (40%)
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Length(5), // Header
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let horizontal_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Task list
            Constraint::Percentage(40), // Timer + notes
        ])
        .split(main_chunks[2]);

    let right_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Timer
            Constraint::Min(0),    // Notes
        ])
        .split(horizontal_split[1]);

    MainLayout {
        keybindings_area: main_chunks[0],
        header_area: main_chunks[1],
        task_area: horizontal_split[0],
        timer_area: right_split[0],
        notes_area: right_split[1],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 100, 50);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.header_area.height, 5);
        assert_eq!(layout.timer_area.height, 6);
        assert!(layout.task_area.height > 0);
        assert!(layout.notes_area.height > 0);
        assert_eq!(layout.task_area.width + layout.timer_area.width, 100);
        assert_eq!(layout.timer_area.x, layout.notes_area.x);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area, 12);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 12);
    }
}
