use crate::domain::{Priority, Theme};
use ratatui::style::{Color, Modifier, Style};

/// Colors a named theme maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: Color,
    pub border: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub gauge: Color,
}

/// Terminal palette for each theme
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Warm => Palette {
            accent: Color::LightYellow,
            border: Color::Rgb(205, 133, 63),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(255, 200, 120),
            gauge: Color::Rgb(230, 126, 34),
        },
        Theme::Dark => Palette {
            accent: Color::White,
            border: Color::DarkGray,
            highlight_fg: Color::White,
            highlight_bg: Color::Rgb(70, 70, 90),
            gauge: Color::Gray,
        },
        Theme::Ocean => Palette {
            accent: Color::Cyan,
            border: Color::Blue,
            highlight_fg: Color::Black,
            highlight_bg: Color::LightCyan,
            gauge: Color::Rgb(30, 144, 255),
        },
        Theme::Sunset => Palette {
            accent: Color::LightMagenta,
            border: Color::Rgb(255, 94, 98),
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(255, 153, 102),
            gauge: Color::Magenta,
        },
        Theme::Forest => Palette {
            accent: Color::LightGreen,
            border: Color::Green,
            highlight_fg: Color::Black,
            highlight_bg: Color::Rgb(144, 190, 109),
            gauge: Color::Rgb(34, 139, 34),
        },
    }
}

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style(theme: Theme) -> Style {
    let p = palette(theme);
    Style::default()
        .fg(p.highlight_fg)
        .bg(p.highlight_bg)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style(theme: Theme) -> Style {
    Style::default()
        .fg(palette(theme).accent)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).border)
}

/// Progress gauge style
pub fn gauge_style(theme: Theme) -> Style {
    Style::default().fg(palette(theme).gauge).bg(Color::DarkGray)
}

/// Running timer style
pub fn running_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

/// Paused timer style
pub fn paused_style() -> Style {
    Style::default().fg(Color::Yellow)
}

/// Priority badge color
pub fn priority_style(priority: Priority) -> Style {
    match priority {
        Priority::High => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        Priority::Medium => Style::default().fg(Color::Yellow),
        Priority::Low => Style::default().fg(Color::Gray),
    }
}

/// Recurring marker style
pub fn recurring_style() -> Style {
    Style::default().fg(Color::Blue)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}
