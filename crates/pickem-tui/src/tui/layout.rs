// Screen layout for the standings dashboard:
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +-------------------------+------------------------+
// | Main Panel (65%)         | Summary (9 rows)       |
// |                          +------------------------+
// |                          | Most Picked (fill)     |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// Top row: season and tab indicator.
    pub status_bar: Rect,
    /// Tab-switched leaderboard or team table.
    pub main_panel: Rect,
    /// Sidebar top: pool totals and current leaders.
    pub summary: Rect,
    /// Sidebar bottom: most-picked teams.
    pub popularity: Rect,
    /// Bottom row: keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(10),   // middle section
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(vertical[1]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(horizontal[1]);

    AppLayout {
        status_bar: vertical[0],
        main_panel: horizontal[0],
        summary: sidebar[0],
        popularity: sidebar[1],
        help_bar: vertical[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("main_panel", layout.main_panel),
            ("summary", layout.summary),
            ("popularity", layout.popularity),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in &rects {
            assert!(
                rect.width > 0 && rect.height > 0,
                "{} has zero area: {:?}",
                name,
                rect
            );
        }
    }

    #[test]
    fn bars_are_one_row() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.help_bar.y, 49);
    }

    #[test]
    fn main_panel_is_wider_than_sidebar() {
        let layout = build_layout(test_area());
        assert!(layout.main_panel.width > layout.summary.width);
        assert_eq!(layout.summary.width, layout.popularity.width);
        assert_eq!(layout.summary.height, 9);
        assert!(layout.popularity.y > layout.summary.y);
    }
}
