// Most-picked teams across the pool.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use crate::report::tier_cell;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec![Cell::from("Team"), Cell::from("Tier"), Cell::from("Picks")])
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    // Borders and header take three rows.
    let capacity = usize::from(area.height.saturating_sub(3));
    let rows: Vec<Row> = if state.data.popularity.is_empty() {
        vec![Row::new(vec![Cell::from("  No picks yet")])]
    } else {
        state
            .data
            .popularity
            .iter()
            .take(capacity)
            .map(|p| {
                Row::new(vec![
                    Cell::from(p.team.clone()),
                    Cell::from(tier_cell(p.tier)),
                    Cell::from(p.count.to_string()),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Min(14),
        Constraint::Length(5),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Most Picked"));
    frame.render_widget(table, area);
}
