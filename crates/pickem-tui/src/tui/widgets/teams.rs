// Teams widget: every team with record, preseason rank, tier, and how many
// players picked it.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use pickem_core::tier::Tier;

use super::scrolled;
use crate::report::{rank_cell, tier_cell};
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec![
        Cell::from("Team"),
        Cell::from("Record"),
        Cell::from("Conf"),
        Cell::from("Rank"),
        Cell::from("Tier"),
        Cell::from("Picked"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let visible: Vec<_> = state
        .data
        .teams
        .iter()
        .filter(|row| state.matches_filter(&row.team.name))
        .collect();

    let rows: Vec<Row> = if visible.is_empty() {
        vec![Row::new(vec![Cell::from("  No team data available")])]
    } else {
        scrolled(visible, state.scroll())
            .into_iter()
            .map(|row| {
                let t = &row.team;
                Row::new(vec![
                    Cell::from(t.name.clone()),
                    Cell::from(t.record()),
                    Cell::from(t.conf_record()),
                    Cell::from(rank_cell(t.preseason_rank)),
                    Cell::from(tier_cell(t.tier)),
                    Cell::from(row.picked_by.to_string()),
                ])
                .style(Style::default().fg(tier_color(t.tier)))
            })
            .collect()
    };

    let widths = [
        Constraint::Min(18),
        Constraint::Length(9),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(7),
    ];

    let title = format!("Teams ({})", state.data.teams.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// Row color by tier; unranked teams are dimmed.
pub fn tier_color(tier: Option<Tier>) -> Color {
    match tier {
        Some(Tier::One) => Color::Yellow,
        Some(Tier::Two) => Color::Cyan,
        Some(Tier::Three) => Color::Green,
        Some(Tier::Four) => Color::White,
        Some(Tier::Five) => Color::Magenta,
        None => Color::DarkGray,
    }
}
