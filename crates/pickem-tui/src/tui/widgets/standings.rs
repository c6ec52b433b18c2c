// Leaderboard widget: the main game, Rat King, or Conference Champ board,
// depending on the active tab.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use super::scrolled;
use crate::report::rat_king_cell;
use crate::tui::{Tab, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let boards = &state.data.boards;
    let (title, headers, body): (&str, [&str; 4], Vec<(usize, [String; 4])>) =
        match state.active_tab {
            Tab::RatKing => (
                "Rat King (tier-5 win %)",
                ["#", "Player", "Win %", "Paid"],
                boards
                    .rat_king
                    .iter()
                    .filter(|s| state.matches_filter(&s.player.name))
                    .map(|s| {
                        (
                            s.rank,
                            [
                                s.rank.to_string(),
                                s.player.name.clone(),
                                rat_king_cell(s.score),
                                paid_cell(s.player.paid),
                            ],
                        )
                    })
                    .collect(),
            ),
            Tab::ConfChamp => (
                "Conference Champ (conf margin)",
                ["#", "Player", "Margin", "Paid"],
                boards
                    .conf_champ
                    .iter()
                    .filter(|s| state.matches_filter(&s.player.name))
                    .map(|s| {
                        (
                            s.rank,
                            [
                                s.rank.to_string(),
                                s.player.name.clone(),
                                format!("{:+}", s.score),
                                paid_cell(s.player.paid),
                            ],
                        )
                    })
                    .collect(),
            ),
            _ => (
                "Standings (lowest score wins)",
                ["#", "Player", "Score", "Wins"],
                boards
                    .main
                    .iter()
                    .filter(|s| state.matches_filter(&s.player.name))
                    .map(|s| {
                        (
                            s.rank,
                            [
                                s.rank.to_string(),
                                s.player.name.clone(),
                                s.score.main.to_string(),
                                s.score.total_wins.to_string(),
                            ],
                        )
                    })
                    .collect(),
            ),
        };

    let header = Row::new(headers.map(Cell::from)).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if body.is_empty() {
        vec![Row::new(vec![Cell::from(""), Cell::from("No players yet")])]
    } else {
        scrolled(body, state.scroll())
            .into_iter()
            .map(|(rank, cells)| Row::new(cells.map(Cell::from)).style(rank_style(rank)))
            .collect()
    };

    let widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(8),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

pub fn paid_cell(paid: bool) -> String {
    let text = if paid { "yes" } else { "no" };
    text.to_string()
}

/// Leaders stand out; everyone else is plain.
pub fn rank_style(rank: usize) -> Style {
    if rank == 1 {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}
