// Pool summary: entry counts and the current leader of each game.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::report::rat_king_cell;
use crate::tui::{DashboardData, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(summary_lines(&state.data))
        .block(Block::default().borders(Borders::ALL).title("Pool"));
    frame.render_widget(paragraph, area);
}

pub fn summary_lines(data: &DashboardData) -> Vec<Line<'static>> {
    let label = Style::default().fg(Color::Gray);
    let value = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let main_leader = data
        .boards
        .main
        .first()
        .map(|s| format!("{} ({})", s.player.name, s.score.main));
    let rat_king_leader = data
        .boards
        .rat_king
        .first()
        .filter(|s| s.score.has_data())
        .map(|s| format!("{} ({})", s.player.name, rat_king_cell(s.score)));
    let conf_leader = data
        .boards
        .conf_champ
        .first()
        .map(|s| format!("{} ({:+})", s.player.name, s.score));

    let rows = [
        (
            "Players",
            format!("{} ({} paid)", data.players, data.paid_players),
        ),
        (
            "Teams",
            format!("{} ({} ranked)", data.teams.len(), data.ranked_teams()),
        ),
        ("Leader", main_leader.unwrap_or_else(|| "--".into())),
        ("Rat King", rat_king_leader.unwrap_or_else(|| "--".into())),
        ("Conf Champ", conf_leader.unwrap_or_else(|| "--".into())),
    ];

    rows.into_iter()
        .map(|(name, text)| {
            Line::from(vec![
                Span::styled(format!("{name:<11}"), label),
                Span::styled(text, value),
            ])
        })
        .collect()
}
