// Status bar widget: season, tab indicator, and the last reload message.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::{Tab, ViewState};

/// Layout: [season] | [tab bar] | [status message]
pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![Span::styled(
        format!(" CFB Pick'em {} ", state.season),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
    spans.extend(tab_spans(state.active_tab));

    if let Some(message) = &state.status_message {
        spans.push(Span::styled("| ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

/// "[1:Standings] [2:Rat King] [3:Conf Champ] [4:Teams]" with the active tab
/// highlighted.
pub fn tab_spans(active: Tab) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, tab) in Tab::ALL.into_iter().enumerate() {
        let style = if tab == active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!("[{}:{}]", i + 1, tab.label()), style));
        spans.push(Span::raw(" "));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::buffer_text;

    #[test]
    fn tab_spans_highlight_active() {
        let spans = tab_spans(Tab::ConfChamp);
        // 0=[1:Standings], 1=" ", 2=[2:Rat King], 3=" ", 4=[3:Conf Champ]
        assert_eq!(spans[4].content, "[3:Conf Champ]");
        assert!(spans[4].style.add_modifier.contains(Modifier::BOLD));
        assert!(!spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn render_shows_season_and_message() {
        let backend = ratatui::backend::TestBackend::new(120, 1);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let mut state = ViewState::default();
        state.season = 2025;
        state.status_message = Some("Reloaded: 3 players, 130 teams".into());
        terminal
            .draw(|frame| render(frame, frame.area(), &state))
            .unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("CFB Pick'em 2025"));
        assert!(text.contains("[4:Teams]"));
        assert!(text.contains("Reloaded: 3 players"));
    }
}
