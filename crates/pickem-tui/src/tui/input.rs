// Keyboard input handling.
//
// Translates crossterm key events into local ViewState changes (tab
// switching, scroll, filtering) or a UserCommand for the run loop.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Tab, UserCommand, ViewState};

const PAGE_SIZE: usize = 20;

/// Handle a keyboard event. Returns `Some` only for commands the run loop
/// acts on.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Windows reports both press and release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    if view_state.filter_mode {
        return handle_filter_mode(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char('1') => switch_tab(view_state, Tab::Standings),
        KeyCode::Char('2') => switch_tab(view_state, Tab::RatKing),
        KeyCode::Char('3') => switch_tab(view_state, Tab::ConfChamp),
        KeyCode::Char('4') => switch_tab(view_state, Tab::Teams),
        KeyCode::Tab => {
            let next = view_state.active_tab.next();
            switch_tab(view_state, next)
        }

        KeyCode::Up | KeyCode::Char('k') => scroll_up(view_state, 1),
        KeyCode::Down | KeyCode::Char('j') => scroll_down(view_state, 1),
        KeyCode::PageUp => scroll_up(view_state, PAGE_SIZE),
        KeyCode::PageDown => scroll_down(view_state, PAGE_SIZE),
        KeyCode::Home | KeyCode::Char('g') => {
            view_state
                .scroll_offset
                .insert(view_state.active_tab.scroll_key().to_string(), 0);
            None
        }

        KeyCode::Char('/') => {
            view_state.filter_mode = true;
            None
        }
        KeyCode::Esc => {
            view_state.filter_text.clear();
            None
        }

        KeyCode::Char('r') => Some(UserCommand::Reload),

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

fn switch_tab(view_state: &mut ViewState, tab: Tab) -> Option<UserCommand> {
    view_state.active_tab = tab;
    None
}

fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn handle_filter_mode(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Esc => {
            view_state.filter_mode = false;
            view_state.filter_text.clear();
        }
        KeyCode::Enter => {
            view_state.filter_mode = false;
        }
        KeyCode::Backspace => {
            view_state.filter_text.pop();
        }
        KeyCode::Char(c) => {
            view_state.filter_text.push(c);
        }
        _ => {}
    }
    // A new filter starts from the top.
    view_state
        .scroll_offset
        .insert(view_state.active_tab.scroll_key().to_string(), 0);
    None
}

fn scroll_up(view_state: &mut ViewState, lines: usize) -> Option<UserCommand> {
    let key = view_state.active_tab.scroll_key();
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_sub(lines);
    None
}

fn scroll_down(view_state: &mut ViewState, lines: usize) -> Option<UserCommand> {
    let key = view_state.active_tab.scroll_key();
    let offset = view_state.scroll_offset.entry(key.to_string()).or_insert(0);
    *offset = offset.saturating_add(lines);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl_key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn number_keys_switch_tabs() {
        let mut state = ViewState::default();
        for (c, tab) in [
            ('2', Tab::RatKing),
            ('3', Tab::ConfChamp),
            ('4', Tab::Teams),
            ('1', Tab::Standings),
        ] {
            assert!(handle_key(key(KeyCode::Char(c)), &mut state).is_none());
            assert_eq!(state.active_tab, tab);
        }
    }

    #[test]
    fn tab_key_cycles() {
        let mut state = ViewState::default();
        state.active_tab = Tab::Teams;
        handle_key(key(KeyCode::Tab), &mut state);
        assert_eq!(state.active_tab, Tab::Standings);
    }

    #[test]
    fn scroll_is_tracked_per_tab() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Down), &mut state);
        handle_key(key(KeyCode::Char('j')), &mut state);
        assert_eq!(state.scroll_offset["standings"], 2);

        state.active_tab = Tab::Teams;
        handle_key(key(KeyCode::PageDown), &mut state);
        assert_eq!(state.scroll_offset["teams"], 20);
        handle_key(key(KeyCode::Char('k')), &mut state);
        assert_eq!(state.scroll(), 19);
        handle_key(key(KeyCode::Char('g')), &mut state);
        assert_eq!(state.scroll(), 0);
        assert_eq!(state.scroll_offset["standings"], 2);
    }

    #[test]
    fn scroll_up_does_not_underflow() {
        let mut state = ViewState::default();
        handle_key(key(KeyCode::Up), &mut state);
        assert_eq!(state.scroll_offset["standings"], 0);
    }

    #[test]
    fn r_requests_reload() {
        let mut state = ViewState::default();
        assert_eq!(
            handle_key(key(KeyCode::Char('r')), &mut state),
            Some(UserCommand::Reload)
        );
    }

    #[test]
    fn q_asks_for_confirmation() {
        let mut state = ViewState::default();
        assert!(handle_key(key(KeyCode::Char('q')), &mut state).is_none());
        assert!(state.confirm_quit);
        // Other keys are blocked while confirming.
        assert!(handle_key(key(KeyCode::Char('2')), &mut state).is_none());
        assert_eq!(state.active_tab, Tab::Standings);
        assert!(handle_key(key(KeyCode::Char('n')), &mut state).is_none());
        assert!(!state.confirm_quit);

        handle_key(key(KeyCode::Char('q')), &mut state);
        assert_eq!(
            handle_key(key(KeyCode::Char('y')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut state = ViewState::default();
        state.filter_mode = true;
        assert_eq!(
            handle_key(ctrl_key(KeyCode::Char('c')), &mut state),
            Some(UserCommand::Quit)
        );
    }

    #[test]
    fn filter_mode_captures_text() {
        let mut state = ViewState::default();
        state.scroll_offset.insert("standings".into(), 4);
        handle_key(key(KeyCode::Char('/')), &mut state);
        assert!(state.filter_mode);
        for c in ['a', 'l', 'x'] {
            handle_key(key(KeyCode::Char(c)), &mut state);
        }
        handle_key(key(KeyCode::Backspace), &mut state);
        // 'r' and 'q' are text while filtering, not commands.
        assert!(handle_key(key(KeyCode::Char('r')), &mut state).is_none());
        assert_eq!(state.filter_text, "alr");
        assert_eq!(state.scroll(), 0);

        handle_key(key(KeyCode::Enter), &mut state);
        assert!(!state.filter_mode);
        assert_eq!(state.filter_text, "alr");

        handle_key(key(KeyCode::Esc), &mut state);
        assert!(state.filter_text.is_empty());
    }

    #[test]
    fn release_events_are_ignored() {
        let mut state = ViewState::default();
        let mut event = key(KeyCode::Char('4'));
        event.kind = KeyEventKind::Release;
        assert!(handle_key(event, &mut state).is_none());
        assert_eq!(state.active_tab, Tab::Standings);
    }
}
