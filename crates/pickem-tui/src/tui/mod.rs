// TUI dashboard: layout, input handling, and widget rendering.
//
// The dashboard reads everything from the store once into `DashboardData`,
// renders it at ~30 fps, and reloads on demand. Nothing here writes to the
// store.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use pickem_app::standings::{PickPopularity, StandingsService, TeamOverviewRow};
use pickem_core::config::Config;
use pickem_core::db::Database;
use pickem_core::leaderboard::{Leaderboards, MainTieBreak};
use pickem_core::store::{PickemStore, StoreResult};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tracing::{info, warn};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// Tabs and commands
// ---------------------------------------------------------------------------

/// Which view the main panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Standings,
    RatKing,
    ConfChamp,
    Teams,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Standings, Tab::RatKing, Tab::ConfChamp, Tab::Teams];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Standings => "Standings",
            Tab::RatKing => "Rat King",
            Tab::ConfChamp => "Conf Champ",
            Tab::Teams => "Teams",
        }
    }

    /// Key for this tab's entry in `ViewState::scroll_offset`.
    pub fn scroll_key(self) -> &'static str {
        match self {
            Tab::Standings => "standings",
            Tab::RatKing => "rat_king",
            Tab::ConfChamp => "conf_champ",
            Tab::Teams => "teams",
        }
    }

    pub fn next(self) -> Tab {
        let idx = Tab::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Tab::ALL[(idx + 1) % Tab::ALL.len()]
    }
}

/// Key presses the run loop has to act on (everything else is handled
/// inside `ViewState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Reload,
    Quit,
}

// ---------------------------------------------------------------------------
// Dashboard data
// ---------------------------------------------------------------------------

/// One consistent read of everything the dashboard shows.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub boards: Leaderboards,
    pub teams: Vec<TeamOverviewRow>,
    pub popularity: Vec<PickPopularity>,
    pub players: usize,
    pub paid_players: usize,
}

impl DashboardData {
    pub fn load<S: PickemStore + ?Sized>(store: &S, tie_break: MainTieBreak) -> StoreResult<Self> {
        let standings = StandingsService::new(store, tie_break);
        let players = store.players()?;
        Ok(Self {
            boards: standings.leaderboards()?,
            teams: standings.team_overview()?,
            popularity: standings.pick_popularity()?,
            paid_players: players.iter().filter(|p| p.paid).count(),
            players: players.len(),
        })
    }

    pub fn ranked_teams(&self) -> usize {
        self.teams.iter().filter(|r| r.team.tier.is_some()).count()
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state: the loaded data plus navigation.
pub struct ViewState {
    pub data: DashboardData,
    /// Season shown in the status bar.
    pub season: i32,
    pub active_tab: Tab,
    /// Per-tab scroll offsets (keyed by `Tab::scroll_key`).
    pub scroll_offset: HashMap<String, usize>,
    /// Case-insensitive substring filter on player or team names.
    pub filter_text: String,
    pub filter_mode: bool,
    pub confirm_quit: bool,
    /// Last reload result shown in the status bar.
    pub status_message: Option<String>,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            data: DashboardData::default(),
            season: 0,
            active_tab: Tab::Standings,
            scroll_offset: HashMap::new(),
            filter_text: String::new(),
            filter_mode: false,
            confirm_quit: false,
            status_message: None,
        }
    }
}

impl ViewState {
    pub fn new(data: DashboardData, season: i32) -> Self {
        ViewState {
            data,
            season,
            ..ViewState::default()
        }
    }

    /// Scroll offset for the active tab.
    pub fn scroll(&self) -> usize {
        self.scroll_offset
            .get(self.active_tab.scroll_key())
            .copied()
            .unwrap_or(0)
    }

    /// Whether `name` passes the current filter.
    pub fn matches_filter(&self, name: &str) -> bool {
        self.filter_text.is_empty()
            || name
                .to_lowercase()
                .contains(&self.filter_text.to_lowercase())
    }

    /// Swap in freshly loaded data. Scroll offsets are clamped later by the
    /// widgets, so they survive a reload.
    pub fn apply_reload(&mut self, data: DashboardData) {
        self.status_message = Some(format!(
            "Reloaded: {} players, {} teams",
            data.players,
            data.teams.len()
        ));
        self.data = data;
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    match state.active_tab {
        Tab::Teams => widgets::teams::render(frame, layout.main_panel, state),
        _ => widgets::standings::render(frame, layout.main_panel, state),
    }
    widgets::summary::render(frame, layout.summary, state);
    widgets::popularity::render(frame, layout.popularity, state);
    render_help_bar(frame, &layout, state);
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let text = if state.confirm_quit {
        " Quit? y:Yes | n:No".to_string()
    } else if state.filter_mode {
        format!(" Filter: {}_  (Enter:Keep | Esc:Clear)", state.filter_text)
    } else {
        " q:Quit | 1-4/Tab:Views | j/k:Scroll | /:Filter | r:Reload".to_string()
    };
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the standings dashboard until the user quits.
///
/// Data is loaded before the terminal switches to raw mode so a broken
/// database surfaces as a normal error.
pub async fn run(db: &Database, config: &Config) -> anyhow::Result<()> {
    let data = DashboardData::load(db, config.main_tie_break)?;
    info!(
        "dashboard loaded: {} players, {} teams",
        data.players,
        data.teams.len()
    );
    let mut view_state = ViewState::new(data, config.season.year);

    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        match input::handle_key(key_event, &mut view_state) {
                            Some(UserCommand::Quit) => break Ok(()),
                            Some(UserCommand::Reload) => {
                                match DashboardData::load(db, config.main_tie_break) {
                                    Ok(data) => view_state.apply_reload(data),
                                    Err(e) => {
                                        warn!("dashboard reload failed: {e}");
                                        view_state.status_message =
                                            Some(format!("Reload failed: {e}"));
                                    }
                                }
                            }
                            None => {}
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(e.into()),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(e.into());
                }
            }
        }
    };

    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

/// Flatten a rendered buffer into one string for `contains` checks.
#[cfg(test)]
pub(crate) fn buffer_text(buffer: &ratatui::buffer::Buffer) -> String {
    buffer.content.iter().map(|cell| cell.symbol()).collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use pickem_core::db::Database;
    use pickem_core::model::{TeamRecordUpdate, TeamStats};
    use pickem_core::store::PickemStore;

    /// Two players over three ranked teams and one unranked team.
    pub fn seeded_db() -> Database {
        let db = Database::open(":memory:").unwrap();
        let mut ids = Vec::new();
        for (name, wins, losses, rank) in [
            ("Alabama", 10, 2, Some(3)),
            ("Buffalo", 6, 6, Some(90)),
            ("Clemson", 9, 3, Some(20)),
            ("Duke", 5, 7, None),
        ] {
            let id = db
                .upsert_team(&TeamRecordUpdate {
                    name: name.into(),
                    stats: TeamStats {
                        wins,
                        losses,
                        ties: 0,
                        conf_wins: wins,
                        conf_losses: losses,
                    },
                })
                .unwrap();
            db.set_preseason_ranks(&[(name.to_string(), rank)]).unwrap();
            ids.push(id);
        }
        let one = db.add_player("One", "one@example.com", true).unwrap();
        let two = db.add_player("Two", "two@example.com", false).unwrap();
        db.replace_picks(one.id, &[ids[0], ids[1]]).unwrap();
        db.replace_picks(two.id, &[ids[1], ids[2]]).unwrap();
        db
    }
}
