// Scoring engine: the main pick'em score and the two side pots.
//
// Every function here is a pure computation over a player's picked teams as
// they stand right now. Nothing is cached; standings are recomputed from the
// current team snapshot on every query.

use serde::Serialize;

use crate::model::Team;
use crate::tier::{points_per_loss, Tier};

// ---------------------------------------------------------------------------
// Rat King score
// ---------------------------------------------------------------------------

/// Rat King side-pot score: average win rate across tier-5 picks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum RatKingScore {
    /// The player has no tier-5 picks. Numerically 0, but never a winning
    /// value when sorting.
    NoData,
    /// Mean of per-team win rates, in `0.0..=1.0`.
    Average(f64),
}

impl RatKingScore {
    /// Numeric value for display; `NoData` reads as 0.
    pub fn value(&self) -> f64 {
        match self {
            RatKingScore::NoData => 0.0,
            RatKingScore::Average(avg) => *avg,
        }
    }

    pub fn has_data(&self) -> bool {
        matches!(self, RatKingScore::Average(_))
    }
}

// ---------------------------------------------------------------------------
// Individual computations
// ---------------------------------------------------------------------------

/// Points a single team contributes to the main score.
pub fn team_points(team: &Team) -> u32 {
    team.losses * points_per_loss(team.tier)
}

/// Main game score: sum of losses weighted by each team's tier. Lower wins.
pub fn main_score(picks: &[Team]) -> u32 {
    picks.iter().map(team_points).sum()
}

/// Win rate for one team, `wins / (wins + losses)`. Teams that have not
/// played a decided game have a win rate of 0.
pub fn win_rate(team: &Team) -> f64 {
    let decided = team.decided_games();
    if decided == 0 {
        return 0.0;
    }
    f64::from(team.wins) / f64::from(decided)
}

/// Rat King score over the player's tier-5 picks.
pub fn rat_king_score(picks: &[Team]) -> RatKingScore {
    let rates: Vec<f64> = picks
        .iter()
        .filter(|t| t.tier == Some(Tier::Five))
        .map(win_rate)
        .collect();

    if rates.is_empty() {
        return RatKingScore::NoData;
    }
    RatKingScore::Average(rates.iter().sum::<f64>() / rates.len() as f64)
}

/// Conference Champ score: sum of conference win margins across all picks.
pub fn conference_margin(picks: &[Team]) -> i64 {
    picks
        .iter()
        .map(|t| i64::from(t.conf_wins) - i64::from(t.conf_losses))
        .sum()
}

/// Total wins across all picks (main-game tie-break input).
pub fn total_wins(picks: &[Team]) -> u32 {
    picks.iter().map(|t| t.wins).sum()
}

// ---------------------------------------------------------------------------
// Bundled per-player scores
// ---------------------------------------------------------------------------

/// All scores for one player, computed from a single pick snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerScores {
    pub main: u32,
    pub rat_king: RatKingScore,
    pub conf_margin: i64,
    pub total_wins: u32,
}

/// Compute every score for a player's picks in one pass over the snapshot.
pub fn score_player(picks: &[Team]) -> PlayerScores {
    PlayerScores {
        main: main_score(picks),
        rat_king: rat_king_score(picks),
        conf_margin: conference_margin(picks),
        total_wins: total_wins(picks),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
