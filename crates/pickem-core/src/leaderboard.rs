// Leaderboard construction for the main game and both side pots.
//
// Ranks are 1-based sorted positions. Players with equal scores get
// consecutive ranks, not a shared one; the sort is stable so remaining ties
// keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::Player;
use crate::scoring::{PlayerScores, RatKingScore};

/// One row of a leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing<S> {
    pub rank: usize,
    pub player: Player,
    pub score: S,
}

/// Secondary ordering for players tied on main score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainTieBreak {
    /// More total wins across the player's picks ranks higher.
    #[default]
    MostWins,
    /// Keep the order players were supplied in.
    InputOrder,
}

/// Sort `entries` with `cmp` (stable) and number them from 1.
pub fn build<S>(
    mut entries: Vec<(Player, S)>,
    cmp: impl Fn(&S, &S) -> Ordering,
) -> Vec<Standing<S>> {
    entries.sort_by(|a, b| cmp(&a.1, &b.1));
    entries
        .into_iter()
        .enumerate()
        .map(|(i, (player, score))| Standing {
            rank: i + 1,
            player,
            score,
        })
        .collect()
}

/// Main game: lowest score first.
pub fn main_standings(
    entries: Vec<(Player, PlayerScores)>,
    tie_break: MainTieBreak,
) -> Vec<Standing<PlayerScores>> {
    build(entries, |a, b| {
        a.main.cmp(&b.main).then_with(|| match tie_break {
            MainTieBreak::MostWins => b.total_wins.cmp(&a.total_wins),
            MainTieBreak::InputOrder => Ordering::Equal,
        })
    })
}

/// Rat King: highest average first, players without tier-5 data last.
pub fn rat_king_standings(entries: Vec<(Player, RatKingScore)>) -> Vec<Standing<RatKingScore>> {
    build(entries, compare_rat_king)
}

fn compare_rat_king(a: &RatKingScore, b: &RatKingScore) -> Ordering {
    match (a, b) {
        (RatKingScore::Average(x), RatKingScore::Average(y)) => {
            y.partial_cmp(x).unwrap_or(Ordering::Equal)
        }
        (RatKingScore::Average(_), RatKingScore::NoData) => Ordering::Less,
        (RatKingScore::NoData, RatKingScore::Average(_)) => Ordering::Greater,
        (RatKingScore::NoData, RatKingScore::NoData) => Ordering::Equal,
    }
}

/// Conference Champ: largest conference win margin first.
pub fn conf_champ_standings(entries: Vec<(Player, i64)>) -> Vec<Standing<i64>> {
    build(entries, |a, b| b.cmp(a))
}

// ---------------------------------------------------------------------------
// All three boards at once
// ---------------------------------------------------------------------------

/// Main, Rat King, and Conference Champ standings from one scoring pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Leaderboards {
    pub main: Vec<Standing<PlayerScores>>,
    pub rat_king: Vec<Standing<RatKingScore>>,
    pub conf_champ: Vec<Standing<i64>>,
}

impl Leaderboards {
    pub fn build(scored: &[(Player, PlayerScores)], tie_break: MainTieBreak) -> Self {
        Self {
            main: main_standings(scored.to_vec(), tie_break),
            rat_king: rat_king_standings(
                scored.iter().map(|(p, s)| (p.clone(), s.rat_king)).collect(),
            ),
            conf_champ: conf_champ_standings(
                scored.iter().map(|(p, s)| (p.clone(), s.conf_margin)).collect(),
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
