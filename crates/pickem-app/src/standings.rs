// Read-side queries: leaderboards, a player's pick breakdown, the team
// overview, and pick popularity. Everything is recomputed from the store on
// each call.

use std::collections::HashMap;

use pickem_core::leaderboard::{Leaderboards, MainTieBreak};
use pickem_core::model::{normalize_email, Player, Team, TeamId};
use pickem_core::scoring::{score_player, team_points, PlayerScores};
use pickem_core::store::{PickemStore, StoreResult};
use pickem_core::tier::Tier;
use serde::Serialize;

/// One picked team with the points it currently costs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickLine {
    pub team: String,
    pub record: String,
    pub conf_record: String,
    pub tier: Option<Tier>,
    pub points: u32,
}

/// A single player's picks and scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBreakdown {
    pub player: Player,
    pub lines: Vec<PickLine>,
    pub scores: PlayerScores,
}

/// A team plus how many players picked it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOverviewRow {
    pub team: Team,
    pub picked_by: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickPopularity {
    pub team: String,
    pub tier: Option<Tier>,
    pub count: usize,
}

pub struct StandingsService<'a, S: PickemStore + ?Sized> {
    store: &'a S,
    tie_break: MainTieBreak,
}

impl<'a, S: PickemStore + ?Sized> StandingsService<'a, S> {
    pub fn new(store: &'a S, tie_break: MainTieBreak) -> Self {
        Self { store, tie_break }
    }

    /// Every player's scores from a single `all_picks` read of the store.
    pub fn scored_players(&self) -> StoreResult<Vec<(Player, PlayerScores)>> {
        Ok(self
            .store
            .all_picks()?
            .into_iter()
            .map(|(player, picks)| {
                let scores = score_player(&picks);
                (player, scores)
            })
            .collect())
    }

    pub fn leaderboards(&self) -> StoreResult<Leaderboards> {
        Ok(Leaderboards::build(&self.scored_players()?, self.tie_break))
    }

    /// Breakdown for the player with `email`, or `None` if nobody has
    /// registered it.
    pub fn player_breakdown(&self, email: &str) -> StoreResult<Option<PlayerBreakdown>> {
        let email = normalize_email(email);
        let Some(player) = self.store.players()?.into_iter().find(|p| p.email == email) else {
            return Ok(None);
        };
        let picks = self.store.picks_for_player(player.id)?;
        let lines = picks
            .iter()
            .map(|t| PickLine {
                team: t.name.clone(),
                record: t.record(),
                conf_record: t.conf_record(),
                tier: t.tier,
                points: team_points(t),
            })
            .collect();
        Ok(Some(PlayerBreakdown {
            player,
            lines,
            scores: score_player(&picks),
        }))
    }

    /// All teams sorted by name with their pick counts.
    pub fn team_overview(&self) -> StoreResult<Vec<TeamOverviewRow>> {
        let counts = self.pick_counts()?;
        let mut rows: Vec<TeamOverviewRow> = self
            .store
            .teams()?
            .into_iter()
            .map(|team| TeamOverviewRow {
                picked_by: counts.get(&team.id).copied().unwrap_or(0),
                team,
            })
            .collect();
        rows.sort_by(|a, b| a.team.name.cmp(&b.team.name));
        Ok(rows)
    }

    /// Picked teams, most popular first, ties by name.
    pub fn pick_popularity(&self) -> StoreResult<Vec<PickPopularity>> {
        let mut by_team: HashMap<TeamId, PickPopularity> = HashMap::new();
        for (_, picks) in self.store.all_picks()? {
            for team in picks {
                by_team
                    .entry(team.id)
                    .or_insert_with(|| PickPopularity {
                        team: team.name.clone(),
                        tier: team.tier,
                        count: 0,
                    })
                    .count += 1;
            }
        }
        let mut rows: Vec<PickPopularity> = by_team.into_values().collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.team.cmp(&b.team)));
        Ok(rows)
    }

    fn pick_counts(&self) -> StoreResult<HashMap<TeamId, usize>> {
        let mut counts = HashMap::new();
        for (_, picks) in self.store.all_picks()? {
            for team in picks {
                *counts.entry(team.id).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }
}
