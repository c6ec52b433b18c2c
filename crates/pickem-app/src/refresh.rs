// Season data refresh and preseason rank import.

use anyhow::{Context, Result};
use pickem_cfb::SportsDataProvider;
use pickem_core::db::Database;
use pickem_core::model::PreseasonRank;
use pickem_core::tier::classify;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshSummary {
    pub year: i32,
    /// Teams inserted or overwritten.
    pub updated: usize,
}

/// Pull current records from `provider` and write them in one transaction.
/// Preseason ranks and tiers are never touched by a refresh.
pub async fn refresh_records(
    provider: &dyn SportsDataProvider,
    db: &Database,
    year: i32,
) -> Result<RefreshSummary> {
    let records = provider
        .fetch_team_records(year)
        .await
        .with_context(|| format!("failed to fetch {year} team records"))?;
    if records.is_empty() {
        warn!("provider returned no team records for {year}");
    }
    let updated = db
        .apply_team_records(&records)
        .context("failed to store team records")?;
    info!("refreshed {updated} team records for {year}");
    Ok(RefreshSummary { year, updated })
}

// ---------------------------------------------------------------------------
// Rank import
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RankImportSummary {
    /// Teams whose rank (and tier) was written, including ones cleared to
    /// unranked.
    pub written: usize,
    /// Of `written`, how many were set to unranked.
    pub unranked: usize,
    /// Entries rejected because the rank cannot be classified.
    pub invalid: Vec<(String, i64)>,
    /// Entries naming a team that is not in the database.
    pub unknown_teams: Vec<String>,
}

/// Classify and store preseason ranks. Invalid ranks are reported and
/// skipped; every other entry is written together.
pub fn import_ranks(db: &Database, ranks: &[PreseasonRank]) -> Result<RankImportSummary> {
    let mut summary = RankImportSummary::default();
    let mut accepted = Vec::with_capacity(ranks.len());

    for entry in ranks {
        match classify(entry.rank) {
            Ok(_) => {
                // classify() accepted it, so any rank present is >= 1.
                let rank = entry.rank.map(|r| u32::try_from(r).unwrap_or(u32::MAX));
                accepted.push((entry.team.clone(), rank));
            }
            Err(e) => {
                warn!("rejecting rank for '{}': {e}", entry.team);
                summary.invalid.push((entry.team.clone(), entry.rank.unwrap_or_default()));
            }
        }
    }

    let unknown = db
        .set_preseason_ranks(&accepted)
        .context("failed to store preseason ranks")?;
    for name in &unknown {
        warn!("rank given for unknown team '{name}'");
    }

    summary.written = accepted.len() - unknown.len();
    summary.unranked = accepted
        .iter()
        .filter(|(name, rank)| rank.is_none() && !unknown.contains(name))
        .count();
    summary.unknown_teams = unknown;
    info!(
        written = summary.written,
        invalid = summary.invalid.len(),
        unknown = summary.unknown_teams.len(),
        "imported preseason ranks"
    );
    Ok(summary)
}
