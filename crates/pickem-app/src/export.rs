// CSV export of the team table.

use std::io::Write;

use anyhow::{Context, Result};
use pickem_core::store::PickemStore;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct TeamRow<'a> {
    team: &'a str,
    wins: u32,
    losses: u32,
    ties: u32,
    conf_wins: u32,
    conf_losses: u32,
    preseason_rank: Option<u32>,
    tier: Option<u8>,
}

/// Write every team as CSV (header included). Unranked teams leave
/// `preseason_rank` and `tier` blank. Returns the number of rows written.
pub fn export_teams_csv<S, W>(store: &S, writer: W) -> Result<usize>
where
    S: PickemStore + ?Sized,
    W: Write,
{
    let teams = store.teams().context("failed to load teams for export")?;
    let mut csv = csv::Writer::from_writer(writer);
    for t in &teams {
        csv.serialize(TeamRow {
            team: &t.name,
            wins: t.wins,
            losses: t.losses,
            ties: t.ties,
            conf_wins: t.conf_wins,
            conf_losses: t.conf_losses,
            preseason_rank: t.preseason_rank,
            tier: t.tier.map(|tier| tier.number()),
        })
        .context("failed to write team row")?;
    }
    csv.flush().context("failed to flush team CSV")?;
    Ok(teams.len())
}
