// Decoding of the CFBD `/records` response into team record updates.
//
// The payload is walked as untyped JSON so one odd row (missing counts, a
// team from another division) is skipped instead of failing the whole
// refresh.

use pickem_core::model::{TeamRecordUpdate, TeamStats};
use serde_json::Value;
use tracing::{debug, warn};

/// Extract records for teams in `classification` (case-insensitive).
///
/// Returns `Err` only when the body is not a JSON array.
pub fn parse_team_records(body: &Value, classification: &str) -> Result<Vec<TeamRecordUpdate>, String> {
    let rows = body
        .as_array()
        .ok_or_else(|| "expected a JSON array of team records".to_string())?;

    let mut records = Vec::with_capacity(rows.len());
    let mut other_divisions = 0usize;

    for row in rows {
        let team = row.get("team").and_then(Value::as_str).map(str::trim);
        let Some(team) = team.filter(|t| !t.is_empty()) else {
            warn!("skipping record row without a team name");
            continue;
        };

        let row_class = row.get("classification").and_then(Value::as_str).unwrap_or("");
        if !row_class.eq_ignore_ascii_case(classification) {
            other_divisions += 1;
            continue;
        }

        match parse_stats(row) {
            Some(stats) => records.push(TeamRecordUpdate {
                name: team.to_string(),
                stats,
            }),
            None => warn!("skipping record for '{team}': missing or invalid win/loss counts"),
        }
    }

    debug!(
        kept = records.len(),
        skipped_other_divisions = other_divisions,
        "parsed team records"
    );
    Ok(records)
}

fn parse_stats(row: &Value) -> Option<TeamStats> {
    let total = row.get("total")?;
    let conf = row.get("conferenceGames");
    Some(TeamStats {
        wins: count(total, "wins")?,
        losses: count(total, "losses")?,
        ties: optional_count(total, "ties")?,
        conf_wins: match conf {
            Some(c) => optional_count(c, "wins")?,
            None => 0,
        },
        conf_losses: match conf {
            Some(c) => optional_count(c, "losses")?,
            None => 0,
        },
    })
}

/// A required non-negative integer field.
fn count(obj: &Value, key: &str) -> Option<u32> {
    obj.get(key)?.as_u64().and_then(|n| u32::try_from(n).ok())
}

/// An optional non-negative integer field: absent or null reads as 0, a
/// present but malformed value is an error (`None`).
fn optional_count(obj: &Value, key: &str) -> Option<u32> {
    match obj.get(key) {
        None | Some(Value::Null) => Some(0),
        Some(_) => count(obj, key),
    }
}
