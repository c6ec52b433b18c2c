// Decoding of the CFBD `/rankings` response.
//
// The endpoint returns one entry per (season type, week), each holding every
// poll published that week. A preseason ranking is the named poll from the
// preseason entry, or from the earliest week when no preseason entry exists.

use pickem_core::model::PreseasonRank;
use serde_json::Value;
use tracing::warn;

/// Pick the earliest published ranking of `poll` (case-insensitive) from a
/// rankings response. An empty vector means the poll was not found.
///
/// Returns `Err` only when the body is not a JSON array.
pub fn parse_preseason_ranks(body: &Value, poll: &str) -> Result<Vec<PreseasonRank>, String> {
    let weeks = body
        .as_array()
        .ok_or_else(|| "expected a JSON array of ranking weeks".to_string())?;

    let mut candidates: Vec<(bool, u64, &Value)> = weeks
        .iter()
        .filter_map(|week| {
            let ranks = find_poll(week, poll)?;
            let preseason = week
                .get("seasonType")
                .and_then(Value::as_str)
                .is_some_and(|s| s.eq_ignore_ascii_case("preseason"));
            let number = week.get("week").and_then(Value::as_u64).unwrap_or(u64::MAX);
            Some((!preseason, number, ranks))
        })
        .collect();
    // Preseason entries first, then by week number.
    candidates.sort_by_key(|&(not_preseason, week, _)| (not_preseason, week));

    let Some(&(_, _, ranks)) = candidates.first() else {
        return Ok(Vec::new());
    };

    let mut out = Vec::new();
    for entry in ranks.as_array().into_iter().flatten() {
        let school = entry.get("school").and_then(Value::as_str).map(str::trim);
        let rank = entry.get("rank").and_then(Value::as_i64);
        match (school, rank) {
            (Some(team), Some(rank)) if !team.is_empty() => out.push(PreseasonRank {
                team: team.to_string(),
                rank: Some(rank),
            }),
            _ => warn!("skipping malformed ranking entry: {entry}"),
        }
    }
    Ok(out)
}

fn find_poll<'a>(week: &'a Value, poll: &str) -> Option<&'a Value> {
    week.get("polls")?
        .as_array()?
        .iter()
        .find(|p| {
            p.get("poll")
                .and_then(Value::as_str)
                .is_some_and(|name| name.eq_ignore_ascii_case(poll))
        })?
        .get("ranks")
}
