// Preseason rank CSV loading.
//
// Expected header: `team,rank`. A blank rank marks the team as unranked.

use std::io::Read;
use std::path::Path;

use pickem_core::model::PreseasonRank;
use tracing::warn;

use crate::error::FeedError;

/// A CSV row whose rank could not be read as an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRank {
    /// 1-based line number in the file (the header is line 1).
    pub line: usize,
    pub team: String,
    pub value: String,
}

/// Parsed contents of a rank CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankCsv {
    pub ranks: Vec<PreseasonRank>,
    pub rejected: Vec<RejectedRank>,
}

fn load_ranks_from_reader<R: Read>(rdr: R) -> Result<RankCsv, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);
    let mut out = RankCsv::default();

    for (i, result) in reader.records().enumerate() {
        let line = i + 2;
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed rank row at line {line}: {e}");
                continue;
            }
        };
        // A row without a rank column is unranked, same as a blank rank.
        let team = record.get(0).unwrap_or("").trim().to_string();
        if team.is_empty() {
            warn!("skipping rank row at line {line}: empty team name");
            continue;
        }
        let value = record.get(1).unwrap_or("").trim();
        if value.is_empty() {
            out.ranks.push(PreseasonRank { team, rank: None });
            continue;
        }
        match value.parse::<i64>() {
            Ok(rank) => out.ranks.push(PreseasonRank {
                team,
                rank: Some(rank),
            }),
            Err(_) => out.rejected.push(RejectedRank {
                line,
                team,
                value: value.to_string(),
            }),
        }
    }
    Ok(out)
}

/// Load preseason ranks from a CSV file.
pub fn load_rank_csv(path: &Path) -> Result<RankCsv, FeedError> {
    let file = std::fs::File::open(path).map_err(|e| FeedError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_ranks_from_reader(file).map_err(|e| FeedError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}
