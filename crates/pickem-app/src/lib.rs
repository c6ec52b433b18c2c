// Workflows over the pick'em engine: data refresh, rank import, pick
// submission, standings queries, and CSV export.

pub mod export;
pub mod picks_file;
pub mod refresh;
pub mod standings;
pub mod submission;
