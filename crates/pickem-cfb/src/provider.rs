// Source of team records and preseason rankings.

use async_trait::async_trait;
use pickem_core::model::{PreseasonRank, TeamRecordUpdate};

use crate::error::FeedError;

/// Anything that can supply season data for a refresh. `CfbdClient` is the
/// live implementation; tests substitute fixed data.
#[async_trait]
pub trait SportsDataProvider: Send + Sync {
    /// Current season records for every team in the configured
    /// classification.
    async fn fetch_team_records(&self, year: i32) -> Result<Vec<TeamRecordUpdate>, FeedError>;

    /// Preseason ranks from the named poll.
    async fn fetch_preseason_ranks(
        &self,
        year: i32,
        poll: &str,
    ) -> Result<Vec<PreseasonRank>, FeedError>;
}
