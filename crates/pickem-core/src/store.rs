// Persistence interface consumed by the workflows and front-ends.
//
// The engine itself never talks to storage; it scores snapshots that callers
// read through this trait. `Database` (db.rs) is the SQLite implementation.

use thiserror::Error;

use crate::model::{Player, PlayerId, Team, TeamId, TeamRecordUpdate};
use crate::tier::TierError;
use crate::validate::{IdentityField, ValidSubmission};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no player with id {0}")]
    UnknownPlayer(PlayerId),

    #[error("no team with id {0}")]
    UnknownTeam(TeamId),

    #[error("player {player_id} already picked team {team_id}")]
    DuplicatePick { player_id: PlayerId, team_id: TeamId },

    #[error("a player needs a non-blank {0}")]
    MissingIdentity(IdentityField),

    #[error(transparent)]
    InvalidRank(#[from] TierError),

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Attach a short description to a rusqlite failure, in the spirit of
/// `anyhow::Context`.
pub(crate) trait DbContext<T> {
    fn db(self, context: &'static str) -> StoreResult<T>;
}

impl<T> DbContext<T> for Result<T, rusqlite::Error> {
    fn db(self, context: &'static str) -> StoreResult<T> {
        self.map_err(|source| StoreError::Database { context, source })
    }
}

// ---------------------------------------------------------------------------
// PickemStore
// ---------------------------------------------------------------------------

/// Storage operations the pick'em engine depends on.
pub trait PickemStore {
    /// Every team, ordered by name.
    fn teams(&self) -> StoreResult<Vec<Team>>;

    /// Every player, in registration order.
    fn players(&self) -> StoreResult<Vec<Player>>;

    /// The teams a player has picked. Fails with `UnknownPlayer` for an id
    /// that does not exist.
    fn picks_for_player(&self, player: PlayerId) -> StoreResult<Vec<Team>>;

    /// Replace a player's whole pick set in one transaction. Readers see
    /// either the old set or the new one, never a mix.
    fn replace_picks(&self, player: PlayerId, teams: &[TeamId]) -> StoreResult<()>;

    /// Insert a team or overwrite its season record, keyed by name. Preseason
    /// rank and tier are left as they are.
    fn upsert_team(&self, update: &TeamRecordUpdate) -> StoreResult<TeamId>;

    /// Insert a player or update their display name, keyed by normalized
    /// email.
    fn upsert_player(&self, name: &str, email: &str) -> StoreResult<Player>;

    /// Upsert the submitting player and replace their picks.
    ///
    /// Implementations backed by a transactional store should override this
    /// so both steps commit together.
    fn record_submission(&self, submission: &ValidSubmission) -> StoreResult<Player> {
        let player = self.upsert_player(&submission.name, &submission.email)?;
        self.replace_picks(player.id, &submission.team_ids)?;
        Ok(player)
    }

    /// Every player paired with their current picks.
    ///
    /// The default reads player by player; transactional stores should
    /// override it to take one snapshot.
    fn all_picks(&self) -> StoreResult<Vec<(Player, Vec<Team>)>> {
        self.players()?
            .into_iter()
            .map(|player| {
                let picks = self.picks_for_player(player.id)?;
                Ok((player, picks))
            })
            .collect()
    }
}
