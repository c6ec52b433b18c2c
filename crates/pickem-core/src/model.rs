// Domain records shared by the engine, the store, and the front-ends.

use serde::{Deserialize, Serialize};

use crate::tier::Tier;

pub type TeamId = i64;
pub type PlayerId = i64;

/// A college football team with its current season record.
///
/// `tier` is always derived from `preseason_rank`; the store never writes one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub conf_wins: u32,
    pub conf_losses: u32,
    pub preseason_rank: Option<u32>,
    pub tier: Option<Tier>,
}

impl Team {
    /// Games with a decision (ties excluded).
    pub fn decided_games(&self) -> u32 {
        self.wins + self.losses
    }

    /// Overall record, e.g. "9-3-0".
    pub fn record(&self) -> String {
        format!("{}-{}-{}", self.wins, self.losses, self.ties)
    }

    /// Conference record, e.g. "6-2".
    pub fn conf_record(&self) -> String {
        format!("{}-{}", self.conf_wins, self.conf_losses)
    }
}

/// Editable season stats for a team (admin edits and provider refreshes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamStats {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub conf_wins: u32,
    pub conf_losses: u32,
}

/// Strictly-typed season record produced from a provider refresh. Applying
/// one overwrites the team's stats wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecordUpdate {
    pub name: String,
    pub stats: TeamStats,
}

/// A preseason ranking entry before classification. `rank` is kept signed so
/// bad input reaches the classifier and is rejected there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreseasonRank {
    pub team: String,
    pub rank: Option<i64>,
}

/// A participant in the pool, identified by normalized email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub email: String,
    pub paid: bool,
}

/// Canonical form of a player email: surrounding whitespace trimmed, then
/// lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team() -> Team {
        Team {
            id: 1,
            name: "Georgia".into(),
            wins: 11,
            losses: 2,
            ties: 0,
            conf_wins: 7,
            conf_losses: 1,
            preseason_rank: Some(1),
            tier: Some(Tier::One),
        }
    }

    #[test]
    fn record_strings() {
        let t = team();
        assert_eq!(t.record(), "11-2-0");
        assert_eq!(t.conf_record(), "7-1");
        assert_eq!(t.decided_games(), 13);
    }

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@Example.COM \n"), "alice@example.com");
        assert_eq!(normalize_email("bob@x.org"), "bob@x.org");
        assert_eq!(normalize_email("   "), "");
    }
}
