// Tier classification: preseason rank -> weight tier -> points per loss.
//
// Tier numbering is player-facing: tier 1 holds the best-ranked teams and
// carries the heaviest penalty per loss.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TierError {
    #[error("invalid preseason rank {0}: ranks start at 1")]
    InvalidRank(i64),

    #[error("invalid tier number {0}: tiers are numbered 1 through 5")]
    InvalidTier(i64),
}

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Weight class assigned to a team from its preseason ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    /// Preseason rank 1-10.
    One,
    /// Preseason rank 11-25.
    Two,
    /// Preseason rank 26-50.
    Three,
    /// Preseason rank 51-75.
    Four,
    /// Preseason rank 76 and below. The Rat King side pot is played here.
    Five,
}

impl Tier {
    /// All tiers, best first.
    pub const ALL: [Tier; 5] = [Tier::One, Tier::Two, Tier::Three, Tier::Four, Tier::Five];

    /// Look up a tier by its player-facing number (1-5).
    pub fn from_number(n: i64) -> Result<Self, TierError> {
        match n {
            1 => Ok(Tier::One),
            2 => Ok(Tier::Two),
            3 => Ok(Tier::Three),
            4 => Ok(Tier::Four),
            5 => Ok(Tier::Five),
            other => Err(TierError::InvalidTier(other)),
        }
    }

    /// Player-facing tier number.
    pub fn number(&self) -> u8 {
        match self {
            Tier::One => 1,
            Tier::Two => 2,
            Tier::Three => 3,
            Tier::Four => 4,
            Tier::Five => 5,
        }
    }

    /// Points a player accrues each time a team in this tier loses.
    pub fn points_per_loss(&self) -> u32 {
        match self {
            Tier::One => 6,
            Tier::Two => 4,
            Tier::Three => 3,
            Tier::Four => 2,
            Tier::Five => 1,
        }
    }

    /// Inclusive preseason rank band; `None` upper bound means open-ended.
    pub fn rank_band(&self) -> (u32, Option<u32>) {
        match self {
            Tier::One => (1, Some(10)),
            Tier::Two => (11, Some(25)),
            Tier::Three => (26, Some(50)),
            Tier::Four => (51, Some(75)),
            Tier::Five => (76, None),
        }
    }

    /// Label shown on submission forms, e.g. "Tier 2 (Rank 11-25)".
    pub fn label(&self) -> String {
        match self.rank_band() {
            (lo, Some(hi)) => format!("Tier {} (Rank {lo}-{hi})", self.number()),
            (lo, None) => format!("Tier {} (Rank {lo}+)", self.number()),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl TryFrom<u8> for Tier {
    type Error = TierError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Tier::from_number(i64::from(n))
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        tier.number()
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Map a preseason rank to its tier.
///
/// An absent rank means the team is unranked and has no tier. Ranks of zero
/// or below are rejected rather than clamped into a band.
pub fn classify(rank: Option<i64>) -> Result<Option<Tier>, TierError> {
    let Some(rank) = rank else {
        return Ok(None);
    };
    let tier = match rank {
        i64::MIN..=0 => return Err(TierError::InvalidRank(rank)),
        1..=10 => Tier::One,
        11..=25 => Tier::Two,
        26..=50 => Tier::Three,
        51..=75 => Tier::Four,
        _ => Tier::Five,
    };
    Ok(Some(tier))
}

/// Points per loss for an optional tier. Unranked teams are worth nothing.
pub fn points_per_loss(tier: Option<Tier>) -> u32 {
    tier.map(|t| t.points_per_loss()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
