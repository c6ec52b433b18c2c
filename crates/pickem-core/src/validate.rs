// Pick validation: the per-tier selection rules a submission must satisfy
// before it may replace a player's picks.
//
// Validation always runs to completion and reports every problem it finds so
// a form can show them all at once. It never touches the store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{normalize_email, Team, TeamId};
use crate::tier::Tier;

// ---------------------------------------------------------------------------
// Pick schedule
// ---------------------------------------------------------------------------

/// How many teams a player must pick from each tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickSchedule {
    required: BTreeMap<Tier, usize>,
}

impl Default for PickSchedule {
    /// One team from tier 1, two from tier 2, ... five from tier 5.
    fn default() -> Self {
        Self::new(Tier::ALL.iter().map(|&t| (t, usize::from(t.number()))))
    }
}

impl PickSchedule {
    pub fn new(required: impl IntoIterator<Item = (Tier, usize)>) -> Self {
        Self {
            required: required.into_iter().collect(),
        }
    }

    /// Required pick count for `tier` (0 if the tier is not scheduled).
    pub fn required(&self, tier: Tier) -> usize {
        self.required.get(&tier).copied().unwrap_or(0)
    }

    /// Total picks in a complete submission.
    pub fn total(&self) -> usize {
        self.required.values().sum()
    }

    /// Scheduled tiers in order, best first.
    pub fn iter(&self) -> impl Iterator<Item = (Tier, usize)> + '_ {
        self.required.iter().map(|(&t, &n)| (t, n))
    }
}

// ---------------------------------------------------------------------------
// Submission input / output
// ---------------------------------------------------------------------------

/// A raw pick submission as entered on a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    /// Team names keyed by player-facing tier number.
    pub picks: BTreeMap<u8, Vec<String>>,
}

/// A submission that passed every rule, resolved to team ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    /// Normalized (trimmed, lowercased) email.
    pub email: String,
    pub team_ids: Vec<TeamId>,
}

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityField {
    Name,
    Email,
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityField::Name => write!(f, "name"),
            IdentityField::Email => write!(f, "email"),
        }
    }
}

/// One broken submission rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("a display {field} is required")]
    MissingIdentity { field: IdentityField },

    #[error("tier {tier} needs exactly {expected} teams, got {actual}")]
    WrongCount {
        tier: Tier,
        expected: usize,
        actual: usize,
    },

    #[error("{team} was picked more than once")]
    DuplicatePick { team: String },

    #[error("there is no tier {tier}")]
    UnknownTier { tier: u8 },

    #[error("{team} is not a known team")]
    UnknownTeam { team: String },

    #[error("{team} is not in tier {bucket} ({})", describe_tier(.actual))]
    WrongTier {
        team: String,
        bucket: Tier,
        actual: Option<Tier>,
    },
}

fn describe_tier(tier: &Option<Tier>) -> String {
    match tier {
        Some(t) => format!("it is tier {t}"),
        None => "it is unranked".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check a submission against the schedule and the current team snapshot.
///
/// Returns every violation found, in a stable order: identity problems, then
/// tier counts (best tier first), then per-team problems in submission order.
pub fn validate(
    submission: &Submission,
    schedule: &PickSchedule,
    teams: &[Team],
) -> Result<ValidSubmission, Vec<Violation>> {
    let mut violations = Vec::new();

    let name = submission.name.trim().to_string();
    let email = normalize_email(&submission.email);
    if name.is_empty() {
        violations.push(Violation::MissingIdentity {
            field: IdentityField::Name,
        });
    }
    if email.is_empty() {
        violations.push(Violation::MissingIdentity {
            field: IdentityField::Email,
        });
    }

    // Tiers the schedule leaves out require zero picks.
    for tier in Tier::ALL {
        let expected = schedule.required(tier);
        let actual = submission
            .picks
            .get(&tier.number())
            .map(|names| names.len())
            .unwrap_or(0);
        if actual != expected {
            violations.push(Violation::WrongCount {
                tier,
                expected,
                actual,
            });
        }
    }

    let by_name: HashMap<&str, &Team> = teams.iter().map(|t| (t.name.as_str(), t)).collect();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut team_ids = Vec::new();

    for (&bucket, names) in &submission.picks {
        let Ok(tier) = Tier::from_number(i64::from(bucket)) else {
            violations.push(Violation::UnknownTier { tier: bucket });
            continue;
        };

        for raw in names {
            let team_name = raw.trim();
            if !seen.insert(team_name) {
                violations.push(Violation::DuplicatePick {
                    team: team_name.to_string(),
                });
                continue;
            }
            match by_name.get(team_name) {
                None => violations.push(Violation::UnknownTeam {
                    team: team_name.to_string(),
                }),
                Some(team) if team.tier != Some(tier) => {
                    violations.push(Violation::WrongTier {
                        team: team_name.to_string(),
                        bucket: tier,
                        actual: team.tier,
                    });
                }
                Some(team) => team_ids.push(team.id),
            }
        }
    }

    if violations.is_empty() {
        Ok(ValidSubmission {
            name,
            email,
            team_ids,
        })
    } else {
        Err(violations)
    }
}

/// Teams selectable in `tier`, best preseason rank first. Unranked teams never
/// appear in any pool.
pub fn candidate_pool(teams: &[Team], tier: Tier) -> Vec<&Team> {
    let mut pool: Vec<&Team> = teams.iter().filter(|t| t.tier == Some(tier)).collect();
    pool.sort_by_key(|t| (t.preseason_rank, t.name.clone()));
    pool
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
