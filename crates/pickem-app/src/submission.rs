// Pick submission: validate against the live team snapshot, then replace
// the player's picks atomically.

use chrono::{DateTime, Utc};
use pickem_core::model::{normalize_email, Player, Team};
use pickem_core::store::{PickemStore, StoreError};
use pickem_core::validate::{validate, PickSchedule, Submission, Violation};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("submission rejected: {}", list_violations(.0))]
    Rejected(Vec<Violation>),

    /// A team disappeared between validation and the write.
    #[error("submission references data that no longer exists: {0}")]
    UnknownReference(StoreError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for SubmitError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UnknownTeam(_) | StoreError::UnknownPlayer(_) => {
                SubmitError::UnknownReference(err)
            }
            other => SubmitError::Store(other),
        }
    }
}

fn list_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of an accepted submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub player: Player,
    /// The stored picks, as read back after the write.
    pub picks: Vec<Team>,
    /// True when this email had already submitted.
    pub resubmission: bool,
    pub submitted_at: DateTime<Utc>,
}

/// Runs submissions against a store with a fixed pick schedule.
pub struct SubmissionService<'a, S: PickemStore + ?Sized> {
    store: &'a S,
    schedule: &'a PickSchedule,
}

impl<'a, S: PickemStore + ?Sized> SubmissionService<'a, S> {
    pub fn new(store: &'a S, schedule: &'a PickSchedule) -> Self {
        Self { store, schedule }
    }

    /// Validate `submission` and, if it passes, replace the player's picks.
    /// A rejected submission changes nothing.
    pub fn submit(&self, submission: &Submission) -> Result<SubmissionReceipt, SubmitError> {
        let teams = self.store.teams()?;
        let valid = match validate(submission, self.schedule, &teams) {
            Ok(valid) => valid,
            Err(violations) => {
                info!(
                    "rejected submission from '{}': {} violation(s)",
                    normalize_email(&submission.email),
                    violations.len()
                );
                return Err(SubmitError::Rejected(violations));
            }
        };

        let resubmission = self
            .store
            .players()?
            .iter()
            .any(|p| p.email == valid.email);
        let player = self.store.record_submission(&valid)?;
        let picks = self.store.picks_for_player(player.id)?;
        info!(
            "{} picks for {} <{}> ({} teams)",
            if resubmission { "updated" } else { "recorded" },
            player.name,
            player.email,
            picks.len()
        );

        Ok(SubmissionReceipt {
            player,
            picks,
            resubmission,
            submitted_at: Utc::now(),
        })
    }
}
