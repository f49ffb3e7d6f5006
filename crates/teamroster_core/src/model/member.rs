//! Member entity.
//!
//! # Invariants
//! - `team_id` is the only place the member→team relationship is recorded.
//! - `age` is non-negative by construction.

use super::team::{Team, TeamId};
use super::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Surrogate key of a persisted member.
pub type MemberId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// `None` until the member is persisted.
    pub id: Option<MemberId>,
    /// Nullable and possibly empty; searches treat blank filters as absent,
    /// not blank names.
    pub username: Option<String>,
    pub age: u32,
    pub team_id: Option<TeamId>,
}

impl Member {
    /// Creates a team-less member aged 0.
    pub fn named(username: impl Into<String>) -> Self {
        Self::new(username, 0)
    }

    /// Creates a team-less member.
    pub fn new(username: impl Into<String>, age: u32) -> Self {
        Self {
            id: None,
            username: Some(username.into()),
            age,
            team_id: None,
        }
    }

    /// Creates a member already assigned to a persisted team.
    pub fn in_team(
        username: impl Into<String>,
        age: u32,
        team: &Team,
    ) -> Result<Self, ModelValidationError> {
        let mut member = Self::new(username, age);
        member.change_team(team)?;
        Ok(member)
    }

    /// Reassigns this member to `team`.
    ///
    /// The team side needs no update: its member list is derived from this
    /// field whenever it is read.
    pub fn change_team(&mut self, team: &Team) -> Result<(), ModelValidationError> {
        self.team_id = Some(team.require_id()?);
        Ok(())
    }

    /// Detaches the member from any team.
    pub fn leave_team(&mut self) {
        self.team_id = None;
    }

    pub fn belongs_to(&self, team: &Team) -> bool {
        self.team_id.is_some() && self.team_id == team.id
    }
}
