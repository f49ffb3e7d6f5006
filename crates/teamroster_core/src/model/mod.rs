//! Member/team domain model.
//!
//! # Responsibility
//! - Define the two entities the search layer queries over.
//! - Keep the member→team reference as the single owner of the relationship.
//!
//! # Invariants
//! - A team's member list is never stored; it is derived from `Member::team_id`.

pub mod member;
pub mod team;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure raised before an entity reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Team names must contain at least one non-whitespace character.
    BlankTeamName,
    /// The team must be persisted before members can reference it.
    UnsavedTeam(String),
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTeamName => write!(f, "team name cannot be blank"),
            Self::UnsavedTeam(name) => write!(f, "team `{name}` has no id yet"),
        }
    }
}

impl Error for ModelValidationError {}
