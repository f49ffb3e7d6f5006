use super::ModelValidationError;
use serde::{Deserialize, Serialize};

/// Surrogate key of a persisted team.
pub type TeamId = i64;

/// Team entity. Its members are looked up through
/// `TeamRepository::list_members`, never kept on the struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// `None` until the team is persisted.
    pub id: Option<TeamId>,
    pub name: String,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::BlankTeamName);
        }
        Ok(())
    }

    /// Returns the persisted id or the error members get when they try to
    /// reference an unsaved team.
    pub fn require_id(&self) -> Result<TeamId, ModelValidationError> {
        self.id
            .ok_or_else(|| ModelValidationError::UnsavedTeam(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::Team;
    use crate::model::ModelValidationError;

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            Team::new("  \t").validate(),
            Err(ModelValidationError::BlankTeamName)
        );
        assert!(Team::new("teamA").validate().is_ok());
    }

    #[test]
    fn unsaved_team_has_no_id() {
        let team = Team::new("teamA");
        assert_eq!(
            team.require_id(),
            Err(ModelValidationError::UnsavedTeam("teamA".to_string()))
        );
    }
}
