use crate::model::member::MemberId;
use crate::model::team::TeamId;
use serde::{Deserialize, Serialize};

/// Flat row of the member⟕team projection.
///
/// Team fields are `None` together when the member has no team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamDto {
    pub member_id: MemberId,
    pub username: Option<String>,
    pub age: u32,
    pub team_id: Option<TeamId>,
    pub team_name: Option<String>,
}

impl MemberTeamDto {
    pub fn new(
        member_id: MemberId,
        username: Option<String>,
        age: u32,
        team_id: Option<TeamId>,
        team_name: Option<String>,
    ) -> Self {
        Self {
            member_id,
            username,
            age,
            team_id,
            team_name,
        }
    }
}
