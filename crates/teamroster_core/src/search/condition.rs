use super::fragment::{age_goe, age_loe, team_name_eq, username_eq};
use super::predicate::Filter;
use serde::{Deserialize, Serialize};

/// Optional search criteria. Every field is independent; leaving all of them
/// empty selects every member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    /// Inclusive lower age bound.
    pub age_goe: Option<u32>,
    /// Inclusive upper age bound.
    pub age_loe: Option<u32>,
}

impl MemberSearchCondition {
    /// Composes the four fragments, in field order, into one filter.
    pub fn to_filter(&self) -> Filter {
        [
            username_eq(self.username.as_deref()),
            team_name_eq(self.team_name.as_deref()),
            age_goe(self.age_goe),
            age_loe(self.age_loe),
        ]
        .into_iter()
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::MemberSearchCondition;

    #[test]
    fn blank_fields_compose_to_match_all() {
        let condition = MemberSearchCondition {
            username: Some(String::new()),
            team_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(condition.to_filter().is_match_all());
        assert!(MemberSearchCondition::default().to_filter().is_match_all());
    }

    #[test]
    fn every_present_field_contributes_one_fragment() {
        let condition = MemberSearchCondition {
            username: Some("member1".to_string()),
            team_name: Some("teamA".to_string()),
            age_goe: Some(10),
            age_loe: Some(40),
        };
        assert_eq!(
            condition.to_filter().describe(),
            "username_eq,team_name_eq,age_goe,age_loe"
        );
    }

    #[test]
    fn deserializes_from_camel_case_json() {
        let condition: MemberSearchCondition =
            serde_json::from_str(r#"{"teamName":"teamB","ageGoe":35}"#).unwrap();
        assert_eq!(condition.team_name.as_deref(), Some("teamB"));
        assert_eq!(condition.age_goe, Some(35));
        assert_eq!(condition.username, None);
    }
}
