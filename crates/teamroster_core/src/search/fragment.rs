//! Condition fragment builders, one per search field.
//!
//! Each builder is pure and returns `None` for "no constraint". Text fragments
//! treat `None`, `""` and whitespace-only input alike.

use super::predicate::{Column, Operand, Predicate};

/// `username = value` when `value` has text.
pub fn username_eq(value: Option<&str>) -> Option<Predicate> {
    text_eq(Column::Username, value)
}

/// `team.name = value` when `value` has text.
pub fn team_name_eq(value: Option<&str>) -> Option<Predicate> {
    text_eq(Column::TeamName, value)
}

/// `age >= value` when `value` is present.
pub fn age_goe(value: Option<u32>) -> Option<Predicate> {
    value.map(|bound| Predicate::Goe(Column::Age, i64::from(bound)))
}

/// `age <= value` when `value` is present.
pub fn age_loe(value: Option<u32>) -> Option<Predicate> {
    value.map(|bound| Predicate::Loe(Column::Age, i64::from(bound)))
}

/// True when `value` contains at least one non-whitespace character.
pub fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| text.chars().any(|ch| !ch.is_whitespace()))
}

fn text_eq(column: Column, value: Option<&str>) -> Option<Predicate> {
    match value {
        Some(text) if has_text(Some(text)) => {
            Some(Predicate::Eq(column, Operand::Text(text.to_string())))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{age_goe, age_loe, has_text, team_name_eq, username_eq};
    use crate::search::predicate::{Column, Operand, Predicate};

    #[test]
    fn blank_text_is_absent() {
        for blank in [None, Some(""), Some("   "), Some("\t\n")] {
            assert_eq!(username_eq(blank), None);
            assert_eq!(team_name_eq(blank), None);
            assert!(!has_text(blank));
        }
    }

    #[test]
    fn text_value_is_kept_verbatim() {
        assert_eq!(
            username_eq(Some(" member1 ")),
            Some(Predicate::Eq(
                Column::Username,
                Operand::Text(" member1 ".to_string())
            ))
        );
        assert_eq!(
            team_name_eq(Some("teamB")),
            Some(Predicate::Eq(
                Column::TeamName,
                Operand::Text("teamB".to_string())
            ))
        );
    }

    #[test]
    fn zero_age_bound_is_present() {
        assert_eq!(age_goe(Some(0)), Some(Predicate::Goe(Column::Age, 0)));
        assert_eq!(age_loe(Some(0)), Some(Predicate::Loe(Column::Age, 0)));
        assert_eq!(age_goe(None), None);
        assert_eq!(age_loe(None), None);
    }

    #[test]
    fn builders_are_deterministic() {
        assert_eq!(username_eq(Some("a")), username_eq(Some("a")));
        assert_eq!(age_loe(Some(7)), age_loe(Some(7)));
    }
}
