//! Predicate fragments and their AND composition.
//!
//! # Invariants
//! - `Filter` holds only present fragments; "no constraint" is the empty
//!   filter, never a predicate.
//! - Nested `And` nodes are flattened, so grouping never changes the result.

use super::dto::MemberTeamDto;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Columns of the member⟕team projection that filters and sorts may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    MemberId,
    Username,
    Age,
    TeamId,
    TeamName,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::MemberId,
        Column::Username,
        Column::Age,
        Column::TeamId,
        Column::TeamName,
    ];

    /// Name of the column in the projected row.
    pub fn alias(self) -> &'static str {
        match self {
            Self::MemberId => "member_id",
            Self::Username => "username",
            Self::Age => "age",
            Self::TeamId => "team_id",
            Self::TeamName => "team_name",
        }
    }

    /// Table-qualified source column inside the join.
    pub(crate) fn qualified(self) -> &'static str {
        match self {
            Self::MemberId => "m.member_id",
            Self::Username => "m.username",
            Self::Age => "m.age",
            Self::TeamId => "t.team_id",
            Self::TeamName => "t.name",
        }
    }

    fn read(self, row: &MemberTeamDto) -> Cell<'_> {
        match self {
            Self::MemberId => Cell::Integer(Some(row.member_id)),
            Self::Username => Cell::Text(row.username.as_deref()),
            Self::Age => Cell::Integer(Some(i64::from(row.age))),
            Self::TeamId => Cell::Integer(row.team_id),
            Self::TeamName => Cell::Text(row.team_name.as_deref()),
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.alias())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "member_id" | "memberId" | "id" => Ok(Self::MemberId),
            "username" | "name" => Ok(Self::Username),
            "age" => Ok(Self::Age),
            "team_id" | "teamId" => Ok(Self::TeamId),
            "team_name" | "teamName" => Ok(Self::TeamName),
            other => Err(format!(
                "unknown column `{other}`; expected member_id|username|age|team_id|team_name"
            )),
        }
    }
}

enum Cell<'a> {
    Text(Option<&'a str>),
    Integer(Option<i64>),
}

/// Right-hand side of an equality fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Text(String),
    Integer(i64),
}

/// A single filter fragment or a conjunction of fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Eq(Column, Operand),
    Goe(Column, i64),
    Loe(Column, i64),
    And(Vec<Predicate>),
}

impl Predicate {
    /// Conjunction of `self` and `other`, flattened one level deep on both
    /// sides.
    pub fn and(self, other: Predicate) -> Predicate {
        let mut parts = Vec::new();
        for side in [self, other] {
            match side {
                Self::And(inner) => parts.extend(inner),
                single => parts.push(single),
            }
        }
        Self::And(parts)
    }

    /// Evaluates the predicate in memory with SQL comparison semantics:
    /// a `NULL` cell never satisfies a comparison.
    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        match self {
            Self::Eq(column, operand) => match (column.read(row), operand) {
                (Cell::Text(Some(value)), Operand::Text(expected)) => value == expected,
                (Cell::Integer(Some(value)), Operand::Integer(expected)) => value == *expected,
                _ => false,
            },
            Self::Goe(column, bound) => {
                matches!(column.read(row), Cell::Integer(Some(value)) if value >= *bound)
            }
            Self::Loe(column, bound) => {
                matches!(column.read(row), Cell::Integer(Some(value)) if value <= *bound)
            }
            Self::And(parts) => parts.iter().all(|part| part.matches(row)),
        }
    }

    /// Value-free description, safe for logs.
    pub fn label(&self) -> String {
        match self {
            Self::Eq(column, _) => format!("{column}_eq"),
            Self::Goe(column, _) => format!("{column}_goe"),
            Self::Loe(column, _) => format!("{column}_loe"),
            Self::And(parts) => parts
                .iter()
                .map(Predicate::label)
                .collect::<Vec<_>>()
                .join("+"),
        }
    }
}

/// AND-composition of the present fragments of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

impl Filter {
    /// The identity of AND: matches every row.
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Adds a fragment; `None` leaves the filter unchanged.
    pub fn and(mut self, fragment: Option<Predicate>) -> Self {
        if let Some(predicate) = fragment {
            self.push(predicate);
        }
        self
    }

    fn push(&mut self, predicate: Predicate) {
        match predicate {
            Predicate::And(parts) => parts.into_iter().for_each(|part| self.push(part)),
            single => self.predicates.push(single),
        }
    }

    pub fn is_match_all(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Present fragments in insertion order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn matches(&self, row: &MemberTeamDto) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(row))
    }

    /// Collapses the filter back into one predicate, `None` when it matches
    /// everything.
    pub fn into_predicate(mut self) -> Option<Predicate> {
        match self.predicates.len() {
            0 => None,
            1 => self.predicates.pop(),
            _ => Some(Predicate::And(self.predicates)),
        }
    }

    /// Comma-separated fragment labels for log lines.
    pub fn describe(&self) -> String {
        if self.is_match_all() {
            return "none".to_string();
        }
        self.predicates
            .iter()
            .map(Predicate::label)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<Option<Predicate>> for Filter {
    fn from_iter<I: IntoIterator<Item = Option<Predicate>>>(iter: I) -> Self {
        let mut filter = Self::match_all();
        filter.extend(iter);
        filter
    }
}

impl Extend<Option<Predicate>> for Filter {
    fn extend<I: IntoIterator<Item = Option<Predicate>>>(&mut self, iter: I) {
        for predicate in iter.into_iter().flatten() {
            self.push(predicate);
        }
    }
}
