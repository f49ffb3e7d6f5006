//! Dynamic member/team search.
//!
//! # Responsibility
//! - Turn a [`MemberSearchCondition`] into optional predicate fragments and
//!   AND-compose them into one [`Filter`].
//! - Run the composed filter over the member⟕team join through a
//!   [`MemberTeamStore`] and project rows into [`MemberTeamDto`].
//! - Provide the paging vocabulary shared by both pagination strategies.
//!
//! # Invariants
//! - An absent fragment never constrains the result; an empty filter matches
//!   every member, with or without a team.
//! - The same fragments feed list search, entity search, content reads and
//!   count reads.

pub mod condition;
pub mod dto;
pub mod fragment;
pub mod page;
pub mod predicate;
pub(crate) mod sql;
pub mod store;

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use condition::MemberSearchCondition;
pub use dto::MemberTeamDto;
pub use page::{
    Direction, Order, Page, PageRequest, PaginationStrategy, Sort, DEFAULT_PAGE_SIZE,
};
pub use predicate::{Column, Filter, Operand, Predicate};
pub use store::{MemberTeamQuery, MemberTeamStore, SqliteMemberTeamStore, Window};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Failure kinds of the search core. None of them is retried internally.
#[derive(Debug)]
pub enum SearchError {
    /// Negative offset or non-positive limit.
    InvalidPageRequest { offset: i64, limit: i64 },
    /// The underlying read failed.
    StoreUnavailable(DbError),
    /// A joined row could not be mapped onto the projection.
    ProjectionMismatch(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPageRequest { offset, limit } => write!(
                f,
                "invalid page request offset={offset} limit={limit}; expected offset >= 0 and limit > 0"
            ),
            Self::StoreUnavailable(err) => write!(f, "member store unavailable: {err}"),
            Self::ProjectionMismatch(message) => {
                write!(f, "search row does not match projection: {message}")
            }
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StoreUnavailable(err) => Some(err),
            Self::InvalidPageRequest { .. } | Self::ProjectionMismatch(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::StoreUnavailable(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StoreUnavailable(DbError::Sqlite(value))
    }
}
