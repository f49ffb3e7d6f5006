//! Member/team search core.
//!
//! Dynamic, fragment-composed searches over members and their teams, with a
//! single-statement and a split pagination strategy.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod seed;
pub mod service;

pub use logging::{default_log_level, init_logging, init_logging_with, logging_status, LogSettings};
pub use model::member::{Member, MemberId};
pub use model::team::{Team, TeamId};
pub use model::ModelValidationError;
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::team_repo::{SqliteTeamRepository, TeamRepository};
pub use repo::{RepoError, RepoResult};
pub use search::{
    Column, Direction, Filter, MemberSearchCondition, MemberTeamDto, MemberTeamQuery,
    MemberTeamStore, Order, Page, PageRequest, PaginationStrategy, Predicate, SearchError,
    SearchResult, Sort, SqliteMemberTeamStore,
};
pub use seed::{seed_demo_data, SeedSummary, DEFAULT_DEMO_MEMBERS};
pub use service::member_search_service::MemberSearchService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
