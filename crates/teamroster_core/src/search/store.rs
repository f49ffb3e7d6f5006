//! Queryable store seam for member/team search and its SQLite implementation.
//!
//! # Responsibility
//! - Describe a search as data (`MemberTeamQuery`): filter, sort, window.
//! - Execute it as a projection read, a count read, or both in one statement.
//!
//! # Invariants
//! - Reads are side-effect free.
//! - Every row goes through one projection mapper; rows it cannot map fail
//!   with `ProjectionMismatch` instead of being half-filled.

use super::dto::MemberTeamDto;
use super::page::Sort;
use super::predicate::Filter;
use super::sql::{
    order_list, push_where, to_sql_integer, MEMBER_TEAM_JOIN_SQL, MEMBER_TEAM_PROJECTION_SQL,
};
use super::{SearchError, SearchResult};
use crate::db::DbError;
use rusqlite::types::{FromSql, Value};
use rusqlite::{params_from_iter, Connection, Row};

/// Rows to skip and the maximum number of rows to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub limit: u32,
}

/// A search over the member⟕team join described as data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberTeamQuery {
    filter: Filter,
    sort: Sort,
    window: Option<Window>,
}

impl MemberTeamQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn ordered_by(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self
    }

    pub fn windowed(mut self, offset: u64, limit: u32) -> Self {
        self.window = Some(Window { offset, limit });
        self
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn sort(&self) -> &Sort {
        &self.sort
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }
}

/// Read capabilities the search core needs from storage.
pub trait MemberTeamStore {
    /// Filtered, sorted and windowed projection rows.
    fn fetch(&self, query: &MemberTeamQuery) -> SearchResult<Vec<MemberTeamDto>>;
    /// Number of filtered join rows; sort and window are ignored.
    fn count(&self, query: &MemberTeamQuery) -> SearchResult<u64>;
    /// Windowed rows and the filtered total, read atomically.
    fn fetch_with_total(&self, query: &MemberTeamQuery) -> SearchResult<(Vec<MemberTeamDto>, u64)>;
}

impl<S: MemberTeamStore + ?Sized> MemberTeamStore for &S {
    fn fetch(&self, query: &MemberTeamQuery) -> SearchResult<Vec<MemberTeamDto>> {
        (**self).fetch(query)
    }

    fn count(&self, query: &MemberTeamQuery) -> SearchResult<u64> {
        (**self).count(query)
    }

    fn fetch_with_total(&self, query: &MemberTeamQuery) -> SearchResult<(Vec<MemberTeamDto>, u64)> {
        (**self).fetch_with_total(query)
    }
}

/// SQLite-backed store borrowing a request-scoped connection.
pub struct SqliteMemberTeamStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberTeamStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MemberTeamStore for SqliteMemberTeamStore<'_> {
    fn fetch(&self, query: &MemberTeamQuery) -> SearchResult<Vec<MemberTeamDto>> {
        let mut sql = format!("SELECT {MEMBER_TEAM_PROJECTION_SQL} {MEMBER_TEAM_JOIN_SQL}");
        let mut binds: Vec<Value> = Vec::new();
        push_where(query.filter(), &mut sql, &mut binds);
        sql.push_str(" ORDER BY ");
        sql.push_str(&order_list(&query.sort().with_tiebreaker()));

        if let Some(window) = query.window() {
            sql.push_str(" LIMIT ? OFFSET ?");
            binds.push(Value::Integer(i64::from(window.limit)));
            binds.push(Value::Integer(to_sql_integer(window.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut content = Vec::new();
        while let Some(row) = rows.next()? {
            content.push(parse_member_team_row(row)?);
        }
        Ok(content)
    }

    fn count(&self, query: &MemberTeamQuery) -> SearchResult<u64> {
        let mut sql = format!("SELECT COUNT(*) {MEMBER_TEAM_JOIN_SQL}");
        let mut binds: Vec<Value> = Vec::new();
        push_where(query.filter(), &mut sql, &mut binds);

        let total: i64 = self
            .conn
            .query_row(&sql, params_from_iter(binds), |row| row.get(0))?;
        to_count(total)
    }

    fn fetch_with_total(&self, query: &MemberTeamQuery) -> SearchResult<(Vec<MemberTeamDto>, u64)> {
        let mut sql = format!("WITH filtered AS (SELECT {MEMBER_TEAM_PROJECTION_SQL} {MEMBER_TEAM_JOIN_SQL}");
        let mut binds: Vec<Value> = Vec::new();
        push_where(query.filter(), &mut sql, &mut binds);
        sql.push_str(&format!(
            "),
             numbered AS (
                SELECT filtered.*, ROW_NUMBER() OVER (ORDER BY {}) AS row_pos
                FROM filtered
             )
             SELECT
                total.total_count AS total_count,
                numbered.member_id AS member_id,
                numbered.username AS username,
                numbered.age AS age,
                numbered.team_id AS team_id,
                numbered.team_name AS team_name
             FROM (SELECT COUNT(*) AS total_count FROM filtered) AS total
             LEFT JOIN numbered ON ",
            order_list(&query.sort().with_tiebreaker())
        ));

        match query.window() {
            Some(window) => {
                sql.push_str("numbered.row_pos > ? AND numbered.row_pos <= ?");
                let start = to_sql_integer(window.offset);
                binds.push(Value::Integer(start));
                binds.push(Value::Integer(start.saturating_add(i64::from(window.limit))));
            }
            None => sql.push_str("1 = 1"),
        }
        sql.push_str(" ORDER BY numbered.row_pos");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut content = Vec::new();
        let mut total = None;
        while let Some(row) = rows.next()? {
            if total.is_none() {
                total = Some(to_count(read_column::<i64>(row, "total_count")?)?);
            }
            // The count row is left-joined to the window, so an empty window
            // still yields one row with NULL member columns.
            if read_column::<Option<i64>>(row, "member_id")?.is_some() {
                content.push(parse_member_team_row(row)?);
            }
        }

        let total = total.ok_or_else(|| {
            SearchError::ProjectionMismatch("combined page query returned no count row".to_string())
        })?;
        Ok((content, total))
    }
}

/// Maps one projected row, rejecting shapes the projection cannot express.
pub(crate) fn parse_member_team_row(row: &Row<'_>) -> SearchResult<MemberTeamDto> {
    let member_id = read_column::<Option<i64>>(row, "member_id")?
        .ok_or_else(|| SearchError::ProjectionMismatch("member_id is NULL".to_string()))?;
    let username = read_column::<Option<String>>(row, "username")?;
    let raw_age = read_column::<i64>(row, "age")?;
    let age = u32::try_from(raw_age).map_err(|_| {
        SearchError::ProjectionMismatch(format!(
            "age `{raw_age}` of member {member_id} is out of range"
        ))
    })?;
    let team_id = read_column::<Option<i64>>(row, "team_id")?;
    let team_name = read_column::<Option<String>>(row, "team_name")?;

    match (&team_id, &team_name) {
        (Some(_), None) | (None, Some(_)) => Err(SearchError::ProjectionMismatch(format!(
            "member {member_id} has a partial team (team_id present: {}, team_name present: {})",
            team_id.is_some(),
            team_name.is_some()
        ))),
        _ => Ok(MemberTeamDto::new(member_id, username, age, team_id, team_name)),
    }
}

fn read_column<T: FromSql>(row: &Row<'_>, column: &str) -> SearchResult<T> {
    row.get::<_, T>(column).map_err(|err| match err {
        rusqlite::Error::InvalidColumnType(..)
        | rusqlite::Error::InvalidColumnName(_)
        | rusqlite::Error::InvalidColumnIndex(_)
        | rusqlite::Error::IntegralValueOutOfRange(..)
        | rusqlite::Error::FromSqlConversionFailure(..) => {
            SearchError::ProjectionMismatch(format!("column `{column}`: {err}"))
        }
        other => SearchError::StoreUnavailable(DbError::Sqlite(other)),
    })
}

fn to_count(value: i64) -> SearchResult<u64> {
    u64::try_from(value)
        .map_err(|_| SearchError::ProjectionMismatch(format!("negative row count `{value}`")))
}
