//! Member repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Create, look up, reassign and delete members.
//! - Run entity-returning searches with the same fragments as the
//!   projection search.

use crate::model::member::{Member, MemberId};
use crate::model::team::TeamId;
use crate::repo::{RepoError, RepoResult};
use crate::search::sql::{push_where, MEMBER_TEAM_JOIN_SQL};
use crate::search::MemberSearchCondition;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

pub(crate) const MEMBER_SELECT_SQL: &str = "SELECT
    m.member_id AS member_id,
    m.username AS username,
    m.age AS age,
    m.team_id AS team_id";

/// Repository interface for member persistence.
pub trait MemberRepository {
    /// Inserts a new member and returns its generated id.
    fn create_member(&self, member: &Member) -> RepoResult<MemberId>;
    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>>;
    fn list_members(&self) -> RepoResult<Vec<Member>>;
    /// Exact, case-sensitive username match.
    fn find_by_username(&self, username: &str) -> RepoResult<Vec<Member>>;
    /// Moves a member to `team_id`, or out of any team with `None`.
    fn change_team(&self, id: MemberId, team_id: Option<TeamId>) -> RepoResult<()>;
    fn delete_member(&self, id: MemberId) -> RepoResult<()>;
    /// Members matching `condition`, as entities, ordered by id.
    fn search_members(&self, condition: &MemberSearchCondition) -> RepoResult<Vec<Member>>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn query_members(&self, sql: &str, binds: Vec<Value>) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(binds))?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }
        Ok(members)
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn create_member(&self, member: &Member) -> RepoResult<MemberId> {
        if let Some(id) = member.id {
            return Err(RepoError::InvalidData(format!(
                "member {id} is already persisted"
            )));
        }

        self.conn.execute(
            "INSERT INTO member (username, age, team_id) VALUES (?1, ?2, ?3);",
            params![member.username.as_deref(), member.age, member.team_id],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_member(&self, id: MemberId) -> RepoResult<Option<Member>> {
        let sql = format!("{MEMBER_SELECT_SQL} FROM member m WHERE m.member_id = ?1;");
        let member = self
            .conn
            .query_row(&sql, [id], |row| Ok(parse_member_row(row)))
            .optional()?;
        member.transpose()
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!("{MEMBER_SELECT_SQL} FROM member m ORDER BY m.member_id ASC;"),
            Vec::new(),
        )
    }

    fn find_by_username(&self, username: &str) -> RepoResult<Vec<Member>> {
        self.query_members(
            &format!(
                "{MEMBER_SELECT_SQL} FROM member m WHERE m.username = ? ORDER BY m.member_id ASC;"
            ),
            vec![Value::Text(username.to_string())],
        )
    }

    fn change_team(&self, id: MemberId, team_id: Option<TeamId>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE member SET team_id = ?1 WHERE member_id = ?2;",
            params![team_id, id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "member",
                id,
            });
        }
        Ok(())
    }

    fn delete_member(&self, id: MemberId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM member WHERE member_id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "member",
                id,
            });
        }
        Ok(())
    }

    fn search_members(&self, condition: &MemberSearchCondition) -> RepoResult<Vec<Member>> {
        let mut sql = format!("{MEMBER_SELECT_SQL} {MEMBER_TEAM_JOIN_SQL}");
        let mut binds: Vec<Value> = Vec::new();
        push_where(&condition.to_filter(), &mut sql, &mut binds);
        sql.push_str(" ORDER BY m.member_id ASC");
        self.query_members(&sql, binds)
    }
}

pub(crate) fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let id: MemberId = row.get("member_id")?;
    let raw_age: i64 = row.get("age")?;
    let age = u32::try_from(raw_age).map_err(|_| {
        RepoError::InvalidData(format!("invalid age `{raw_age}` in member {id}"))
    })?;

    Ok(Member {
        id: Some(id),
        username: row.get("username")?,
        age,
        team_id: row.get("team_id")?,
    })
}
