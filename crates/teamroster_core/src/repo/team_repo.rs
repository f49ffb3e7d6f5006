//! Team repository contract and SQLite implementation.
//!
//! # Invariants
//! - A team's members are read from `member.team_id`; there is no stored
//!   team→member list to keep in sync.

use crate::model::member::Member;
use crate::model::team::{Team, TeamId};
use crate::repo::member_repo::{parse_member_row, MEMBER_SELECT_SQL};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{Connection, OptionalExtension, Row};

/// Repository interface for team persistence.
pub trait TeamRepository {
    fn create_team(&self, team: &Team) -> RepoResult<TeamId>;
    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>>;
    fn list_teams(&self) -> RepoResult<Vec<Team>>;
    /// Derived back-collection: members currently referencing `id`.
    fn list_members(&self, id: TeamId) -> RepoResult<Vec<Member>>;
}

/// SQLite-backed team repository.
pub struct SqliteTeamRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTeamRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TeamRepository for SqliteTeamRepository<'_> {
    fn create_team(&self, team: &Team) -> RepoResult<TeamId> {
        team.validate()?;
        if let Some(id) = team.id {
            return Err(RepoError::InvalidData(format!("team {id} is already persisted")));
        }

        self.conn
            .execute("INSERT INTO team (name) VALUES (?1);", [team.name.as_str()])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_team(&self, id: TeamId) -> RepoResult<Option<Team>> {
        let team = self
            .conn
            .query_row(
                "SELECT team_id, name FROM team WHERE team_id = ?1;",
                [id],
                parse_team_row,
            )
            .optional()?;
        Ok(team)
    }

    fn list_teams(&self) -> RepoResult<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, name FROM team ORDER BY team_id ASC;")?;
        let teams = stmt
            .query_map([], parse_team_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(teams)
    }

    fn list_members(&self, id: TeamId) -> RepoResult<Vec<Member>> {
        if self.get_team(id)?.is_none() {
            return Err(RepoError::NotFound { entity: "team", id });
        }

        let mut stmt = self.conn.prepare(&format!(
            "{MEMBER_SELECT_SQL} FROM member m WHERE m.team_id = ?1 ORDER BY m.member_id ASC;"
        ))?;
        let mut rows = stmt.query([id])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }
        Ok(members)
    }
}

fn parse_team_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: Some(row.get("team_id")?),
        name: row.get("name")?,
    })
}
