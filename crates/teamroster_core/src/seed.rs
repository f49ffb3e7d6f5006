//! Demo dataset used by local runs and the CLI.
//!
//! Inserts `teamA` and `teamB`, then `member0..member{n-1}` where member `i`
//! is `i` years old and joins `teamA` for even `i`, `teamB` for odd `i`.

use crate::model::member::Member;
use crate::model::team::Team;
use crate::repo::member_repo::{MemberRepository, SqliteMemberRepository};
use crate::repo::team_repo::{SqliteTeamRepository, TeamRepository};
use crate::repo::RepoResult;
use log::info;
use rusqlite::Connection;

/// Member count the local demo profile uses.
pub const DEFAULT_DEMO_MEMBERS: u32 = 100;

/// Ids produced by [`seed_demo_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub team_ids: Vec<i64>,
    pub member_count: u32,
}

/// Seeds the demo dataset in one transaction.
pub fn seed_demo_data(conn: &mut Connection, member_count: u32) -> RepoResult<SeedSummary> {
    let tx = conn.transaction()?;
    let summary = {
        let teams = SqliteTeamRepository::new(&tx);
        let members = SqliteMemberRepository::new(&tx);

        let mut team_a = Team::new("teamA");
        team_a.id = Some(teams.create_team(&team_a)?);
        let mut team_b = Team::new("teamB");
        team_b.id = Some(teams.create_team(&team_b)?);

        for idx in 0..member_count {
            let team = if idx % 2 == 0 { &team_a } else { &team_b };
            let member = Member::in_team(format!("member{idx}"), idx, team)?;
            members.create_member(&member)?;
        }

        SeedSummary {
            team_ids: [team_a.id, team_b.id].into_iter().flatten().collect(),
            member_count,
        }
    };
    tx.commit()?;

    info!("event=seed_demo module=seed status=ok teams=2 members={member_count}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::seed_demo_data;
    use crate::db::open_db_in_memory;
    use crate::repo::member_repo::{MemberRepository, SqliteMemberRepository};
    use crate::repo::team_repo::{SqliteTeamRepository, TeamRepository};

    #[test]
    fn seeds_alternating_teams() {
        let mut conn = open_db_in_memory().unwrap();
        let summary = seed_demo_data(&mut conn, 5).unwrap();
        assert_eq!(summary.team_ids.len(), 2);

        let teams = SqliteTeamRepository::new(&conn);
        let team_a = teams.list_members(summary.team_ids[0]).unwrap();
        let team_b = teams.list_members(summary.team_ids[1]).unwrap();
        assert_eq!(team_a.len(), 3);
        assert_eq!(team_b.len(), 2);

        let members = SqliteMemberRepository::new(&conn);
        let member3 = members.find_by_username("member3").unwrap();
        assert_eq!(member3.len(), 1);
        assert_eq!(member3[0].age, 3);
        assert_eq!(member3[0].team_id, Some(summary.team_ids[1]));
    }
}
