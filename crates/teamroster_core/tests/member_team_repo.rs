use rusqlite::Connection;
use teamroster_core::db::open_db_in_memory;
use teamroster_core::{
    Member, MemberRepository, MemberSearchCondition, RepoError, SqliteMemberRepository,
    SqliteTeamRepository, Team, TeamRepository,
};

fn saved_team(conn: &Connection, name: &str) -> Team {
    let repo = SqliteTeamRepository::new(conn);
    let mut team = Team::new(name);
    team.id = Some(repo.create_team(&team).unwrap());
    team
}

#[test]
fn create_and_find_member_by_id() {
    let conn = open_db_in_memory().unwrap();
    let team_a = saved_team(&conn, "teamA");
    let repo = SqliteMemberRepository::new(&conn);

    let member = Member::in_team("member1", 10, &team_a).unwrap();
    let id = repo.create_member(&member).unwrap();

    let found = repo.get_member(id).unwrap().unwrap();
    assert_eq!(found.id, Some(id));
    assert_eq!(found.username.as_deref(), Some("member1"));
    assert_eq!(found.age, 10);
    assert_eq!(found.team_id, team_a.id);

    assert!(repo.get_member(id + 100).unwrap().is_none());
}

#[test]
fn find_all_and_by_username() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    repo.create_member(&Member::new("member1", 10)).unwrap();
    repo.create_member(&Member::new("member2", 20)).unwrap();
    repo.create_member(&Member::new("Member1", 30)).unwrap();

    let all = repo.list_members().unwrap();
    assert_eq!(all.len(), 3);

    let by_name = repo.find_by_username("member1").unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].age, 10);
}

#[test]
fn member_without_name_round_trips_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let mut nameless = Member::new("placeholder", 5);
    nameless.username = None;
    let id = repo.create_member(&nameless).unwrap();

    assert_eq!(repo.get_member(id).unwrap().unwrap().username, None);
}

#[test]
fn change_team_updates_derived_team_members() {
    let conn = open_db_in_memory().unwrap();
    let team_a = saved_team(&conn, "teamA");
    let team_b = saved_team(&conn, "teamB");
    let teams = SqliteTeamRepository::new(&conn);
    let members = SqliteMemberRepository::new(&conn);

    let id = members
        .create_member(&Member::in_team("member1", 10, &team_a).unwrap())
        .unwrap();
    assert_eq!(teams.list_members(team_a.id.unwrap()).unwrap().len(), 1);

    members.change_team(id, team_b.id).unwrap();
    assert!(teams.list_members(team_a.id.unwrap()).unwrap().is_empty());
    let in_b = teams.list_members(team_b.id.unwrap()).unwrap();
    assert_eq!(in_b.len(), 1);
    assert_eq!(in_b[0].id, Some(id));

    members.change_team(id, None).unwrap();
    assert!(teams.list_members(team_b.id.unwrap()).unwrap().is_empty());
}

#[test]
fn missing_rows_report_not_found() {
    let conn = open_db_in_memory().unwrap();
    let members = SqliteMemberRepository::new(&conn);
    let teams = SqliteTeamRepository::new(&conn);

    assert!(matches!(
        members.change_team(42, None),
        Err(RepoError::NotFound { entity: "member", id: 42 })
    ));
    assert!(matches!(
        members.delete_member(42),
        Err(RepoError::NotFound { entity: "member", .. })
    ));
    assert!(matches!(
        teams.list_members(7),
        Err(RepoError::NotFound { entity: "team", id: 7 })
    ));
}

#[test]
fn delete_member_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let id = repo.create_member(&Member::named("member1")).unwrap();

    repo.delete_member(id).unwrap();
    assert!(repo.get_member(id).unwrap().is_none());
}

#[test]
fn invalid_and_already_persisted_entities_are_rejected() {
    let conn = open_db_in_memory().unwrap();
    let teams = SqliteTeamRepository::new(&conn);
    let members = SqliteMemberRepository::new(&conn);

    assert!(matches!(
        teams.create_team(&Team::new("   ")),
        Err(RepoError::Validation(_))
    ));

    let team_a = saved_team(&conn, "teamA");
    assert!(matches!(
        teams.create_team(&team_a),
        Err(RepoError::InvalidData(_))
    ));

    let mut persisted = Member::new("member1", 1);
    persisted.id = Some(members.create_member(&persisted).unwrap());
    assert!(matches!(
        members.create_member(&persisted),
        Err(RepoError::InvalidData(_))
    ));
}

#[test]
fn list_teams_returns_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    saved_team(&conn, "teamA");
    saved_team(&conn, "teamB");

    let names: Vec<String> = SqliteTeamRepository::new(&conn)
        .list_teams()
        .unwrap()
        .into_iter()
        .map(|team| team.name)
        .collect();
    assert_eq!(names, vec!["teamA".to_string(), "teamB".to_string()]);
}

#[test]
fn search_members_returns_entities_with_shared_fragments() {
    let conn = open_db_in_memory().unwrap();
    let team_a = saved_team(&conn, "teamA");
    let team_b = saved_team(&conn, "teamB");
    let repo = SqliteMemberRepository::new(&conn);
    for (name, age, team) in [
        ("member1", 10, &team_a),
        ("member2", 20, &team_a),
        ("member3", 30, &team_b),
        ("member4", 40, &team_b),
    ] {
        repo.create_member(&Member::in_team(name, age, team).unwrap())
            .unwrap();
    }
    repo.create_member(&Member::new("loner", 35)).unwrap();

    let condition = MemberSearchCondition {
        age_goe: Some(35),
        age_loe: Some(40),
        team_name: Some("teamB".to_string()),
        ..Default::default()
    };
    let found = repo.search_members(&condition).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].username.as_deref(), Some("member4"));

    let everyone = repo
        .search_members(&MemberSearchCondition::default())
        .unwrap();
    assert_eq!(everyone.len(), 5);
}
