use proptest::prelude::*;
use rusqlite::{params, Connection};
use std::collections::HashSet;
use teamroster_core::db::open_db_in_memory;
use teamroster_core::search::fragment::{age_goe, age_loe, team_name_eq, username_eq};
use teamroster_core::{
    Column, Filter, MemberSearchCondition, MemberSearchService, MemberTeamDto, MemberTeamQuery,
    MemberTeamStore, Order, PageRequest, Sort, SqliteMemberTeamStore,
};

const TEAM_NAMES: [&str; 3] = ["teamA", "teamB", "teamC"];
const USERNAMES: [&str; 5] = ["member1", "member2", "Member1", "", "  "];

#[derive(Debug, Clone)]
struct MemberRow {
    username: Option<String>,
    age: u32,
    team: Option<usize>,
}

fn member_row() -> impl Strategy<Value = MemberRow> {
    (
        proptest::option::of(proptest::sample::select(USERNAMES.to_vec())),
        0u32..60,
        proptest::option::of(0usize..TEAM_NAMES.len()),
    )
        .prop_map(|(username, age, team)| MemberRow {
            username: username.map(str::to_string),
            age,
            team,
        })
}

fn text_filter() -> impl Strategy<Value = Option<String>> {
    proptest::option::of(proptest::sample::select(vec![
        "member1", "member2", "Member1", "teamA", "teamB", "teamC", "", " ",
    ]))
    .prop_map(|value| value.map(str::to_string))
}

fn condition() -> impl Strategy<Value = MemberSearchCondition> {
    (
        text_filter(),
        text_filter(),
        proptest::option::of(0u32..70),
        proptest::option::of(0u32..70),
    )
        .prop_map(|(username, team_name, age_goe, age_loe)| MemberSearchCondition {
            username,
            team_name,
            age_goe,
            age_loe,
        })
}

fn sort() -> impl Strategy<Value = Sort> {
    proptest::collection::vec(
        (proptest::sample::select(Column::ALL.to_vec()), any::<bool>()),
        0..3,
    )
    .prop_map(|keys| {
        Sort::by(keys.into_iter().map(|(column, descending)| {
            if descending {
                Order::desc(column)
            } else {
                Order::asc(column)
            }
        }))
    })
}

fn database(rows: &[MemberRow]) -> Connection {
    let conn = open_db_in_memory().unwrap();
    for (idx, name) in TEAM_NAMES.iter().enumerate() {
        conn.execute(
            "INSERT INTO team (team_id, name) VALUES (?1, ?2)",
            params![idx as i64 + 1, name],
        )
        .unwrap();
    }
    for row in rows {
        conn.execute(
            "INSERT INTO member (username, age, team_id) VALUES (?1, ?2, ?3)",
            params![row.username, row.age, row.team.map(|idx| idx as i64 + 1)],
        )
        .unwrap();
    }
    conn
}

fn everything(store: &SqliteMemberTeamStore<'_>) -> Vec<MemberTeamDto> {
    store.fetch(&MemberTeamQuery::new(Filter::match_all())).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn sql_filter_agrees_with_in_memory_evaluation(
        rows in proptest::collection::vec(member_row(), 0..25),
        condition in condition(),
    ) {
        let conn = database(&rows);
        let store = SqliteMemberTeamStore::new(&conn);
        let service = MemberSearchService::new(&store);

        let filter = condition.to_filter();
        let expected: HashSet<MemberTeamDto> = everything(&store)
            .into_iter()
            .filter(|row| filter.matches(row))
            .collect();
        let found: HashSet<MemberTeamDto> = service.search(&condition).unwrap().into_iter().collect();

        prop_assert_eq!(found, expected);
    }

    #[test]
    fn fragment_order_does_not_change_selection(
        rows in proptest::collection::vec(member_row(), 0..25),
        condition in condition(),
    ) {
        let conn = database(&rows);
        let store = SqliteMemberTeamStore::new(&conn);

        let fragments = [
            username_eq(condition.username.as_deref()),
            team_name_eq(condition.team_name.as_deref()),
            age_goe(condition.age_goe),
            age_loe(condition.age_loe),
        ];
        let forward: Filter = fragments.iter().cloned().collect();
        let backward: Filter = fragments.iter().rev().cloned().collect();

        let forward_rows: HashSet<MemberTeamDto> =
            store.fetch(&MemberTeamQuery::new(forward)).unwrap().into_iter().collect();
        let backward_rows: HashSet<MemberTeamDto> =
            store.fetch(&MemberTeamQuery::new(backward)).unwrap().into_iter().collect();
        prop_assert_eq!(forward_rows, backward_rows);
    }

    #[test]
    fn combined_and_split_pages_agree(
        rows in proptest::collection::vec(member_row(), 0..25),
        condition in condition(),
        sort in sort(),
        offset in 0i64..30,
        limit in 1i64..10,
    ) {
        let conn = database(&rows);
        let service = MemberSearchService::new(SqliteMemberTeamStore::new(&conn));
        let request = PageRequest::new(offset, limit).unwrap().with_sort(sort);

        let combined = service.search_page_combined(&condition, &request).unwrap();
        let split = service.search_page_split(&condition, &request).unwrap();
        prop_assert_eq!(&combined, &split);

        let matching = service.search(&condition).unwrap();
        prop_assert_eq!(combined.total_count, matching.len() as u64);
        prop_assert!(combined.content.len() <= limit as usize);
        prop_assert!(combined.content.iter().all(|row| matching.contains(row)));
    }

    #[test]
    fn walking_every_page_visits_each_match_once(
        rows in proptest::collection::vec(member_row(), 0..25),
        condition in condition(),
        sort in sort(),
        size in 1i64..7,
    ) {
        let conn = database(&rows);
        let service = MemberSearchService::new(SqliteMemberTeamStore::new(&conn));
        let expected: HashSet<i64> = service
            .search(&condition)
            .unwrap()
            .into_iter()
            .map(|row| row.member_id)
            .collect();

        let mut seen = Vec::new();
        let mut page_index = 0;
        loop {
            let request = PageRequest::of(page_index, size).unwrap().with_sort(sort.clone());
            let page = service.search_page_combined(&condition, &request).unwrap();
            seen.extend(page.content.iter().map(|row| row.member_id));
            if page.is_last() {
                break;
            }
            page_index += 1;
        }

        prop_assert_eq!(seen.len(), expected.len());
        prop_assert_eq!(seen.into_iter().collect::<HashSet<_>>(), expected);
    }
}
