//! Paged search command

use super::{CommandResult, ConditionArgs, SessionArgs};
use clap::Args;
use teamroster_core::search::DEFAULT_PAGE_SIZE;
use teamroster_core::{
    MemberSearchCondition, MemberSearchService, Order, PageRequest, PaginationStrategy, Sort,
    SqliteMemberTeamStore,
};

#[derive(Debug, Args)]
pub struct PageArgs {
    #[command(flatten)]
    pub condition: ConditionArgs,

    /// Rows to skip
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Maximum rows in the page
    #[arg(long, default_value_t = i64::from(DEFAULT_PAGE_SIZE), allow_negative_numbers = true)]
    pub limit: i64,

    /// Sort key as `column[,asc|desc]`; repeat for secondary keys
    #[arg(long = "sort")]
    pub sort: Vec<Order>,

    /// combined (one statement) or split (content and count reads)
    #[arg(long, default_value = "combined")]
    pub strategy: PaginationStrategy,
}

pub fn execute(session: &SessionArgs, args: PageArgs) -> CommandResult {
    let request = PageRequest::new(args.offset, args.limit)?.with_sort(Sort::by(args.sort));

    let conn = session.open()?;
    let service = MemberSearchService::new(SqliteMemberTeamStore::new(&conn));

    let condition = MemberSearchCondition::from(args.condition);
    let page = service.search_page(&condition, &request, args.strategy)?;

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
