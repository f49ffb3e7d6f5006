//! Unpaged search command

use super::{CommandResult, ConditionArgs, SessionArgs};
use clap::Args;
use teamroster_core::{MemberSearchCondition, MemberSearchService, SqliteMemberTeamStore};

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(flatten)]
    pub condition: ConditionArgs,
}

pub fn execute(session: &SessionArgs, args: SearchArgs) -> CommandResult {
    let conn = session.open()?;
    let service = MemberSearchService::new(SqliteMemberTeamStore::new(&conn));

    let condition = MemberSearchCondition::from(args.condition);
    let rows = service.search(&condition)?;

    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
