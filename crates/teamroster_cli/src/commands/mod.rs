//! Subcommands and the flags they share.

pub mod page;
pub mod search;

use clap::Args;
use rusqlite::Connection;
use std::path::PathBuf;
use teamroster_core::db::{open_db, open_db_in_memory};
use teamroster_core::{
    default_log_level, init_logging_with, seed_demo_data, LogSettings, MemberSearchCondition,
    DEFAULT_DEMO_MEMBERS,
};

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Store and logging flags, accepted before or after the subcommand.
#[derive(Debug, Args)]
pub struct SessionArgs {
    /// SQLite database file; an in-memory database when omitted
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Insert this many demo members before running the command
    /// (in-memory databases get the default demo dataset otherwise)
    #[arg(long, global = true)]
    pub seed: Option<u32>,

    /// Log level: trace|debug|info|warn|error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files; logging stays off when omitted
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,
}

impl SessionArgs {
    /// Starts logging if requested, then opens and seeds the database.
    pub fn open(&self) -> Result<Connection, Box<dyn std::error::Error>> {
        if let Some(log_dir) = &self.log_dir {
            let log_dir = if log_dir.is_absolute() {
                log_dir.clone()
            } else {
                std::env::current_dir()?.join(log_dir)
            };
            let level = self
                .log_level
                .clone()
                .unwrap_or_else(|| default_log_level().to_string());
            let mut settings = LogSettings::new(level, log_dir.to_string_lossy());
            settings.mirror_warnings = true;
            init_logging_with(&settings)?;
        }

        let mut conn = match &self.db {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };

        let seed = match (self.seed, &self.db) {
            (Some(count), _) => Some(count),
            (None, None) => Some(DEFAULT_DEMO_MEMBERS),
            (None, Some(_)) => None,
        };
        if let Some(count) = seed {
            seed_demo_data(&mut conn, count)?;
        }
        Ok(conn)
    }
}

/// Optional search filters; omitted or blank flags do not constrain.
#[derive(Debug, Args)]
pub struct ConditionArgs {
    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub team_name: Option<String>,

    /// Inclusive lower age bound
    #[arg(long)]
    pub age_goe: Option<u32>,

    /// Inclusive upper age bound
    #[arg(long)]
    pub age_loe: Option<u32>,
}

impl From<ConditionArgs> for MemberSearchCondition {
    fn from(args: ConditionArgs) -> Self {
        Self {
            username: args.username,
            team_name: args.team_name,
            age_goe: args.age_goe,
            age_loe: args.age_loe,
        }
    }
}
