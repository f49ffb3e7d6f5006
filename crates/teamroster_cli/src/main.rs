//! TeamRoster CLI
//!
//! Opens a member/team store, optionally seeds demo data, and prints search
//! results as JSON.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "teamroster")]
#[command(about = "TeamRoster - dynamic member/team search", long_about = None)]
struct Cli {
    #[command(flatten)]
    session: commands::SessionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every member matching the filters
    Search(commands::search::SearchArgs),
    /// Read one page of matching members
    Page(commands::page::PageArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Search(args) => commands::search::execute(&cli.session, args),
        Commands::Page(args) => commands::page::execute(&cli.session, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
