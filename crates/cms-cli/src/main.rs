//! CMS CLI
//!
//! Command-line front end for the admin snapshot-diff engine

use clap::{Parser, Subcommand};
use cms_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "cms")]
#[command(about = "CMS admin - diff and submit multilingual records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two record files offline
    Diff(commands::diff::DiffArgs),
    /// Fetch a record from the admin API
    Fetch(commands::fetch::FetchArgs),
    /// Diff a working copy against the live record and submit the changes
    Push(commands::push::PushArgs),
    /// Delete a record through the admin API
    Delete(commands::delete::DeleteArgs),
}

fn main() {
    dotenvy::dotenv().ok();
    init(Profile::Development);

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Fetch(args) => commands::fetch::execute(args),
        Commands::Push(args) => commands::push::execute(args),
        Commands::Delete(args) => commands::delete::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
