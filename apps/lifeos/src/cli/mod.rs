//! # LifeOS CLI Module
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `init` - Initialize a new database
//! - `register` - Create an account and print its token
//! - `status` - Show database counts
//! - `profile` - Show an account's level, XP and streak
//! - `export` - Write an account's data to a JSON file
//! - `streak` - Compute current and best streak for a list of dates
//! - `level` - Show the level for an XP total

mod commands;

use crate::config::Config;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use lifeos_core::LifeError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// LifeOS - personal dashboard backend
///
/// Tracks goals, tasks, habits, health, finances, learning, ideas, focus and
/// reflections, turning activity into XP, levels and streaks.
#[derive(Parser, Debug)]
#[command(name = "lifeos")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (default: ./lifeos.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the redb database (overrides config and LIFEOS_DATABASE)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Initialize a new empty database
    Init {
        /// Replace an existing database
        #[arg(short, long)]
        force: bool,
    },

    /// Create an account and print its access token
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,
    },

    /// Show database status
    Status,

    /// Show an account's profile
    Profile {
        /// Account id
        #[arg(short, long)]
        account: u64,
    },

    /// Export all of an account's data as JSON
    Export {
        /// Account id
        #[arg(short, long)]
        account: u64,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Compute the streak for a set of completion dates
    Streak {
        /// Completion dates (YYYY-MM-DD, comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        dates: Vec<NaiveDate>,

        /// Reference day (default: today, UTC)
        #[arg(short, long)]
        today: Option<NaiveDate>,
    },

    /// Show the level reached with a given XP total
    Level {
        #[arg(short, long)]
        xp: u64,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments and resolved configuration.
pub async fn execute(cli: Cli, mut config: Config) -> Result<(), LifeError> {
    if let Some(database) = cli.database {
        config.storage.path = database;
    }
    let db_path = config.storage.path.clone();
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_server(&config).await
        }
        Some(Commands::Init { force }) => cmd_init(&db_path, force),
        Some(Commands::Register { name, email }) => {
            cmd_register(&db_path, json_mode, &name, &email)
        }
        Some(Commands::Profile { account }) => cmd_profile(&db_path, json_mode, account),
        Some(Commands::Export { account, output }) => cmd_export(&db_path, account, &output),
        Some(Commands::Streak { dates, today }) => cmd_streak(json_mode, &dates, today),
        Some(Commands::Level { xp }) => cmd_level(json_mode, xp),
        Some(Commands::Status) | None => cmd_status(&db_path, json_mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    #[allow(clippy::panic)]
    fn streak_dates_parse_as_list() {
        let cli = Cli::try_parse_from([
            "lifeos",
            "streak",
            "--dates",
            "2026-03-09,2026-03-10",
            "--today",
            "2026-03-10",
        ])
        .expect("parse");

        match cli.command {
            Some(Commands::Streak { dates, today }) => {
                assert_eq!(dates.len(), 2);
                assert_eq!(today, NaiveDate::from_ymd_opt(2026, 3, 10));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let result = Cli::try_parse_from(["lifeos", "streak", "--dates", "2026-13-40"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["lifeos", "status", "-D", "/tmp/x.db", "--json-mode"])
            .expect("parse");
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/x.db")));
        assert!(cli.json_mode);
    }
}
