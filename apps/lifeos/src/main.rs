//! # LifeOS
//!
//! The main binary for the LifeOS personal dashboard backend.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            apps/lifeos (THE BINARY)           │
//! │                                               │
//! │   ┌─────────────┐        ┌─────────────┐      │
//! │   │    CLI      │        │  HTTP API   │      │
//! │   │   (clap)    │        │   (axum)    │      │
//! │   └──────┬──────┘        └──────┬──────┘      │
//! │          └───────────┬──────────┘             │
//! │                      ▼                        │
//! │              ┌───────────────┐                │
//! │              │  lifeos-core  │                │
//! │              │ ledger/streak │                │
//! │              │  redb store   │                │
//! │              └───────────────┘                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! lifeos server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! lifeos register --name Ada --email ada@example.com
//! lifeos streak --dates 2026-03-08,2026-03-09,2026-03-10
//! ```

use clap::Parser;
use lifeos::cli;
use lifeos::config::{Config, LogConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config.with_env(),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log);

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli, config).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing. `RUST_LOG` takes precedence over the configured filter.
fn init_tracing(log: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| log.filter.as_str().into());

    match log.format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

/// Print the LifeOS startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗     ██╗███████╗███████╗ ██████╗ ███████╗
  ██║     ██║██╔════╝██╔════╝██╔═══██╗██╔════╝
  ██║     ██║█████╗  █████╗  ██║   ██║███████╗
  ██║     ██║██╔══╝  ██╔══╝  ██║   ██║╚════██║
  ███████╗██║██║     ███████╗╚██████╔╝███████║
  ╚══════╝╚═╝╚═╝     ╚══════╝ ╚═════╝ ╚══════╝

  Personal Dashboard v{}

  Goals • Habits • Streaks • Levels
"#,
        env!("CARGO_PKG_VERSION")
    );
}
