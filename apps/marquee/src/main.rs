//! # Marquee - Movies API Server
//!
//! The main binary for the Marquee read-only movies API.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │             apps/marquee (THE BINARY)         │
//! │                                               │
//! │   ┌─────────────┐         ┌─────────────┐     │
//! │   │    CLI      │         │  HTTP API   │     │
//! │   │   (clap)    │         │   (axum)    │     │
//! │   └──────┬──────┘         └──────┬──────┘     │
//! │          └────────────┬──────────┘            │
//! │                       ▼                       │
//! │               ┌──────────────┐                │
//! │               │ marquee-core │                │
//! │               │ QueryEngine  │                │
//! │               └──────┬───────┘                │
//! │                      ▼                        │
//! │               ┌──────────────┐                │
//! │               │  MovieStore  │                │
//! │               │    (redb)    │                │
//! │               └──────────────┘                │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server (PORT and MARQUEE_DATABASE are read from the environment)
//! marquee server --port 3000
//!
//! # CLI queries
//! marquee status
//! marquee query top-countries --country us
//! ```

use clap::Parser;
use marquee::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing on stderr. MARQUEE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("MARQUEE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "marquee=debug,marquee_core=debug,tower_http=debug"
    } else {
        "marquee=info,tower_http=debug"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner (never in front of JSON output)
    let prints_json = cli.json_mode || matches!(cli.command, Some(cli::Commands::Query { .. }));
    if !cli.quiet && !prints_json {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Marquee startup banner.
fn print_banner() {
    println!(
        r#"
  ┌┬┐┌─┐┬─┐┌─┐ ┬ ┬┌─┐┌─┐
  │││├─┤├┬┘│─┼┐│ │├┤ ├┤
  ┴ ┴┴ ┴┴└─└─┘└└─┘└─┘└─┘

  Movies API v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
