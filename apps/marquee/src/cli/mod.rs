//! # Marquee CLI Module
//!
//! This module implements the CLI interface for Marquee.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show collection status
//! - `query` - Run one of the movie queries and print JSON
//! - `init` - Create an empty database

mod commands;

use clap::{Parser, Subcommand};
use marquee_core::MarqueeError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Marquee - read-only movies API
///
/// Serves rating, ranking and release-year queries over a movies collection.
#[derive(Parser, Debug)]
#[command(name = "marquee")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the movies database
    #[arg(
        short = 'D',
        long,
        global = true,
        env = "MARQUEE_DATABASE",
        default_value = "marquee.redb"
    )]
    pub database: PathBuf,

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
        #[arg(short = 'H', long, default_value = "0.0.0.0")]
        host: String,

        /// Port to bind to
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,
    },

    /// Show collection status
    Status,

    /// Run a query and print the result as JSON
    Query {
        #[command(subcommand)]
        kind: QueryKind,
    },

    /// Initialize a new empty database
    Init {
        /// Force initialization even if database exists
        #[arg(short, long)]
        force: bool,
    },
}

/// Queries available from the command line.
#[derive(Subcommand, Debug, Clone)]
pub enum QueryKind {
    /// Every movie
    All,

    /// Movies rated at least the threshold
    Rating {
        /// Minimum review rating (non-numbers match nothing)
        #[arg(short, long)]
        min: String,
    },

    /// The ten best-rated movies
    TopRated,

    /// Movie counts per release year
    PerYear,

    /// Countries ranked by average rating
    TopCountries {
        /// Case-insensitive country name fragment
        #[arg(short, long)]
        country: Option<String>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), MarqueeError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(&cli.database, &host, port).await,
        Some(Commands::Status) => cmd_status(&cli.database, json_mode),
        Some(Commands::Query { kind }) => cmd_query(&cli.database, &kind),
        Some(Commands::Init { force }) => cmd_init(&cli.database, force),
        None => {
            // No subcommand - show status by default
            cmd_status(&cli.database, json_mode)
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
