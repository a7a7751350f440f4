//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::QueryKind;
use crate::api;
use marquee_core::{
    MarqueeError, MovieStore, Query, QueryEngine, RedbStore, UnreachableStore,
    parse_rating_threshold,
};
use std::path::Path;
use std::sync::Arc;

// =============================================================================
// STORE CONNECTION
// =============================================================================

/// Open the movies database for serving.
///
/// A failed open is logged and replaced by an `UnreachableStore`, so the
/// server still starts and reports the failure on every query.
pub fn connect_store(db_path: &Path) -> Arc<dyn MovieStore> {
    match RedbStore::open(db_path) {
        Ok(store) => {
            tracing::info!("Connected to movies database at {}", db_path.display());
            Arc::new(store)
        }
        Err(e) => {
            tracing::error!("Failed to connect to movies database: {}", e);
            Arc::new(UnreachableStore::new(e.to_string()))
        }
    }
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(db_path: &Path, host: &str, port: u16) -> Result<(), MarqueeError> {
    let store = connect_store(db_path);

    println!("Marquee Movies API Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Database: {}", db_path.display());
    println!();
    println!("Endpoints:");
    println!("  GET /api/movies                  - All movies");
    println!("  GET /api/movies/rating/{{rating}}  - Movies rated at least {{rating}}");
    println!("  GET /api/movies/top-rated        - Ten best-rated movies");
    println!("  GET /api/movies/movies-per-year  - Movies per release year");
    println!("  GET /api/movies/top-countries    - Countries by average rating");
    println!("  GET /health                      - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, store).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show collection status.
pub fn cmd_status(db_path: &Path, json_mode: bool) -> Result<(), MarqueeError> {
    let engine = QueryEngine::from_store(RedbStore::open(db_path)?);
    let documents = engine.document_count()?;
    let years = engine.count_by_release_year()?;
    let dated: usize = years.iter().map(|y| y.count).sum();

    if json_mode {
        let output = serde_json::json!({
            "database": db_path.to_string_lossy(),
            "documents": documents,
            "dated_documents": dated,
            "release_years": years.len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Marquee Collection Status");
    println!("=========================");
    println!("Database: {}", db_path.display());
    println!();
    println!("Documents:      {}", documents);
    println!("With year:      {}", dated);
    println!("Release years:  {}", years.len());

    Ok(())
}

// =============================================================================
// QUERY COMMAND
// =============================================================================

impl QueryKind {
    /// Convert the command-line form into an engine query.
    pub fn to_query(&self) -> Query {
        match self {
            Self::All => Query::ListAll,
            Self::Rating { min } => Query::MinimumRating(parse_rating_threshold(min)),
            Self::TopRated => Query::TopRated,
            Self::PerYear => Query::PerYear,
            Self::TopCountries { country } => Query::TopCountries {
                country: country.clone(),
            },
        }
    }
}

/// Run a query and print the result as pretty JSON.
pub fn cmd_query(db_path: &Path, kind: &QueryKind) -> Result<(), MarqueeError> {
    let engine = QueryEngine::from_store(RedbStore::open(db_path)?);
    let query = kind.to_query();

    tracing::debug!("Executing {:?}", query);
    let output = engine.execute(&query)?;
    tracing::debug!("Query returned {} rows", output.len());

    println!(
        "{}",
        serde_json::to_string_pretty(&output).unwrap_or_default()
    );
    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Create a new empty database.
pub fn cmd_init(db_path: &Path, force: bool) -> Result<(), MarqueeError> {
    if db_path.exists() {
        if !force {
            return Err(MarqueeError::IoError(format!(
                "Database already exists at {}. Use --force to overwrite.",
                db_path.display()
            )));
        }
        std::fs::remove_file(db_path)
            .map_err(|e| MarqueeError::IoError(format!("Remove existing database: {}", e)))?;
    }

    let store = RedbStore::create(db_path)?;
    let documents = store.count()?;
    println!(
        "Initialized empty database at {} ({} documents)",
        db_path.display(),
        documents
    );
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
