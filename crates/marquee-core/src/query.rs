//! # Query Module
//!
//! Structured descriptions of the five engine operations, so callers that
//! pick an operation at runtime (the CLI) can dispatch through one entry
//! point.

use crate::engine::QueryEngine;
use crate::{CountryRatingSummary, MarqueeError, Movie, YearCount};
use serde::Serialize;

/// Query operations supported by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Every movie.
    ListAll,

    /// Movies rated at least the threshold.
    MinimumRating(f64),

    /// The ten best-rated movies.
    TopRated,

    /// Movie counts per release year.
    PerYear,

    /// Countries ranked by average rating, optionally filtered by name.
    TopCountries { country: Option<String> },
}

/// Result of a dispatched query.
///
/// Serializes to the same JSON the HTTP API returns for the operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryOutput {
    Movies(Vec<Movie>),
    Years(Vec<YearCount>),
    Countries(Vec<CountryRatingSummary>),
}

impl QueryOutput {
    /// Number of rows in the result.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Movies(rows) => rows.len(),
            Self::Years(rows) => rows.len(),
            Self::Countries(rows) => rows.len(),
        }
    }

    /// Whether the result has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryEngine {
    /// Run a query described at runtime.
    pub fn execute(&self, query: &Query) -> Result<QueryOutput, MarqueeError> {
        match query {
            Query::ListAll => self.list_all().map(QueryOutput::Movies),
            Query::MinimumRating(threshold) => self
                .list_by_minimum_rating(*threshold)
                .map(QueryOutput::Movies),
            Query::TopRated => self.top_rated().map(QueryOutput::Movies),
            Query::PerYear => self.count_by_release_year().map(QueryOutput::Years),
            Query::TopCountries { country } => self
                .top_countries_by_rating(country.as_deref())
                .map(QueryOutput::Countries),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
