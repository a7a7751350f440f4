//! # Core Type Definitions
//!
//! This module contains the data model shared by the store and the query engine:
//! - The stored document (`Movie`)
//! - Derived aggregation rows (`YearCount`, `CountryRatingSummary`)
//! - Error types (`MarqueeError`)
//!
//! ## Wire Format
//!
//! `Movie` keeps the PascalCase field names of the documents in the collection
//! (`Title`, `ReleaseDate`, `ReviewRating`, ...). Derived rows use camelCase.
//! A JSON `null` and an absent field both deserialize to `None`, and `None`
//! fields are omitted on output. Any other field of a stored document
//! (`_id`, `Director`, ...) is carried through untouched.

use crate::primitives::MIN_MOVIES_PER_COUNTRY;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

// =============================================================================
// MOVIE DOCUMENT
// =============================================================================

/// One document of the movies collection.
///
/// Records are immutable from the engine's point of view: queries only read
/// them. Every field is optional because the collection is populated by
/// external tooling with no schema enforcement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Movie {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    /// Expected as `D[D]-MON-YY`, e.g. `5-Jul-98`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub movie_run_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filming_locations: Option<String>,
    /// Fields the engine does not model, kept in stored order.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Movie {
    /// Create a movie with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Set the review rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.review_rating = Some(rating);
        self
    }

    /// Set the release date string.
    #[must_use]
    pub fn with_release_date(mut self, date: impl Into<String>) -> Self {
        self.release_date = Some(date.into());
        self
    }

    /// Set the release country.
    #[must_use]
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.release_country = Some(country.into());
        self
    }
}

// =============================================================================
// DERIVED ROWS
// =============================================================================

/// Number of movies released in one derived year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: u32,
    pub count: usize,
}

/// Average review rating of one release country.
///
/// Only produced for countries with at least `MIN_MOVIES_PER_COUNTRY`
/// qualifying records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryRatingSummary {
    pub country: String,
    pub average_rating: f64,
    pub movie_count: usize,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Marquee system.
///
/// - `StoreUnavailable` carries the underlying store message verbatim
/// - `CountryNotFound` is an expected outcome, not a fault
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// The record store could not be read.
    #[error("{0}")]
    StoreUnavailable(String),

    /// A country filter matched no country with enough movies.
    #[error(
        "Country \"{0}\" not found or has fewer than {min} movies.",
        min = MIN_MOVIES_PER_COUNTRY
    )]
    CountryNotFound(String),

    /// An I/O error occurred outside the query path.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl MarqueeError {
    /// Wrap any displayable store error.
    pub fn store(err: impl std::fmt::Display) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================
