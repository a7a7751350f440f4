//! # Query Engine
//!
//! The five read-only operations of the movies API, run against an injected
//! `MovieStore`.
//!
//! Every operation is a single read followed by a pure computation. A store
//! failure is returned as `StoreUnavailable` immediately, with no retry.

use crate::aggregate;
use crate::primitives::TOP_RATED_LIMIT;
use crate::storage::MovieStore;
use crate::{CountryRatingSummary, MarqueeError, Movie, YearCount};
use std::sync::Arc;

/// Parse a rating threshold the way the HTTP path parameter is read.
///
/// Surrounding whitespace is ignored. Anything that is not a number becomes
/// `NaN`, which then matches no movie.
pub fn parse_rating_threshold(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

/// Read-only query engine over a movies collection.
///
/// Cloning is cheap: clones share the same store.
#[derive(Clone)]
pub struct QueryEngine {
    store: Arc<dyn MovieStore>,
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine").finish_non_exhaustive()
    }
}

impl QueryEngine {
    /// Create an engine over a shared store.
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Create an engine that owns its store.
    pub fn from_store(store: impl MovieStore + 'static) -> Self {
        Self::new(Arc::new(store))
    }

    /// Number of documents in the store.
    pub fn document_count(&self) -> Result<usize, MarqueeError> {
        self.store.count()
    }

    /// Every movie, in store-native order.
    pub fn list_all(&self) -> Result<Vec<Movie>, MarqueeError> {
        self.store.documents()
    }

    /// Movies rated at least `threshold`, in store-native order.
    ///
    /// Unrated movies never match. A `NaN` threshold matches nothing.
    pub fn list_by_minimum_rating(&self, threshold: f64) -> Result<Vec<Movie>, MarqueeError> {
        let movies = self.store.documents()?;
        Ok(aggregate::movies_with_min_rating(movies, threshold))
    }

    /// The ten best-rated movies, highest first.
    pub fn top_rated(&self) -> Result<Vec<Movie>, MarqueeError> {
        let movies = self.store.documents()?;
        Ok(aggregate::top_rated(movies, TOP_RATED_LIMIT))
    }

    /// Movie counts per release year, ascending.
    pub fn count_by_release_year(&self) -> Result<Vec<YearCount>, MarqueeError> {
        let movies = self.store.documents()?;
        Ok(aggregate::count_by_release_year(&movies))
    }

    /// Countries ranked by average rating.
    ///
    /// An empty `country_filter` is treated as absent. A present filter that
    /// leaves no country yields `CountryNotFound`; without a filter, no
    /// qualifying country is an empty success.
    pub fn top_countries_by_rating(
        &self,
        country_filter: Option<&str>,
    ) -> Result<Vec<CountryRatingSummary>, MarqueeError> {
        let movies = self.store.documents()?;
        let filter = country_filter.filter(|f| !f.is_empty());

        let summaries = aggregate::country_rating_summaries(&movies, filter);
        match filter {
            Some(f) if summaries.is_empty() => Err(MarqueeError::CountryNotFound(f.to_string())),
            _ => Ok(summaries),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, UnreachableStore};

    fn usa_store() -> QueryEngine {
        let store: MemoryStore = (0..10)
            .map(|i| {
                Movie::new(format!("usa-{i}"))
                    .with_rating(7.0)
                    .with_country("USA")
            })
            .collect();
        QueryEngine::from_store(store)
    }

    #[test]
    fn parse_threshold_accepts_numbers() {
        assert_eq!(parse_rating_threshold("7.5"), 7.5);
        assert_eq!(parse_rating_threshold(" 8 "), 8.0);
        assert_eq!(parse_rating_threshold("-1"), -1.0);
    }

    #[test]
    fn parse_threshold_falls_back_to_nan() {
        assert!(parse_rating_threshold("abc").is_nan());
        assert!(parse_rating_threshold("").is_nan());
        assert!(parse_rating_threshold("7abc").is_nan());
    }

    #[test]
    fn empty_filter_is_ignored() {
        let engine = usa_store();
        let result = engine.top_countries_by_rating(Some("")).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn unmatched_filter_is_not_found() {
        let engine = usa_store();
        match engine.top_countries_by_rating(Some("Atlantis")) {
            Err(MarqueeError::CountryNotFound(country)) => assert_eq!(country, "Atlantis"),
            other => panic!("expected CountryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn no_filter_and_no_countries_is_empty_success() {
        let engine = QueryEngine::from_store(MemoryStore::new());
        assert!(engine.top_countries_by_rating(None).unwrap().is_empty());
    }

    #[test]
    fn store_failure_wins_over_not_found() {
        let engine = QueryEngine::from_store(UnreachableStore::new("down"));
        assert!(matches!(
            engine.top_countries_by_rating(Some("Atlantis")),
            Err(MarqueeError::StoreUnavailable(_))
        ));
    }

    #[test]
    fn every_operation_surfaces_store_failure() {
        let engine = QueryEngine::from_store(UnreachableStore::new("connection refused"));

        let errors = [
            engine.list_all().err(),
            engine.list_by_minimum_rating(5.0).err(),
            engine.top_rated().err(),
            engine.count_by_release_year().err(),
            engine.top_countries_by_rating(None).err(),
        ];
        for err in errors {
            match err {
                Some(MarqueeError::StoreUnavailable(msg)) => assert_eq!(msg, "connection refused"),
                other => panic!("expected StoreUnavailable, got {other:?}"),
            }
        }
    }
}
