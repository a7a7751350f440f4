//! # marquee-core
//!
//! The read-only query engine behind the Marquee movies API.
//!
//! The crate holds the movie document model, the record store abstraction and
//! the five queries served over HTTP:
//!
//! | Operation | Result |
//! |---|---|
//! | `list_all` | every movie, store-native order |
//! | `list_by_minimum_rating` | movies rated `>=` a threshold |
//! | `top_rated` | ten best-rated movies |
//! | `count_by_release_year` | `{year, count}` ascending |
//! | `top_countries_by_rating` | countries with 10+ rated movies, best average first |
//!
//! ## Architectural Constraints
//!
//! - No async, no network dependencies
//! - The store is injected (`QueryEngine::new`), never global
//! - The engine only reads; records are written by external tooling

// =============================================================================
// MODULES
// =============================================================================

pub mod aggregate;
pub mod engine;
pub mod primitives;
pub mod query;
pub mod release_date;
pub mod storage;
pub mod types;

// =============================================================================
// RE-EXPORTS
// =============================================================================

pub use types::{CountryRatingSummary, MarqueeError, Movie, YearCount};

pub use engine::{QueryEngine, parse_rating_threshold};
pub use query::{Query, QueryOutput};
pub use storage::{MemoryStore, MovieStore, RedbStore, UnreachableStore};
