//! # Query Primitives
//!
//! Fixed constants of the query engine. These are compiled in and are not
//! configurable at runtime.

/// Number of records returned by the top-rated query.
pub const TOP_RATED_LIMIT: usize = 10;

/// Minimum number of qualifying records a country needs to be ranked.
///
/// Countries below this count are dropped before any country filter is
/// applied, so a filter that only matches small countries yields NotFound.
pub const MIN_MOVIES_PER_COUNTRY: usize = 10;

/// Century added to the two-digit year of a release date.
///
/// `5-Jul-98` is year 2098. There is no rolling century window.
pub const RELEASE_YEAR_BASE: u32 = 2000;
