//! # Release Date Parsing
//!
//! Release dates are stored as free text. Only strings of the exact shape
//! `D[D]-MON-YY` (e.g. `5-Jul-98`, `21-Nov-04`) carry a usable year.
//!
//! The month component is checked for shape only (three ASCII letters), never
//! against a calendar.

use crate::primitives::RELEASE_YEAR_BASE;
use regex::Regex;
use std::sync::LazyLock;

/// Anchored release date pattern. ASCII classes only: `\d` would admit
/// non-ASCII digits.
static RELEASE_DATE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,2}-[A-Za-z]{3}-([0-9]{2})$").ok());

/// Check whether a release date string has the `D[D]-MON-YY` shape.
pub fn is_conforming(date: &str) -> bool {
    release_year(date).is_some()
}

/// Derive the release year from a `D[D]-MON-YY` string.
///
/// Returns `None` for any string not matching the whole pattern.
///
/// # Examples
///
/// ```
/// use marquee_core::release_date::release_year;
///
/// assert_eq!(release_year("5-Jul-98"), Some(2098));
/// assert_eq!(release_year("1998-07-05"), None);
/// ```
pub fn release_year(date: &str) -> Option<u32> {
    let pattern = RELEASE_DATE.as_ref()?;
    let captures = pattern.captures(date)?;
    let two_digits: u32 = captures.get(1)?.as_str().parse().ok()?;
    Some(RELEASE_YEAR_BASE + two_digits)
}

// =============================================================================
// TESTS
// =============================================================================
