//! # Aggregation Pipelines
//!
//! Pure functions over a slice of movies. The engine fetches the documents
//! from the store and hands them here; nothing in this module does I/O.
//!
//! - `movies_with_min_rating`: rating threshold filter
//! - `top_rated`: rating-descending sort with a limit
//! - `count_by_release_year`: `D[D]-MON-YY` year extraction, grouped and counted
//! - `country_rating_summaries`: per-country mean rating with a minimum count

use crate::primitives::MIN_MOVIES_PER_COUNTRY;
use crate::release_date::release_year;
use crate::{CountryRatingSummary, Movie, YearCount};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Movies with a present rating `>= threshold`, in input order.
///
/// A `NaN` threshold matches nothing: every comparison against `NaN` is false.
pub fn movies_with_min_rating(movies: Vec<Movie>, threshold: f64) -> Vec<Movie> {
    movies
        .into_iter()
        .filter(|m| m.review_rating.is_some_and(|r| r >= threshold))
        .collect()
}

/// Order two optional ratings highest first, absent ratings last.
fn rating_descending(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Up to `limit` movies, highest rating first.
///
/// The sort is stable, so equal ratings keep their input order.
pub fn top_rated(mut movies: Vec<Movie>, limit: usize) -> Vec<Movie> {
    movies.sort_by(|a, b| rating_descending(a.review_rating, b.review_rating));
    movies.truncate(limit);
    movies
}

/// Count movies per derived release year, ascending by year.
///
/// Movies whose release date is absent or not `D[D]-MON-YY` are skipped.
pub fn count_by_release_year(movies: &[Movie]) -> Vec<YearCount> {
    let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
    for year in movies
        .iter()
        .filter_map(|m| m.release_date.as_deref())
        .filter_map(release_year)
    {
        *counts.entry(year).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|(year, count)| YearCount { year, count })
        .collect()
}

#[derive(Default)]
struct RatingAccumulator {
    sum: f64,
    count: usize,
}

impl RatingAccumulator {
    #[allow(clippy::float_arithmetic)]
    fn add(&mut self, rating: f64) {
        self.sum += rating;
        self.count += 1;
    }

    #[allow(clippy::float_arithmetic, clippy::cast_precision_loss)]
    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Per-country rating summaries, best average first.
///
/// Only movies with both a rating and a release country count. Countries with
/// fewer than `MIN_MOVIES_PER_COUNTRY` such movies are dropped. When `filter`
/// is given, only countries containing it as a case-insensitive literal
/// substring are kept.
pub fn country_rating_summaries(
    movies: &[Movie],
    filter: Option<&str>,
) -> Vec<CountryRatingSummary> {
    let mut groups: BTreeMap<&str, RatingAccumulator> = BTreeMap::new();
    for movie in movies {
        if let (Some(rating), Some(country)) =
            (movie.review_rating, movie.release_country.as_deref())
        {
            groups.entry(country).or_default().add(rating);
        }
    }

    let needle = filter.map(str::to_lowercase);

    let mut summaries: Vec<CountryRatingSummary> = groups
        .into_iter()
        .filter(|(_, acc)| acc.count >= MIN_MOVIES_PER_COUNTRY)
        .filter(|(country, _)| {
            needle
                .as_deref()
                .is_none_or(|n| country.to_lowercase().contains(n))
        })
        .map(|(country, acc)| CountryRatingSummary {
            country: country.to_string(),
            average_rating: acc.mean(),
            movie_count: acc.count,
        })
        .collect();

    summaries.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));
    summaries
}

// =============================================================================
// TESTS
// =============================================================================
