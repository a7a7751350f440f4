//! # Query Scenario Tests
//!
//! End-to-end checks of the five engine operations against both store
//! backends.
//!
//! ## Groups
//! - Listing: all movies and the rating threshold
//! - Ranking: top rated
//! - Years: release year aggregation
//! - Countries: country ranking, filter and NotFound

#![allow(clippy::unwrap_used, clippy::panic, clippy::float_arithmetic)]

use marquee_core::{MarqueeError, MemoryStore, Movie, QueryEngine, RedbStore, YearCount};
use std::sync::Arc;

fn titles(movies: &[Movie]) -> Vec<&str> {
    movies.iter().filter_map(|m| m.title.as_deref()).collect()
}

fn country_movies(country: &str, count: usize, rating: f64) -> Vec<Movie> {
    (0..count)
        .map(|i| {
            Movie::new(format!("{country} {i}"))
                .with_rating(rating)
                .with_country(country)
        })
        .collect()
}

fn catalog() -> Vec<Movie> {
    vec![
        Movie::new("Heat")
            .with_rating(8.3)
            .with_release_date("15-Dec-95")
            .with_country("USA"),
        Movie::new("Ran")
            .with_rating(8.2)
            .with_release_date("1-Jun-85"),
        Movie::new("Untitled Project"),
        Movie::new("Amelie")
            .with_rating(8.3)
            .with_release_date("25-Apr-01")
            .with_country("France"),
        Movie::new("Bad Date")
            .with_rating(3.1)
            .with_release_date("April 2001"),
    ]
}

// =============================================================================
// LISTING
// =============================================================================

mod listing {
    use super::*;

    #[test]
    fn list_all_returns_store_order() {
        let engine = QueryEngine::from_store(MemoryStore::from(catalog()));
        let all = engine.list_all().unwrap();

        assert_eq!(
            titles(&all),
            vec!["Heat", "Ran", "Untitled Project", "Amelie", "Bad Date"]
        );
    }

    #[test]
    fn threshold_keeps_store_order() {
        let engine = QueryEngine::from_store(MemoryStore::from(catalog()));
        let rated = engine.list_by_minimum_rating(8.2).unwrap();

        assert_eq!(titles(&rated), vec!["Heat", "Ran", "Amelie"]);
    }

    #[test]
    fn unparseable_threshold_matches_nothing() {
        let engine = QueryEngine::from_store(MemoryStore::from(catalog()));
        let threshold = marquee_core::parse_rating_threshold("great");

        assert!(engine.list_by_minimum_rating(threshold).unwrap().is_empty());
    }
}

// =============================================================================
// RANKING
// =============================================================================

mod ranking {
    use super::*;

    #[test]
    fn top_rated_caps_at_ten() {
        let movies: Vec<Movie> = (0..25)
            .map(|i| Movie::new(format!("m{i}")).with_rating(f64::from(i) / 10.0))
            .collect();
        let engine = QueryEngine::from_store(MemoryStore::from(movies));

        let top = engine.top_rated().unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].title.as_deref(), Some("m24"));
        assert_eq!(top[9].title.as_deref(), Some("m15"));
    }

    #[test]
    fn top_rated_with_few_movies_returns_all() {
        let engine = QueryEngine::from_store(MemoryStore::from(catalog()));
        let top = engine.top_rated().unwrap();

        assert_eq!(top.len(), 5);
        assert_eq!(top.last().unwrap().title.as_deref(), Some("Untitled Project"));
    }
}

// =============================================================================
// YEARS
// =============================================================================

mod years {
    use super::*;

    #[test]
    fn two_digit_years_map_to_2000s() {
        let engine =
            QueryEngine::from_store(MemoryStore::from(vec![
                Movie::new("Old").with_release_date("5-Jul-98"),
            ]));

        assert_eq!(
            engine.count_by_release_year().unwrap(),
            vec![YearCount {
                year: 2098,
                count: 1
            }]
        );
    }

    #[test]
    fn non_conforming_dates_only_drop_from_years() {
        let engine = QueryEngine::from_store(MemoryStore::from(catalog()));

        let years = engine.count_by_release_year().unwrap();
        let total: usize = years.iter().map(|y| y.count).sum();
        assert_eq!(total, 3);
        assert_eq!(
            years.iter().map(|y| y.year).collect::<Vec<_>>(),
            vec![2001, 2085, 2095]
        );

        // Still listed everywhere else.
        assert_eq!(engine.list_all().unwrap().len(), 5);
        assert!(titles(&engine.list_by_minimum_rating(3.0).unwrap()).contains(&"Bad Date"));
    }
}

// =============================================================================
// COUNTRIES
// =============================================================================

mod countries {
    use super::*;

    #[test]
    fn small_countries_are_excluded() {
        let mut movies = country_movies("Norway", 12, 7.5);
        movies.extend(country_movies("Sweden", 9, 9.0));
        let engine = QueryEngine::from_store(MemoryStore::from(movies));

        let ranked = engine.top_countries_by_rating(None).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].country, "Norway");
        assert_eq!(ranked[0].movie_count, 12);
        assert!((ranked[0].average_rating - 7.5).abs() < 1e-9);
    }

    #[test]
    fn average_is_mean_of_ratings() {
        let mut movies = country_movies("Italy", 5, 6.0);
        movies.extend(country_movies("Italy", 5, 8.0));
        let engine = QueryEngine::from_store(MemoryStore::from(movies));

        let ranked = engine.top_countries_by_rating(None).unwrap();
        assert!((ranked[0].average_rating - 7.0).abs() < 1e-9);
        assert_eq!(ranked[0].movie_count, 10);
    }

    #[test]
    fn lowercase_filter_finds_usa() {
        let mut movies = country_movies("USA", 10, 7.0);
        movies.extend(country_movies("India", 10, 7.2));
        let engine = QueryEngine::from_store(MemoryStore::from(movies));

        let ranked = engine.top_countries_by_rating(Some("us")).unwrap();
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].country, "USA");
    }

    #[test]
    fn filter_matching_only_small_country_is_not_found() {
        let mut movies = country_movies("Norway", 12, 7.5);
        movies.extend(country_movies("Sweden", 9, 9.0));
        let engine = QueryEngine::from_store(MemoryStore::from(movies));

        match engine.top_countries_by_rating(Some("swe")) {
            Err(err @ MarqueeError::CountryNotFound(_)) => {
                assert!(err.to_string().contains("\"swe\""));
            }
            other => panic!("expected CountryNotFound, got {other:?}"),
        }
    }

    #[test]
    fn atlantis_is_not_found() {
        let engine = QueryEngine::from_store(MemoryStore::from(country_movies("USA", 10, 7.0)));

        let err = engine.top_countries_by_rating(Some("Atlantis")).unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
    }
}

// =============================================================================
// REDB BACKEND
// =============================================================================

mod redb_backend {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn engine_reads_through_redb() {
        let temp = tempdir().expect("temp dir");
        let store = RedbStore::create(temp.path().join("movies.redb")).expect("create db");
        store.insert_many(&catalog()).expect("insert");
        store
            .insert_many(&country_movies("Japan", 10, 8.0))
            .expect("insert");

        let engine = QueryEngine::new(Arc::new(store));
        assert_eq!(engine.document_count().unwrap(), 15);
        assert_eq!(engine.list_all().unwrap()[0].title.as_deref(), Some("Heat"));
        assert_eq!(engine.top_rated().unwrap()[0].title.as_deref(), Some("Heat"));
        assert_eq!(
            engine.top_countries_by_rating(Some("jap")).unwrap()[0].country,
            "Japan"
        );
    }

    #[test]
    fn shared_engine_serves_concurrent_readers() {
        let temp = tempdir().expect("temp dir");
        let store = RedbStore::create(temp.path().join("movies.redb")).expect("create db");
        store
            .insert_many(&country_movies("Japan", 10, 8.0))
            .expect("insert");
        let engine = QueryEngine::new(Arc::new(store));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = engine.clone();
                std::thread::spawn(move || engine.top_countries_by_rating(None))
            })
            .collect();

        for handle in handles {
            let ranked = handle.join().expect("thread").expect("query");
            assert_eq!(ranked.len(), 1);
        }
    }
}
