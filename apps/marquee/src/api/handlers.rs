//! # API Endpoint Handlers
//!
//! Thin adapters from HTTP requests to `QueryEngine` calls. Store reads are
//! synchronous, so every engine call runs on tokio's blocking pool.

use super::{
    AppState,
    error::ApiResult,
    types::{HealthResponse, TopCountriesParams},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use marquee_core::{
    CountryRatingSummary, MarqueeError, Movie, QueryEngine, YearCount, parse_rating_threshold,
};

/// Plain-text body of `GET /`.
pub const LIVENESS_MESSAGE: &str = "Marquee movies API is running";

/// Run one engine call off the async workers.
async fn run_query<T, F>(state: AppState, query: F) -> ApiResult<T>
where
    F: FnOnce(&QueryEngine) -> Result<T, MarqueeError> + Send + 'static,
    T: Send + 'static,
{
    let engine = state.engine;
    let result = tokio::task::spawn_blocking(move || query(&engine))
        .await
        .map_err(|e| MarqueeError::IoError(format!("Query task failed: {}", e)))?;
    Ok(result?)
}

// =============================================================================
// LIVENESS & HEALTH
// =============================================================================

/// Root liveness endpoint.
pub async fn root_handler() -> &'static str {
    LIVENESS_MESSAGE
}

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// MOVIE LISTS
// =============================================================================

/// `GET /api/movies`
pub async fn list_movies_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Movie>>> {
    let movies = run_query(state, |engine| engine.list_all()).await?;
    Ok(Json(movies))
}

/// `GET /api/movies/rating/{rating}`
///
/// A rating that does not parse as a number matches nothing and returns an
/// empty list.
pub async fn movies_by_rating_handler(
    State(state): State<AppState>,
    Path(rating): Path<String>,
) -> ApiResult<Json<Vec<Movie>>> {
    let threshold = parse_rating_threshold(&rating);
    if threshold.is_nan() {
        tracing::debug!("Rating {:?} is not a number, no movie can match", rating);
    }
    let movies = run_query(state, move |engine| engine.list_by_minimum_rating(threshold)).await?;
    Ok(Json(movies))
}

/// `GET /api/movies/top-rated`
pub async fn top_rated_handler(State(state): State<AppState>) -> ApiResult<Json<Vec<Movie>>> {
    let movies = run_query(state, |engine| engine.top_rated()).await?;
    Ok(Json(movies))
}

// =============================================================================
// AGGREGATIONS
// =============================================================================

/// `GET /api/movies/movies-per-year`
pub async fn movies_per_year_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<YearCount>>> {
    let years = run_query(state, |engine| engine.count_by_release_year()).await?;
    Ok(Json(years))
}

/// `GET /api/movies/top-countries?country=...`
pub async fn top_countries_handler(
    State(state): State<AppState>,
    Query(params): Query<TopCountriesParams>,
) -> ApiResult<Json<Vec<CountryRatingSummary>>> {
    let country = params.country;
    let ranked = run_query(state, move |engine| {
        engine.top_countries_by_rating(country.as_deref())
    })
    .await?;
    Ok(Json(ranked))
}
