//! # Marquee HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /` - Liveness string
//! - `GET /health` - Health check
//! - `GET /api/movies` - All movies
//! - `GET /api/movies/rating/{rating}` - Movies rated at least `rating`
//! - `GET /api/movies/top-rated` - Ten best-rated movies
//! - `GET /api/movies/movies-per-year` - Movie counts per release year
//! - `GET /api/movies/top-countries?country=` - Countries by average rating
//!
//! ## Configuration (Environment Variables)
//!
//! - `MARQUEE_CORS_ORIGINS`: Comma-separated list of allowed origins, or "*" for all (default: localhost only)
//! - `MARQUEE_RATE_LIMIT`: Requests per second (default: 0, disabled)

mod error;
mod handlers;
mod middleware;
mod types;

pub use error::{ApiError, ApiResult};
pub use handlers::LIVENESS_MESSAGE;
pub use middleware::{GlobalRateLimiter, create_rate_limiter, get_rate_limit_from_env};
pub use types::{HealthResponse, MessageResponse, TopCountriesParams};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::get,
};
use marquee_core::{MarqueeError, MovieStore, QueryEngine};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the query engine.
///
/// The engine is read-only and shares one store handle, so the state needs no
/// lock.
#[derive(Clone, Debug)]
pub struct AppState {
    pub engine: QueryEngine,
}

impl AppState {
    /// Create new app state over a store.
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self {
            engine: QueryEngine::new(store),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Build CORS layer from environment configuration.
///
/// Reads `MARQUEE_CORS_ORIGINS`:
/// - If "*": allows all origins
/// - If not set: localhost only
/// - Otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("MARQUEE_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!("CORS: Allowing ALL origins (MARQUEE_CORS_ORIGINS=*)");
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in MARQUEE_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE])
            }
        }
        None => {
            tracing::info!("CORS: No MARQUEE_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let origins: Vec<HeaderValue> = [
        "http://localhost:3000",
        "http://localhost:8080",
        "http://127.0.0.1:3000",
        "http://127.0.0.1:8080",
    ]
    .into_iter()
    .filter_map(|o| o.parse::<HeaderValue>().ok())
    .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. Tracing - logs all requests
/// 2. CORS - handles preflight requests
/// 3. Rate Limiting - only when `MARQUEE_RATE_LIMIT` is non-zero
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let rate_limit = get_rate_limit_from_env();
    let rate_limiter = create_rate_limiter(rate_limit);
    if rate_limiter.is_some() {
        tracing::info!("Rate limiting enabled: {} requests/second", rate_limit);
    } else {
        tracing::info!("Rate limiting disabled");
    }

    let mut router = Router::new()
        .route("/", get(handlers::root_handler))
        .route("/health", get(handlers::health_handler))
        .route("/api/movies", get(handlers::list_movies_handler))
        .route(
            "/api/movies/rating/{rating}",
            get(handlers::movies_by_rating_handler),
        )
        .route("/api/movies/top-rated", get(handlers::top_rated_handler))
        .route(
            "/api/movies/movies-per-year",
            get(handlers::movies_per_year_handler),
        )
        .route(
            "/api/movies/top-countries",
            get(handlers::top_countries_handler),
        );

    if let Some(limiter) = rate_limiter {
        router = router.layer(axum_middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ));
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, store: Arc<dyn MovieStore>) -> Result<(), MarqueeError> {
    let router = create_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| MarqueeError::IoError(format!("Bind failed: {}", e)))?;

    tracing::info!("Marquee HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| MarqueeError::IoError(format!("Server error: {}", e)))
}
