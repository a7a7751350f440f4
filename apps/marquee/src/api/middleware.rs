//! # Middleware Module
//!
//! Rate limiting middleware for the Marquee HTTP API.
//!
//! ## Configuration
//!
//! Rate limiting is configured via environment variable:
//! - `MARQUEE_RATE_LIMIT`: Requests per second (default: 0, disabled)

use super::types::MessageResponse;
use axum::{
    Json,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Rate limiting is opt-in: unset means no limiter.
const DEFAULT_RPS: u32 = 0;

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Global rate limiter type alias.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Create a new global rate limiter.
///
/// Returns `None` when `requests_per_second` is 0 (rate limiting disabled).
pub fn create_rate_limiter(requests_per_second: u32) -> Option<GlobalRateLimiter> {
    let rps = NonZeroU32::new(requests_per_second)?;
    Some(Arc::new(RateLimiter::direct(Quota::per_second(rps))))
}

/// Get rate limit from environment variable.
///
/// Returns the value of `MARQUEE_RATE_LIMIT`, or 0 (disabled) if unset or invalid.
pub fn get_rate_limit_from_env() -> u32 {
    std::env::var("MARQUEE_RATE_LIMIT")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_RPS)
}

/// Rate limiting middleware.
///
/// Returns 429 with a `message` body once the limit is exceeded.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<MessageResponse>)> {
    match limiter.check() {
        Ok(()) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded");
            Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(MessageResponse::new("Too Many Requests")),
            ))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rate_limiter() {
        let limiter = create_rate_limiter(50);
        assert!(limiter.is_some_and(|l| l.check().is_ok()));
    }

    #[test]
    fn test_default_leaves_limiting_off() {
        assert!(create_rate_limiter(DEFAULT_RPS).is_none());
    }

    #[test]
    fn test_zero_disables_rate_limiter() {
        assert!(create_rate_limiter(0).is_none());
    }

    #[test]
    fn test_limiter_rejects_after_burst() {
        let limiter = create_rate_limiter(1).expect("limiter");
        assert!(limiter.check().is_ok());
        assert!(limiter.check().is_err());
    }
}
