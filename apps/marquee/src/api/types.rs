//! # API Request/Response Types
//!
//! This module defines the JSON structures for the HTTP API that are not
//! core data types. Query results are serialized straight from
//! `marquee_core` (`Movie`, `YearCount`, `CountryRatingSummary`).

use serde::{Deserialize, Serialize};

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// MESSAGE RESPONSE
// =============================================================================

/// Body of every error response: `{"message": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// Query string of `GET /api/movies/top-countries`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopCountriesParams {
    pub country: Option<String>,
}
