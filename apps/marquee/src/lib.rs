//! # Marquee application library
//!
//! Exposes the HTTP API and the CLI so the binary and the integration tests
//! share one implementation.

pub mod api;
pub mod cli;
