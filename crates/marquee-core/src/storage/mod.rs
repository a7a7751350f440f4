//! # Record Store
//!
//! The query engine reads movies through the `MovieStore` trait. The store is
//! a collaborator: it only has to hand back the documents of the collection in
//! its native order. All filtering, sorting and grouping happens in the engine.
//!
//! ## Backends
//!
//! - `MemoryStore`: in-memory vector (tests, embedding)
//! - `RedbStore`: embedded redb database file (server)
//! - `UnreachableStore`: placeholder for a store that failed to open

mod memory;
mod redb_store;

pub use memory::MemoryStore;
pub use redb_store::RedbStore;

use crate::{MarqueeError, Movie};

/// Read access to the movies collection.
///
/// Implementations must support concurrent readers: the server shares one
/// store across all in-flight requests without locking.
pub trait MovieStore: Send + Sync {
    /// Every document in store-native order.
    ///
    /// Native order is whatever order the backend iterates in. Callers must
    /// not rely on it being stable across calls.
    fn documents(&self) -> Result<Vec<Movie>, MarqueeError>;

    /// Number of documents in the collection.
    fn count(&self) -> Result<usize, MarqueeError>;
}

// =============================================================================
// UNREACHABLE STORE
// =============================================================================

/// A store whose connection attempt failed.
///
/// The server starts serving even when the database cannot be opened. Every
/// read then fails with the original connection error, which the API reports
/// as a 500.
#[derive(Debug, Clone)]
pub struct UnreachableStore {
    reason: String,
}

impl UnreachableStore {
    /// Create a store that fails every read with `reason`.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl MovieStore for UnreachableStore {
    fn documents(&self) -> Result<Vec<Movie>, MarqueeError> {
        Err(MarqueeError::StoreUnavailable(self.reason.clone()))
    }

    fn count(&self) -> Result<usize, MarqueeError> {
        Err(MarqueeError::StoreUnavailable(self.reason.clone()))
    }
}
