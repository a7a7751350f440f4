//! # redb-backed Movie Store
//!
//! A disk-backed movies collection using the redb embedded database.
//!
//! Each movie is one JSON document keyed by a monotonically increasing `u64`.
//! Native order is key order, i.e. insertion order. redb gives MVCC reads, so
//! a single `RedbStore` serves any number of concurrent readers.
//!
//! `open` takes a shared, read-only handle: the server, `marquee status` and
//! `marquee query` can all hold the same file. `create` takes the exclusive
//! writable handle that `insert_many` needs.

use super::MovieStore;
use crate::{MarqueeError, Movie};
use redb::{
    Database, ReadOnlyDatabase, ReadTransaction, ReadableDatabase, ReadableTable,
    ReadableTableMetadata, TableDefinition, TableError,
};
use std::path::Path;

/// Table for movies: document id (u64) -> JSON document bytes
const MOVIES: TableDefinition<u64, &[u8]> = TableDefinition::new("movies");

/// Table for metadata: key string -> value u64
const METADATA: TableDefinition<&str, u64> = TableDefinition::new("metadata");

const NEXT_ID_KEY: &str = "next_id";

enum Handle {
    ReadOnly(ReadOnlyDatabase),
    Writable(Database),
}

/// A disk-backed movies collection.
pub struct RedbStore {
    handle: Handle,
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.handle {
            Handle::ReadOnly(_) => "read-only",
            Handle::Writable(_) => "writable",
        };
        f.debug_struct("RedbStore")
            .field("mode", &mode)
            .finish_non_exhaustive()
    }
}

impl RedbStore {
    /// Open an existing database file for reading.
    ///
    /// Fails with `StoreUnavailable` if the file does not exist, is not a
    /// redb database, or is held by a writer.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, MarqueeError> {
        let path = path.as_ref();
        let db = ReadOnlyDatabase::open(path).map_err(|e| {
            MarqueeError::StoreUnavailable(format!("Cannot open {}: {}", path.display(), e))
        })?;
        Ok(Self {
            handle: Handle::ReadOnly(db),
        })
    }

    /// Create a database file, or open it for writing if it already exists.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, MarqueeError> {
        let db =
            Database::create(path.as_ref()).map_err(|e| MarqueeError::IoError(e.to_string()))?;
        Self::init_tables(&db).map_err(|e| MarqueeError::IoError(e.to_string()))?;
        Ok(Self {
            handle: Handle::Writable(db),
        })
    }

    /// Make sure both tables exist so read transactions can open them.
    fn init_tables(db: &Database) -> Result<(), redb::Error> {
        let write_txn = db.begin_write()?;
        let _ = write_txn.open_table(MOVIES)?;
        let _ = write_txn.open_table(METADATA)?;
        write_txn.commit()?;
        Ok(())
    }

    fn begin_read(&self) -> Result<ReadTransaction, MarqueeError> {
        let txn = match &self.handle {
            Handle::ReadOnly(db) => db.begin_read(),
            Handle::Writable(db) => db.begin_read(),
        };
        txn.map_err(MarqueeError::store)
    }

    /// Insert a batch of movies in a single ACID transaction.
    ///
    /// Returns the assigned document ids, in input order. Either every movie
    /// is written or none is. Fails on a store returned by `open`.
    pub fn insert_many(&self, movies: &[Movie]) -> Result<Vec<u64>, MarqueeError> {
        if movies.is_empty() {
            return Ok(Vec::new());
        }

        // Encode everything before the transaction opens.
        let documents = movies
            .iter()
            .map(serde_json::to_vec)
            .collect::<Result<Vec<_>, _>>()
            .map_err(MarqueeError::store)?;

        let Handle::Writable(db) = &self.handle else {
            return Err(MarqueeError::IoError(
                "database was opened read-only".to_string(),
            ));
        };

        let write_txn = db.begin_write().map_err(MarqueeError::store)?;
        let mut ids = Vec::with_capacity(documents.len());
        {
            let mut meta_table = write_txn
                .open_table(METADATA)
                .map_err(MarqueeError::store)?;
            let mut movies_table = write_txn.open_table(MOVIES).map_err(MarqueeError::store)?;

            let mut next_id = meta_table
                .get(NEXT_ID_KEY)
                .map_err(MarqueeError::store)?
                .map(|v| v.value())
                .unwrap_or(0);

            for document in &documents {
                movies_table
                    .insert(next_id, document.as_slice())
                    .map_err(MarqueeError::store)?;
                ids.push(next_id);
                next_id = next_id.saturating_add(1);
            }

            meta_table
                .insert(NEXT_ID_KEY, next_id)
                .map_err(MarqueeError::store)?;
        }
        write_txn.commit().map_err(MarqueeError::store)?;

        Ok(ids)
    }
}

// =============================================================================
// MOVIESTORE TRAIT IMPLEMENTATION
// =============================================================================

impl MovieStore for RedbStore {
    fn documents(&self) -> Result<Vec<Movie>, MarqueeError> {
        let read_txn = self.begin_read()?;
        let table = match read_txn.open_table(MOVIES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(Vec::new()),
            Err(e) => return Err(MarqueeError::store(e)),
        };

        let mut movies = Vec::new();
        for entry in table.iter().map_err(MarqueeError::store)? {
            let (id, value) = entry.map_err(MarqueeError::store)?;
            let movie: Movie = serde_json::from_slice(value.value()).map_err(|e| {
                MarqueeError::StoreUnavailable(format!(
                    "Malformed document {}: {}",
                    id.value(),
                    e
                ))
            })?;
            movies.push(movie);
        }
        Ok(movies)
    }

    fn count(&self) -> Result<usize, MarqueeError> {
        let read_txn = self.begin_read()?;
        let table = match read_txn.open_table(MOVIES) {
            Ok(table) => table,
            Err(TableError::TableDoesNotExist(_)) => return Ok(0),
            Err(e) => return Err(MarqueeError::store(e)),
        };
        let len = table.len().map_err(MarqueeError::store)?;
        Ok(len as usize)
    }
}

// =============================================================================
// TESTS
// =============================================================================
