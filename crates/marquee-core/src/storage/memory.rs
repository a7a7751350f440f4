//! # In-Memory Store
//!
//! A `MovieStore` backed by a plain vector. Native order is insertion order.

use super::MovieStore;
use crate::{MarqueeError, Movie};

/// In-memory movies collection.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    movies: Vec<Movie>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a movie.
    pub fn insert(&mut self, movie: Movie) {
        self.movies.push(movie);
    }
}

impl From<Vec<Movie>> for MemoryStore {
    fn from(movies: Vec<Movie>) -> Self {
        Self { movies }
    }
}

impl FromIterator<Movie> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = Movie>>(iter: I) -> Self {
        Self {
            movies: iter.into_iter().collect(),
        }
    }
}

impl MovieStore for MemoryStore {
    fn documents(&self) -> Result<Vec<Movie>, MarqueeError> {
        Ok(self.movies.clone())
    }

    fn count(&self) -> Result<usize, MarqueeError> {
        Ok(self.movies.len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut store = MemoryStore::new();
        store.insert(Movie::new("b"));
        store.insert(Movie::new("a"));

        let titles: Vec<_> = store
            .documents()
            .unwrap()
            .into_iter()
            .filter_map(|m| m.title)
            .collect();
        assert_eq!(titles, vec!["b", "a"]);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn collects_from_iterator() {
        let store: MemoryStore = (0..3).map(|i| Movie::new(format!("m{i}"))).collect();
        assert_eq!(store.count().unwrap(), 3);
    }
}
