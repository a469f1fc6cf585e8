//! Joke store abstraction and its backends.
//!
//! The service only sees [`JokeStore`]; which backend sits behind it is chosen
//! at startup from a store URL (see [`connect`]).

pub mod memory;
pub mod sqlite;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::model::{Joke, JokeId, NewJoke};

/// Persistence operations required by the joke service.
///
/// Implementations own identifier assignment and must never reuse an id.
#[async_trait]
pub trait JokeStore: Send + Sync {
    /// Insert a record and return it with its assigned id.
    async fn create(&self, new: NewJoke) -> Result<Joke, StoreError>;

    /// All records in insertion order.
    async fn find_all(&self) -> Result<Vec<Joke>, StoreError>;

    /// One record picked uniformly at random, or `None` when empty.
    async fn find_random(&self) -> Result<Option<Joke>, StoreError>;

    /// Lookup by primary key.
    async fn find_by_id(&self, id: JokeId) -> Result<Option<Joke>, StoreError>;

    /// Connectivity probe.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Short backend name for diagnostics.
    fn backend(&self) -> &'static str;
}

/// Open a store from a URL, synchronising its schema.
///
/// Recognised forms:
/// - `memory` or `memory://`
/// - `sqlite::memory:`
/// - `sqlite://<path>` or `sqlite:<path>`
/// - `postgres://...` or `postgresql://...` (requires the `postgres` feature)
pub async fn connect(url: &str, max_connections: u32) -> Result<Arc<dyn JokeStore>, StoreError> {
    let url = url.trim();

    if url == "memory" || url == "memory://" {
        return Ok(Arc::new(MemoryStore::new()));
    }

    if url == "sqlite::memory:" {
        return Ok(Arc::new(SqliteStore::open_in_memory()?));
    }

    if let Some(path) = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))
    {
        if path.is_empty() {
            return Err(StoreError::InvalidUrl(url.to_string()));
        }
        let path = path.to_string();
        let store = tokio::task::spawn_blocking(move || SqliteStore::open(path)).await??;
        return Ok(Arc::new(store));
    }

    if url.starts_with("postgres://") || url.starts_with("postgresql://") {
        return connect_postgres(url, max_connections).await;
    }

    Err(StoreError::InvalidUrl(url.to_string()))
}

#[cfg(feature = "postgres")]
async fn connect_postgres(
    url: &str,
    max_connections: u32,
) -> Result<Arc<dyn JokeStore>, StoreError> {
    Ok(Arc::new(PostgresStore::connect(url, max_connections).await?))
}

#[cfg(not(feature = "postgres"))]
async fn connect_postgres(
    _url: &str,
    _max_connections: u32,
) -> Result<Arc<dyn JokeStore>, StoreError> {
    Err(StoreError::UnsupportedBackend(
        "postgres (rebuild with the `postgres` feature)".to_string(),
    ))
}
