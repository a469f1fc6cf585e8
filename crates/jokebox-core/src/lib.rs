//! Jokebox Core - joke records, store backends, and the service contract.
//!
//! The [`JokeService`] validates input, talks to a [`JokeStore`] and maps every
//! outcome into the [`Error`] taxonomy consumed by the HTTP gateway.

pub mod error;
pub mod model;
pub mod service;
pub mod store;

pub use error::{Error, ErrorKind, Operation, Result, StoreError, ValidationError};
pub use model::{Joke, JokeId, NewJoke};
pub use service::JokeService;
pub use store::{connect, JokeStore, MemoryStore, SqliteStore};

#[cfg(feature = "postgres")]
pub use store::PostgresStore;
