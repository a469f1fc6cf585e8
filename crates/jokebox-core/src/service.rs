//! Joke service: the four operations exposed over HTTP.
//!
//! Every operation performs at most one store round trip. Store failures are
//! logged here and surfaced as [`Error::Store`]; they are never retried.

use std::sync::Arc;

use tracing::{debug, error};

use crate::error::{Error, Operation, Result, StoreError};
use crate::model::{Joke, JokeId, NewJoke};
use crate::store::JokeStore;

/// Stateless joke service over an injected store.
#[derive(Clone)]
pub struct JokeService {
    store: Arc<dyn JokeStore>,
}

impl JokeService {
    /// Create a service backed by `store`.
    pub fn new(store: Arc<dyn JokeStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn JokeStore> {
        &self.store
    }

    /// Persist a validated joke and return it with its assigned id.
    pub async fn create(&self, new: NewJoke) -> Result<Joke> {
        let joke = self
            .store
            .create(new)
            .await
            .map_err(|e| store_failure(Operation::Create, e))?;
        debug!(id = %joke.id, "joke created");
        Ok(joke)
    }

    /// All jokes in insertion order. An empty collection is reported as
    /// [`Error::NoJokes`].
    pub async fn list_all(&self) -> Result<Vec<Joke>> {
        let jokes = self
            .store
            .find_all()
            .await
            .map_err(|e| store_failure(Operation::ListAll, e))?;
        if jokes.is_empty() {
            return Err(Error::NoJokes);
        }
        Ok(jokes)
    }

    /// One joke picked uniformly at random.
    pub async fn get_random(&self) -> Result<Joke> {
        self.store
            .find_random()
            .await
            .map_err(|e| store_failure(Operation::GetRandom, e))?
            .ok_or(Error::NoJokes)
    }

    /// Lookup by a raw identifier as it appears in a request path.
    ///
    /// An identifier that is not a decimal integer cannot match any primary
    /// key, so it is reported as [`Error::JokeNotFound`] without querying the
    /// store.
    pub async fn get_by_id(&self, raw_id: &str) -> Result<Joke> {
        let Some(id) = JokeId::parse(raw_id) else {
            debug!(raw_id, "non-numeric joke id");
            return Err(Error::JokeNotFound);
        };

        self.store
            .find_by_id(id)
            .await
            .map_err(|e| store_failure(Operation::GetById(id), e))?
            .ok_or(Error::JokeNotFound)
    }
}

fn store_failure(operation: Operation, source: StoreError) -> Error {
    error!(operation = ?operation, error = %source, "store operation failed");
    Error::store(operation, source)
}
