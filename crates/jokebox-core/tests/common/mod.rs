//! Store doubles shared by the integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use jokebox_core::{Joke, JokeId, JokeStore, MemoryStore, NewJoke, StoreError};

/// Store whose every call fails as if the database were unreachable.
pub struct FailingStore;

fn unreachable_store() -> StoreError {
    StoreError::Unavailable("connection refused".to_string())
}

#[async_trait]
impl JokeStore for FailingStore {
    async fn create(&self, _new: NewJoke) -> Result<Joke, StoreError> {
        Err(unreachable_store())
    }

    async fn find_all(&self) -> Result<Vec<Joke>, StoreError> {
        Err(unreachable_store())
    }

    async fn find_random(&self) -> Result<Option<Joke>, StoreError> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: JokeId) -> Result<Option<Joke>, StoreError> {
        Err(unreachable_store())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(unreachable_store())
    }

    fn backend(&self) -> &'static str {
        "failing"
    }
}

/// Memory store that counts round trips.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl JokeStore for CountingStore {
    async fn create(&self, new: NewJoke) -> Result<Joke, StoreError> {
        self.hit();
        self.inner.create(new).await
    }

    async fn find_all(&self) -> Result<Vec<Joke>, StoreError> {
        self.hit();
        self.inner.find_all().await
    }

    async fn find_random(&self) -> Result<Option<Joke>, StoreError> {
        self.hit();
        self.inner.find_random().await
    }

    async fn find_by_id(&self, id: JokeId) -> Result<Option<Joke>, StoreError> {
        self.hit();
        self.inner.find_by_id(id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    fn backend(&self) -> &'static str {
        "counting"
    }
}
