//! In-process store backed by a vector.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use rand::seq::SliceRandom;

use crate::error::StoreError;
use crate::model::{Joke, JokeId, NewJoke};

use super::JokeStore;

#[derive(Debug)]
struct MemoryState {
    next_id: i64,
    jokes: Vec<Joke>,
}

/// Volatile store. Records live as long as the value does.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    /// Create an empty store. The first id handed out is 1.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState {
                next_id: 1,
                jokes: Vec::new(),
            }),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.state.read().jokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JokeStore for MemoryStore {
    async fn create(&self, new: NewJoke) -> Result<Joke, StoreError> {
        let mut state = self.state.write();
        let id = JokeId(state.next_id);
        state.next_id += 1;

        let joke = new.into_joke(id, Utc::now());
        state.jokes.push(joke.clone());
        Ok(joke)
    }

    async fn find_all(&self) -> Result<Vec<Joke>, StoreError> {
        Ok(self.state.read().jokes.clone())
    }

    async fn find_random(&self) -> Result<Option<Joke>, StoreError> {
        let state = self.state.read();
        Ok(state.jokes.choose(&mut rand::thread_rng()).cloned())
    }

    async fn find_by_id(&self, id: JokeId) -> Result<Option<Joke>, StoreError> {
        // Ids are pushed in increasing order.
        let state = self.state.read();
        Ok(state
            .jokes
            .binary_search_by_key(&id, |joke| joke.id)
            .ok()
            .map(|idx| state.jokes[idx].clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
