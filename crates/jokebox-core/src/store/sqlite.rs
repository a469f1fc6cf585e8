//! SQLite store.
//!
//! A single `rusqlite` connection guarded by a mutex. Statements run on the
//! blocking thread pool so request tasks never block the runtime.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::error::StoreError;
use crate::model::{Joke, JokeId, NewJoke};

use super::JokeStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jokes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    question TEXT NOT NULL CHECK (question <> ''),
    answer TEXT NOT NULL CHECK (answer <> ''),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

const COLUMNS: &str = "id, question, answer, created_at, updated_at";

/// SQLite-backed joke store.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) a database file and synchronise the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening sqlite store");
        Self::from_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn.lock();
            f(&conn).map_err(StoreError::from)
        })
        .await?
    }
}

fn row_to_joke(row: &Row<'_>) -> rusqlite::Result<Joke> {
    Ok(Joke {
        id: JokeId(row.get(0)?),
        question: row.get(1)?,
        answer: row.get(2)?,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[async_trait]
impl JokeStore for SqliteStore {
    async fn create(&self, new: NewJoke) -> Result<Joke, StoreError> {
        self.with_conn(move |conn| {
            let now = Utc::now();
            conn.query_row(
                &format!(
                    "INSERT INTO jokes (question, answer, created_at, updated_at) \
                     VALUES (?1, ?2, ?3, ?3) RETURNING {}",
                    COLUMNS
                ),
                params![new.question(), new.answer(), now],
                row_to_joke,
            )
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<Joke>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM jokes ORDER BY id", COLUMNS))?;
            let jokes = stmt
                .query_map([], row_to_joke)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(jokes)
        })
        .await
    }

    async fn find_random(&self) -> Result<Option<Joke>, StoreError> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {} FROM jokes ORDER BY RANDOM() LIMIT 1", COLUMNS),
                [],
                row_to_joke,
            )
            .optional()
        })
        .await
    }

    async fn find_by_id(&self, id: JokeId) -> Result<Option<Joke>, StoreError> {
        self.with_conn(move |conn| {
            conn.query_row(
                &format!("SELECT {} FROM jokes WHERE id = ?1", COLUMNS),
                params![id.0],
                row_to_joke,
            )
            .optional()
        })
        .await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.with_conn(|conn| conn.query_row("SELECT 1", [], |_| Ok(())))
            .await
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
