//! PostgreSQL store.
//!
//! Enable with `--features postgres`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tracing::debug;

use crate::error::StoreError;
use crate::model::{Joke, JokeId, NewJoke};

use super::JokeStore;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS jokes (
    id BIGSERIAL PRIMARY KEY,
    question TEXT NOT NULL CHECK (question <> ''),
    answer TEXT NOT NULL CHECK (answer <> ''),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// PostgreSQL-backed joke store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect a pool and synchronise the schema.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and synchronise the schema.
    pub async fn from_pool(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        debug!("postgres schema synchronised");
        Ok(Self { pool })
    }
}

fn row_to_joke(row: &sqlx::postgres::PgRow) -> Result<Joke, sqlx::Error> {
    Ok(Joke {
        id: JokeId(row.try_get("id")?),
        question: row.try_get("question")?,
        answer: row.try_get("answer")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl JokeStore for PostgresStore {
    async fn create(&self, new: NewJoke) -> Result<Joke, StoreError> {
        let row = sqlx::query(
            r#"INSERT INTO jokes (question, answer) VALUES ($1, $2)
               RETURNING id, question, answer, created_at, updated_at"#,
        )
        .bind(new.question())
        .bind(new.answer())
        .fetch_one(&self.pool)
        .await?;
        Ok(row_to_joke(&row)?)
    }

    async fn find_all(&self) -> Result<Vec<Joke>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, question, answer, created_at, updated_at FROM jokes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(row_to_joke).collect::<Result<Vec<_>, _>>()?)
    }

    async fn find_random(&self) -> Result<Option<Joke>, StoreError> {
        let row = sqlx::query(
            "SELECT id, question, answer, created_at, updated_at FROM jokes ORDER BY RANDOM() LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_joke).transpose()?)
    }

    async fn find_by_id(&self, id: JokeId) -> Result<Option<Joke>, StoreError> {
        let row = sqlx::query(
            "SELECT id, question, answer, created_at, updated_at FROM jokes WHERE id = $1",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(row_to_joke).transpose()?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
