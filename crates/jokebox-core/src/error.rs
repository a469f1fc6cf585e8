//! Error types for the joke service and its stores.

use std::fmt;

use thiserror::Error;

use crate::model::JokeId;

/// Result alias for service operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Client input rejected before any store interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// `question` or `answer` is absent from the body.
    #[error("body must contain question and answer")]
    MissingFields,

    /// `question` or `answer` is not a string, or is blank.
    #[error("question and answer must be non-empty strings")]
    InvalidFields,
}

/// Failures raised by a store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite backend error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// PostgreSQL backend error.
    #[cfg(feature = "postgres")]
    #[error("postgres error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// A blocking store task panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The store cannot be reached. The bundled backends report their
    /// native errors instead; this is for `JokeStore` implementations
    /// outside this crate, such as the failing doubles in the tests.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Malformed store URL.
    #[error("invalid store url: {0}")]
    InvalidUrl(String),

    /// Backend recognised but not compiled in.
    #[error("unsupported store backend: {0}")]
    UnsupportedBackend(String),
}

/// Service operation, used to phrase store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    ListAll,
    GetRandom,
    GetById(JokeId),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Create => f.write_str("failed to add the joke, please try again"),
            Operation::ListAll => f.write_str("failed to retrieve jokes, please try again"),
            Operation::GetRandom => {
                f.write_str("failed to retrieve a random joke, please try again")
            }
            Operation::GetById(id) => write!(
                f,
                "failed to retrieve the joke with id {}, please try again",
                id
            ),
        }
    }
}

/// Joke service errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed client input.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The collection is empty.
    #[error("no jokes available")]
    NoJokes,

    /// No record matches the requested identifier.
    #[error("joke not found for given id")]
    JokeNotFound,

    /// The store failed while serving `operation`.
    #[error("{operation}")]
    Store {
        operation: Operation,
        #[source]
        source: StoreError,
    },
}

/// Coarse classification of [`Error`], one per response class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Store,
}

impl Error {
    /// Wrap a store failure for the given operation.
    pub fn store(operation: Operation, source: StoreError) -> Self {
        Error::Store { operation, source }
    }

    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::NoJokes | Error::JokeNotFound => ErrorKind::NotFound,
            Error::Store { .. } => ErrorKind::Store,
        }
    }

    /// Underlying failure detail. Only store failures expose one.
    pub fn detail(&self) -> Option<String> {
        match self {
            Error::Store { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::MissingFields.to_string(),
            "body must contain question and answer"
        );
        assert_eq!(
            Error::from(ValidationError::InvalidFields).to_string(),
            "question and answer must be non-empty strings"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            Error::from(ValidationError::MissingFields).kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::NoJokes.kind(), ErrorKind::NotFound);
        assert_eq!(Error::JokeNotFound.kind(), ErrorKind::NotFound);

        let err = Error::store(
            Operation::ListAll,
            StoreError::Unavailable("connection refused".into()),
        );
        assert_eq!(err.kind(), ErrorKind::Store);
    }

    #[test]
    fn test_only_store_errors_carry_detail() {
        assert!(Error::NoJokes.detail().is_none());
        assert!(Error::from(ValidationError::InvalidFields).detail().is_none());

        let err = Error::store(
            Operation::GetById(JokeId(7)),
            StoreError::Unavailable("connection refused".into()),
        );
        assert_eq!(
            err.to_string(),
            "failed to retrieve the joke with id 7, please try again"
        );
        assert_eq!(
            err.detail().as_deref(),
            Some("store unavailable: connection refused")
        );
    }
}
