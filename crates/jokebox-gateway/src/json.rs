//! JSON response types for the HTTP gateway.

use jokebox_core::Joke;
use serde::Serialize;

/// Message returned with a newly created joke.
pub const JOKE_CREATED: &str = "joke added successfully";

/// Body of a successful `POST /jokes`.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Human-readable confirmation.
    pub message: String,
    /// The persisted record.
    pub joke: Joke,
}

impl CreatedResponse {
    pub fn new(joke: Joke) -> Self {
        Self {
            message: JOKE_CREATED.to_string(),
            joke,
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description.
    pub message: String,
    /// Underlying failure detail, server errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status.
    pub status: String,
    /// Gateway version.
    pub version: String,
    /// Store backend name.
    pub backend: String,
    /// Whether the store answered a ping.
    pub store_connected: bool,
}
