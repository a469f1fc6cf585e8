//! Joke endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use jokebox_core::{Joke, NewJoke};
use serde_json::Value;

use crate::error::AppError;
use crate::json::CreatedResponse;
use crate::AppState;

/// Greeting served at the mount point.
pub const GREETING: &str = "Hello from server !";

/// Joke routes, relative to the configured base path.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(greeting))
        .route("/jokes", get(list_jokes).post(create_joke))
        .route("/jokes/random", get(random_joke))
        .route("/jokes/:id", get(joke_by_id))
}

async fn greeting() -> &'static str {
    GREETING
}

/// Handle joke creation.
async fn create_joke(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let Json(body) = payload?;
    let new = NewJoke::from_body(&body)?;
    let joke = state.service.create(new).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse::new(joke))))
}

/// Handle listing every joke.
async fn list_jokes(State(state): State<AppState>) -> Result<Json<Vec<Joke>>, AppError> {
    Ok(Json(state.service.list_all().await?))
}

/// Handle fetching a random joke.
async fn random_joke(State(state): State<AppState>) -> Result<Json<Joke>, AppError> {
    Ok(Json(state.service.get_random().await?))
}

/// Handle fetching a joke by id.
async fn joke_by_id(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Joke>, AppError> {
    let Path(id) = id?;
    Ok(Json(state.service.get_by_id(&id).await?))
}
