use axum::extract::State;
use bson::{Document, doc};
use mflix_orm::{MOVIES, Movie, merge_fields};
use tracing::info;

use crate::convert::{document_json, documents_json, result_json};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::extract::{Body, PathParams};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> Result<Envelope, ApiError> {
    let movies = state.orm.find(MOVIES).await?;
    Ok(Envelope::ok(documents_json(movies)))
}

pub async fn create(
    State(state): State<AppState>,
    Body(movie): Body<Movie>,
) -> Result<Envelope, ApiError> {
    let result = state.orm.insert_one(MOVIES, movie.into_document()?).await?;
    info!(id = %result.id, "movie created");
    Ok(Envelope::ok(result_json(&result)?))
}

pub async fn get(
    State(state): State<AppState>,
    PathParams(movie_id): PathParams<String>,
) -> Result<Envelope, ApiError> {
    match state.orm.find_one(MOVIES, &movie_id, None).await? {
        Some(movie) => Ok(Envelope::ok(document_json(movie))),
        None => Err(ApiError::not_found("movie", &movie_id)),
    }
}

/// Read, merge the body over the stored keys, write back. Not atomic: a
/// concurrent writer between the read and the write is overwritten.
pub async fn update(
    State(state): State<AppState>,
    PathParams(movie_id): PathParams<String>,
    Body(patch): Body<Document>,
) -> Result<Envelope, ApiError> {
    let current = state
        .orm
        .find_one(MOVIES, &movie_id, None)
        .await?
        .ok_or_else(|| ApiError::not_found("movie", &movie_id))?;

    let merged = merge_fields(&current, &patch);
    let result = state
        .orm
        .update_one(MOVIES, &movie_id, doc! { "$set": merged })
        .await?;
    Ok(Envelope::ok(result_json(&result)?))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParams(movie_id): PathParams<String>,
) -> Result<Envelope, ApiError> {
    let result = state.orm.delete_one(MOVIES, &movie_id, None).await?;
    if result.deleted > 0 {
        info!(id = %movie_id, "movie deleted");
    }
    Ok(Envelope::ok(result_json(&result)?))
}
