use axum::extract::State;
use bson::{Document, doc};
use mflix_orm::{COMMENTS, CommentPatch, NewComment, RecordId};
use tracing::info;

use crate::convert::{document_json, documents_json, result_json};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::extract::{Body, PathParams};
use crate::state::AppState;

/// Restricts a comment lookup to comments of `movie_id`.
fn parent_scope(movie_id: &str) -> Result<Document, ApiError> {
    let movie = RecordId::parse(movie_id)?;
    Ok(doc! { "movie_id": movie })
}

pub async fn list(
    State(state): State<AppState>,
    PathParams(movie_id): PathParams<String>,
) -> Result<Envelope, ApiError> {
    let movie = RecordId::parse(&movie_id)?;
    let comments = state.orm.find_by(COMMENTS, "movie_id", movie).await?;
    Ok(Envelope::ok(documents_json(comments)))
}

pub async fn create(
    State(state): State<AppState>,
    PathParams(movie_id): PathParams<String>,
    Body(comment): Body<NewComment>,
) -> Result<Envelope, ApiError> {
    let movie = RecordId::parse(&movie_id)?;
    let doc = comment.into_comment(movie).into_document()?;
    let result = state.orm.insert_one(COMMENTS, doc).await?;
    info!(id = %result.id, movie = %movie, "comment created");
    Ok(Envelope::ok(result_json(&result)?))
}

pub async fn get(
    State(state): State<AppState>,
    PathParams((movie_id, comment_id)): PathParams<(String, String)>,
) -> Result<Envelope, ApiError> {
    let scope = parent_scope(&movie_id)?;
    match state.orm.find_one(COMMENTS, &comment_id, Some(scope)).await? {
        Some(comment) => Ok(Envelope::ok(document_json(comment))),
        None => Err(ApiError::not_found("comment", &comment_id)),
    }
}

pub async fn update(
    State(state): State<AppState>,
    PathParams((movie_id, comment_id)): PathParams<(String, String)>,
    Body(patch): Body<CommentPatch>,
) -> Result<Envelope, ApiError> {
    let scope = parent_scope(&movie_id)?;
    let current = state
        .orm
        .find_one(COMMENTS, &comment_id, Some(scope))
        .await?
        .ok_or_else(|| ApiError::not_found("comment", &comment_id))?;

    let set = patch.merged_over(&current);
    let result = state
        .orm
        .update_one(COMMENTS, &comment_id, doc! { "$set": set })
        .await?;
    Ok(Envelope::ok(result_json(&result)?))
}

pub async fn delete(
    State(state): State<AppState>,
    PathParams((movie_id, comment_id)): PathParams<(String, String)>,
) -> Result<Envelope, ApiError> {
    let scope = parent_scope(&movie_id)?;
    let result = state
        .orm
        .delete_one(COMMENTS, &comment_id, Some(scope))
        .await?;
    if result.deleted > 0 {
        info!(id = %comment_id, movie = %movie_id, "comment deleted");
    }
    Ok(Envelope::ok(result_json(&result)?))
}
