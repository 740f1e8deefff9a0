mod comments;
mod health;
mod movies;

use axum::Router;
use axum::routing::get;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route(
            "/api/movies",
            get(movies::list)
                .post(movies::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/movie/{movie_id}",
            get(movies::get)
                .put(movies::update)
                .delete(movies::delete)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/movie/{movie_id}/comments",
            get(comments::list)
                .post(comments::create)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/movie/{movie_id}/comment/{comment_id}",
            get(comments::get)
                .put(comments::update)
                .delete(comments::delete)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found() -> ApiError {
    ApiError::NotFound("Not Found".into())
}
