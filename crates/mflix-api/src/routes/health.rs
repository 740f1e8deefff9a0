use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn healthz(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    state.orm.ping().await?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
