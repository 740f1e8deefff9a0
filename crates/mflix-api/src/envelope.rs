use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

/// Response body shared by every endpoint: `{status, data}` on success and
/// `{status, message}` on failure. The HTTP status always equals `status`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            data: Some(data),
            message: None,
        }
    }

    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            data: None,
            message: Some(message.into()),
        }
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
