use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mflix_orm::OrmError;

use crate::envelope::Envelope;

#[derive(Debug)]
pub enum ApiError {
    Orm(OrmError),
    NotFound(String),
    BadRequest(String),
    MethodNotAllowed,
    Internal(String),
}

impl ApiError {
    pub fn not_found(kind: &str, id: &str) -> Self {
        ApiError::NotFound(format!("Unknown {kind}: {id}"))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Orm(e) => match e {
                OrmError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
                OrmError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
                OrmError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::NotFound(msg) | ApiError::BadRequest(msg) => msg.clone(),
            ApiError::MethodNotAllowed => "Method Not Allowed".into(),
            ApiError::Internal(_) => "Internal Error".into(),
            ApiError::Orm(e) => match e {
                OrmError::InvalidIdentifier(id) => format!("Invalid ID: {id}"),
                OrmError::Connection(_) => "Service Unavailable".into(),
                OrmError::Store(_) => "Internal Error".into(),
            },
        }
    }
}

impl From<OrmError> for ApiError {
    fn from(e: OrmError) -> Self {
        ApiError::Orm(e)
    }
}

impl From<bson::ser::Error> for ApiError {
    fn from(e: bson::ser::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            match &self {
                ApiError::Orm(e) => tracing::error!(error = %e, "request failed"),
                ApiError::Internal(msg) => tracing::error!(error = %msg, "request failed"),
                _ => {}
            }
        }
        Envelope::error(status, self.message()).into_response()
    }
}
