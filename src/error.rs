use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Everything a handler can answer with besides success.
///
/// Store failures carry only the generic message shown to the caller; the
/// underlying error is logged where it happens.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    Store(&'static str),
    /// Body that isn't the JSON the route expects; status comes from the rejection.
    #[error("{message}")]
    Body { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Body { status, .. } => *status,
        }
    }

    /// Logs `err` and hides it behind `message`.
    pub fn store(message: &'static str, err: anyhow::Error) -> Self {
        tracing::error!(error = ?err, "{message}");
        ApiError::Store(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::NotFound => json!({ "message": self.to_string() }),
            ApiError::Validation(_) | ApiError::Store(_) | ApiError::Body { .. } => {
                json!({ "error": self.to_string() })
            }
        };
        (self.status(), Json(body)).into_response()
    }
}
