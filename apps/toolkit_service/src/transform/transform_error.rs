use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("{0}")]
    MalformedRequest(String),

    #[error("Invalid transformation type: {0}")]
    InvalidTransformationType(String),

    #[error("Completion service error: {0:#}")]
    CompletionService(anyhow::Error),
}

impl TransformError {
    pub fn missing_fields() -> Self {
        TransformError::MalformedRequest(
            "Missing 'text' or 'transformationType' in request".to_string(),
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            TransformError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            TransformError::InvalidTransformationType(_) => StatusCode::BAD_REQUEST,
            TransformError::CompletionService(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for TransformError {
    fn into_response(self) -> Response {
        (
            self.status_code(),
            Json(serde_json::json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}
