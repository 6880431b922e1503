use axum::{extract::rejection::JsonRejection, routing::post, Extension, Json, Router};
use serde::{Deserialize, Serialize};

use super::transform_error::TransformError;
use crate::app_module::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    pub text: Option<String>,
    pub transformation_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TransformResponse {
    pub transformed_text: String,
}

pub fn transform_router() -> Router {
    Router::new().route("/transform", post(transform_text))
}

pub async fn transform_text(
    Extension(ctx): Extension<AppState>,
    payload: Result<Json<TransformRequest>, JsonRejection>,
) -> Result<Json<TransformResponse>, TransformError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!("Rejected transform request body: {}", rejection.body_text());
        TransformError::MalformedRequest(rejection.body_text())
    })?;

    let (Some(text), Some(transformation_type)) = (request.text, request.transformation_type)
    else {
        tracing::warn!("Transform request is missing required fields");
        return Err(TransformError::missing_fields());
    };

    let transformed_text = ctx
        .service
        .transform_service
        .transform(&transformation_type, &text)
        .await?;

    Ok(Json(TransformResponse { transformed_text }))
}
