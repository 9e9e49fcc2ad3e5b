use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::json;

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("{0}")]
    NotFound(String),
}

impl From<garde::Report> for ApiError {
    fn from(report: garde::Report) -> Self {
        let messages = report
            .iter()
            .map(|(path, error)| format!("{path}: {error}"))
            .collect();
        ApiError::Validation(messages)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl From<mvs_dal::Error> for ApiError {
    fn from(error: mvs_dal::Error) -> Self {
        match error {
            mvs_dal::Error::RecordNotFound(_) => ApiError::NotFound("Movie not found".to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(messages) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": messages }))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
        }
    }
}
