use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

/// Error taxonomy surfaced by the domain services.
///
/// `QueryFailed` wraps the underlying persistence error; the detail is logged
/// at the point of conversion and never reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("database query failed")]
    QueryFailed(sqlx::Error),
    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!("Database query failed: {}", e);
        ApiError::QueryFailed(e)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::QueryFailed(_) | ApiError::Invariant(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Storage and invariant detail stays in the logs.
            ApiError::QueryFailed(_) | ApiError::Invariant(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "message": message
        }))
    }
}
