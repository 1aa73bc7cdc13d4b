use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::queries::uploads::AggregationError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. Currently always `DATABASE_UNAVAILABLE`.
    #[schema(example = "DATABASE_UNAVAILABLE")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Database is not reachable")]
    pub message: String,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    /// The backing store did not answer. Contains the underlying detail,
    /// which is logged but not returned to the client.
    DatabaseUnavailable(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::DatabaseUnavailable(detail) => {
                tracing::warn!("Database unavailable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "DATABASE_UNAVAILABLE",
                        message: "Database is not reachable".into(),
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<AggregationError> for AppError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::DataSourceUnavailable(e) => AppError::DatabaseUnavailable(format!(
                "Failed to fetch users with uploads: {e}"
            )),
        }
    }
}
