use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::health::HealthResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    operation_id = "getHealth",
    summary = "Check database reachability",
    description = "Pings the database. Lets callers tell an empty admin summary apart from an unreachable store.",
    responses(
        (status = 200, description = "Database reachable", body = HealthResponse),
        (status = 503, description = "Database unreachable (DATABASE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state
        .db
        .ping()
        .await
        .map_err(|e| AppError::DatabaseUnavailable(e.to_string()))?;

    Ok(Json(HealthResponse { status: "ok" }))
}
