use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::admin::AdminSummaryResponse;
use crate::queries::uploads::fetch_users_with_uploads;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/summary",
    tag = "Admin",
    operation_id = "getAdminSummary",
    summary = "List every user with their uploads",
    description = "Returns all users ordered by creation time (newest first), each with the full list of their uploads. \
        Users without uploads are included with an empty `uploads` array. \
        A database failure is reported as an error rather than an empty list.",
    responses(
        (status = 200, description = "Users with uploads", body = AdminSummaryResponse),
        (status = 503, description = "Database read failed (DATABASE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<AdminSummaryResponse>, AppError> {
    let users = fetch_users_with_uploads(&state.db).await?;

    Ok(Json(AdminSummaryResponse::from(users)))
}
