/// Task log endpoints
///
/// # Endpoints
///
/// - `POST /api/logs` - Submit a task log
/// - `GET /api/logs` - List logs, optionally filtered with `?user=`
/// - `DELETE /api/logs` - Clear all logs

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiQuery, ValidatedJson},
    routes::MessageResponse,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::borrow::Cow;
use tasklog_shared::models::task_log::{CreateTaskLog, TaskLog, TaskStatus};
use validator::{Validate, ValidationError};

/// Submit task log request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskLogRequest {
    /// Submitting user's name
    #[serde(default)]
    #[validate(length(min = 1, message = "User is required"))]
    pub user: String,

    /// Task name
    #[serde(default)]
    #[validate(length(min = 1, message = "Task is required"))]
    pub task: String,

    /// "COMPLETED" (default) or "NOT COMPLETED"
    #[serde(default)]
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,

    /// Optional note; an empty string is stored as no comment
    #[serde(default)]
    pub comment: Option<String>,
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if TaskStatus::parse(status).is_some() {
        return Ok(());
    }

    let mut error = ValidationError::new("status");
    error.message = Some(Cow::from(
        "Status must be \"COMPLETED\" or \"NOT COMPLETED\"",
    ));
    Err(error)
}

impl From<CreateTaskLogRequest> for CreateTaskLog {
    fn from(req: CreateTaskLogRequest) -> Self {
        CreateTaskLog {
            user: req.user,
            task: req.task,
            status: req.status.as_deref().and_then(TaskStatus::parse),
            comment: req.comment.filter(|c| !c.is_empty()),
        }
    }
}

/// Query parameters for listing logs
#[derive(Debug, Default, Deserialize)]
pub struct ListLogsQuery {
    /// Exact user name; empty means no filter
    pub user: Option<String>,
}

/// Submit a task log
///
/// The timestamp is always assigned by the server.
///
/// # Endpoint
///
/// ```text
/// POST /api/logs
/// Content-Type: application/json
///
/// {
///   "user": "Jane Smith",
///   "task": "User Research",
///   "status": "NOT COMPLETED",
///   "comment": "Waiting on recruiting"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": "uuid",
///   "user": "Jane Smith",
///   "task": "User Research",
///   "status": "NOT COMPLETED",
///   "comment": "Waiting on recruiting",
///   "timestamp": "2025-01-03T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing user/task, unknown status, or malformed body
/// - `500 Internal Server Error`: Storage failure
pub async fn create_task_log(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateTaskLogRequest>,
) -> ApiResult<(StatusCode, Json<TaskLog>)> {
    let log = state.store.create_task_log(req.into()).await?;

    tracing::info!(id = %log.id, user = %log.user, status = %log.status, "Task log created");
    Ok((StatusCode::CREATED, Json(log)))
}

/// List task logs, newest first
///
/// # Endpoint
///
/// ```text
/// GET /api/logs
/// GET /api/logs?user=Jane%20Smith
/// ```
pub async fn list_task_logs(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListLogsQuery>,
) -> ApiResult<Json<Vec<TaskLog>>> {
    let logs = match query.user.filter(|u| !u.is_empty()) {
        Some(user) => state.store.list_task_logs_by_user(&user).await?,
        None => state.store.list_task_logs().await?,
    };

    Ok(Json(logs))
}

/// Clear every task log
///
/// # Endpoint
///
/// ```text
/// DELETE /api/logs
/// ```
pub async fn clear_task_logs(State(state): State<AppState>) -> ApiResult<Json<MessageResponse>> {
    state.store.clear_task_logs().await?;

    tracing::info!("Task logs cleared");
    Ok(Json(MessageResponse::new("Task logs cleared")))
}
