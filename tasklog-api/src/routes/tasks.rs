/// Task assignment endpoints
///
/// A user's task list is read and replaced as a whole. There is no per-task
/// add or remove.
///
/// # Endpoints
///
/// - `GET /api/tasks/:user` - Get a user's tasks
/// - `POST /api/tasks/:user` - Replace a user's tasks

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, ValidatedJson},
};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tasklog_shared::models::user::User;
use validator::Validate;

/// Get tasks response
#[derive(Debug, Serialize, Deserialize)]
pub struct UserTasksResponse {
    pub tasks: Vec<String>,
}

/// Replace tasks request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTasksRequest {
    /// New task list; replaces the old one entirely
    #[validate(required(message = "Tasks must be an array"))]
    pub tasks: Option<Vec<String>>,
}

/// Get a user's tasks
///
/// # Endpoint
///
/// ```text
/// GET /api/tasks/Jane%20Smith
/// ```
///
/// # Response
///
/// ```json
/// { "tasks": ["Design Documentation", "User Research", "Prototype Testing"] }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No user with this name
pub async fn get_user_tasks(
    State(state): State<AppState>,
    ApiPath(user): ApiPath<String>,
) -> ApiResult<Json<UserTasksResponse>> {
    let user = state
        .store
        .get_user(&user)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserTasksResponse { tasks: user.tasks }))
}

/// Replace a user's tasks
///
/// # Endpoint
///
/// ```text
/// POST /api/tasks/Jane%20Smith
/// Content-Type: application/json
///
/// { "tasks": ["User Research", "Usability Report"] }
/// ```
///
/// # Response
///
/// The updated user.
///
/// # Errors
///
/// - `400 Bad Request`: `tasks` missing or not an array of strings
/// - `404 Not Found`: No user with this name
pub async fn update_user_tasks(
    State(state): State<AppState>,
    ApiPath(user): ApiPath<String>,
    ValidatedJson(req): ValidatedJson<UpdateTasksRequest>,
) -> ApiResult<Json<User>> {
    let tasks = req.tasks.unwrap_or_default();

    let updated = state
        .store
        .update_user_tasks(&user, tasks)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    tracing::info!(name = %updated.name, tasks = updated.tasks.len(), "User tasks replaced");
    Ok(Json(updated))
}
