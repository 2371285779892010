/// User management endpoints
///
/// # Endpoints
///
/// - `GET /api/users` - List users
/// - `POST /api/users` - Create user
/// - `DELETE /api/users/:name` - Delete user by name

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, ValidatedJson},
    routes::MessageResponse,
};
use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tasklog_shared::models::user::{CreateUser, User};
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name, also the lookup key
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Assigned project
    #[serde(default)]
    #[validate(length(min = 1, message = "Project is required"))]
    pub project: String,

    /// Initial task names (defaults to none)
    #[serde(default)]
    pub tasks: Option<Vec<String>>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            name: req.name,
            project: req.project,
            tasks: req.tasks,
        }
    }
}

/// List all users
///
/// # Endpoint
///
/// ```text
/// GET /api/users
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "uuid",
///     "name": "Jane Smith",
///     "project": "Mobile App Development",
///     "tasks": ["Design Documentation", "User Research"]
///   }
/// ]
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// Create a user
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// Content-Type: application/json
///
/// {
///   "name": "Ann",
///   "project": "Website Refresh",
///   "tasks": ["Design Review"]
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing name/project or malformed body
/// - `409 Conflict`: A user with this name already exists
/// - `500 Internal Server Error`: Storage failure
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.store.create_user(req.into()).await?;

    tracing::info!(id = %user.id, name = %user.name, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// Delete a user by name
///
/// The name is taken from the percent-decoded path segment. The user's task
/// logs are not removed.
///
/// # Endpoint
///
/// ```text
/// DELETE /api/users/Jane%20Smith
/// ```
///
/// # Errors
///
/// - `404 Not Found`: No user with this name
/// - `500 Internal Server Error`: Storage failure
pub async fn delete_user(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> ApiResult<Json<MessageResponse>> {
    if !state.store.delete_user(&name).await? {
        return Err(ApiError::NotFound("User not found".to_string()));
    }

    tracing::info!(name = %name, "User deleted");
    Ok(Json(MessageResponse::new("User deleted successfully")))
}
