/// Database models for Tasklog
///
/// This module contains the record types and their Postgres CRUD operations.
/// The in-memory store reuses the same types so both backends produce
/// identical JSON.
///
/// # Models
///
/// - `user`: Users, their project and assignable tasks
/// - `task_log`: Append-only task submissions
///
/// # Example
///
/// ```no_run
/// use tasklog_shared::models::task_log::{CreateTaskLog, TaskLog};
/// use tasklog_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let log = TaskLog::create(&pool, CreateTaskLog::new("Jane Smith", "User Research")).await?;
/// let recent = TaskLog::list_by_user(&pool, "Jane Smith").await?;
/// # Ok(())
/// # }
/// ```

pub mod task_log;
pub mod user;
