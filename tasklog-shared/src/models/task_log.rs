/// Task log model and database operations
///
/// A task log is one submission by a user: which task, whether it was
/// completed, and an optional comment. Logs are append-only. The only way to
/// remove them is [`TaskLog::delete_all`].
///
/// # Schema
///
/// ```sql
/// CREATE TABLE task_logs (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     "user" TEXT NOT NULL,
///     task TEXT NOT NULL,
///     status TEXT NOT NULL DEFAULT 'COMPLETED',
///     comment TEXT,
///     "timestamp" TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// `"user"` holds the submitting user's name. It is not a foreign key, so
/// logs outlive the user that wrote them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::fmt;
use uuid::Uuid;

/// Completion status of a submitted task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// The task was done
    #[default]
    #[serde(rename = "COMPLETED")]
    Completed,

    /// The task was attempted or skipped but not done
    #[serde(rename = "NOT COMPLETED")]
    NotCompleted,
}

impl TaskStatus {
    /// Converts status to string for database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Completed => "COMPLETED",
            TaskStatus::NotCompleted => "NOT COMPLETED",
        }
    }

    /// Parses status from its stored form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "COMPLETED" => Some(TaskStatus::Completed),
            "NOT COMPLETED" => Some(TaskStatus::NotCompleted),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not recognized
#[derive(Debug, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct UnknownStatus(pub String);

impl TryFrom<String> for TaskStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TaskStatus::parse(&value).ok_or(UnknownStatus(value))
    }
}

/// One task submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TaskLog {
    /// Unique log ID (UUID v4)
    pub id: Uuid,

    /// Name of the submitting user
    pub user: String,

    /// Task name
    pub task: String,

    #[sqlx(try_from = "String")]
    pub status: TaskStatus,

    /// Free-text note, serialized as `null` when absent
    pub comment: Option<String>,

    /// Assigned by the store at creation
    pub timestamp: DateTime<Utc>,
}

/// Input for creating a task log
///
/// The timestamp is never caller-supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskLog {
    pub user: String,

    pub task: String,

    /// Defaults to [`TaskStatus::Completed`]
    #[serde(default)]
    pub status: Option<TaskStatus>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl CreateTaskLog {
    /// Creates input with default status and no comment
    pub fn new(user: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            task: task.into(),
            status: None,
            comment: None,
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Status with the default applied
    pub fn status_or_default(&self) -> TaskStatus {
        self.status.unwrap_or_default()
    }
}

impl TaskLog {
    /// Inserts a new log, stamping it with the database clock
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tasklog_shared::models::task_log::{TaskLog, CreateTaskLog, TaskStatus};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let log = TaskLog::create(
    ///     &pool,
    ///     CreateTaskLog::new("Ann", "Design Review").with_comment("done early"),
    /// )
    /// .await?;
    /// assert_eq!(log.status, TaskStatus::Completed);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create(pool: &PgPool, data: CreateTaskLog) -> Result<Self, sqlx::Error> {
        let status = data.status_or_default();

        let log = sqlx::query_as::<_, TaskLog>(
            r#"
            INSERT INTO task_logs ("user", task, status, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, "user", task, status, comment, "timestamp"
            "#,
        )
        .bind(data.user)
        .bind(data.task)
        .bind(status.as_str())
        .bind(data.comment)
        .fetch_one(pool)
        .await?;

        Ok(log)
    }

    /// Lists all logs, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let logs = sqlx::query_as::<_, TaskLog>(
            r#"
            SELECT id, "user", task, status, comment, "timestamp"
            FROM task_logs
            ORDER BY "timestamp" DESC
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(logs)
    }

    /// Lists logs submitted under an exact user name, newest first
    pub async fn list_by_user(pool: &PgPool, user: &str) -> Result<Vec<Self>, sqlx::Error> {
        let logs = sqlx::query_as::<_, TaskLog>(
            r#"
            SELECT id, "user", task, status, comment, "timestamp"
            FROM task_logs
            WHERE "user" = $1
            ORDER BY "timestamp" DESC
            "#,
        )
        .bind(user)
        .fetch_all(pool)
        .await?;

        Ok(logs)
    }

    /// Deletes every log
    ///
    /// # Returns
    ///
    /// Number of logs removed
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM task_logs").execute(pool).await?;

        Ok(result.rows_affected())
    }
}
