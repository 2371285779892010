//! PostgreSQL-backed store.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};

use super::{seed, TaskStore};
use crate::{
    db::pool,
    models::{
        task_log::{CreateTaskLog, TaskLog},
        user::{CreateUser, User, NAME_UNIQUE_CONSTRAINT},
    },
    StoreError, StoreResult,
};

/// Durable store over the `users` and `task_logs` tables.
///
/// Expects migrations to have been applied to the pool's database.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Inserts the example users if the `users` table is empty.
    ///
    /// Meant to run once at startup after migrations. Returns the number of
    /// users inserted.
    pub async fn seed_if_empty(&self) -> StoreResult<usize> {
        let existing = User::count(&self.pool).await?;
        if existing > 0 {
            debug!(existing, "Users table already populated, skipping seed");
            return Ok(0);
        }

        let samples = seed::sample_users();
        let count = samples.len();
        for user in samples {
            self.create_user(user).await?;
        }

        info!(count, "Seeded example users");
        Ok(count)
    }
}

/// Maps a unique violation on `users.name` to `AlreadyExists`.
fn user_insert_error(err: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.constraint() == Some(NAME_UNIQUE_CONSTRAINT) {
            return StoreError::already_exists("User", name);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl TaskStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }

    // =========================================================================
    // User operations
    // =========================================================================

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(User::list(&self.pool).await?)
    }

    async fn get_user(&self, name: &str) -> StoreResult<Option<User>> {
        Ok(User::find_by_name(&self.pool, name).await?)
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let name = data.name.clone();
        let user = User::create(&self.pool, data)
            .await
            .map_err(|e| user_insert_error(e, &name))?;

        debug!(id = %user.id, name = %user.name, "Created user");
        Ok(user)
    }

    async fn delete_user(&self, name: &str) -> StoreResult<bool> {
        let deleted = User::delete_by_name(&self.pool, name).await?;
        if deleted {
            debug!(name, "Deleted user");
        }
        Ok(deleted)
    }

    async fn update_user_tasks(
        &self,
        name: &str,
        tasks: Vec<String>,
    ) -> StoreResult<Option<User>> {
        let user = User::update_tasks(&self.pool, name, &tasks).await?;
        if user.is_some() {
            debug!(name, tasks = tasks.len(), "Replaced user tasks");
        }
        Ok(user)
    }

    // =========================================================================
    // Task log operations
    // =========================================================================

    async fn create_task_log(&self, data: CreateTaskLog) -> StoreResult<TaskLog> {
        let log = TaskLog::create(&self.pool, data).await?;
        debug!(id = %log.id, user = %log.user, status = %log.status, "Created task log");
        Ok(log)
    }

    async fn list_task_logs(&self) -> StoreResult<Vec<TaskLog>> {
        Ok(TaskLog::list(&self.pool).await?)
    }

    async fn list_task_logs_by_user(&self, user: &str) -> StoreResult<Vec<TaskLog>> {
        Ok(TaskLog::list_by_user(&self.pool, user).await?)
    }

    async fn clear_task_logs(&self) -> StoreResult<()> {
        let cleared = TaskLog::delete_all(&self.pool).await?;
        debug!(cleared, "Cleared task logs");
        Ok(())
    }
}
