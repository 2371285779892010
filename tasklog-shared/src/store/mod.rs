//! Storage abstraction for users and task logs.
//!
//! [`TaskStore`] is the single capability set the HTTP layer depends on. Two
//! implementations exist:
//!
//! - [`MemoryStore`]: process-lifetime storage for development and tests.
//! - [`PgStore`]: PostgreSQL-backed storage for deployment.
//!
//! Both return the same model types, so responses look identical regardless
//! of which one the server was started with.

mod memory;
mod postgres;
pub mod seed;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::{
    models::{
        task_log::{CreateTaskLog, TaskLog},
        user::{CreateUser, User},
    },
    StoreResult,
};

/// Trait for user and task log storage.
///
/// Users are looked up by name. Absence is reported through `Option`/`bool`
/// results, never as an error.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Short backend identifier used in logs and health output.
    fn backend(&self) -> &'static str;

    /// Verifies the backing medium is reachable.
    async fn health_check(&self) -> StoreResult<()>;

    // =========================================================================
    // User operations
    // =========================================================================

    /// Lists every user.
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Gets a user by exact name.
    async fn get_user(&self, name: &str) -> StoreResult<Option<User>>;

    /// Creates a user. Fails with `AlreadyExists` if the name is taken.
    async fn create_user(&self, user: CreateUser) -> StoreResult<User>;

    /// Deletes a user by name. Their task logs are kept.
    async fn delete_user(&self, name: &str) -> StoreResult<bool>;

    /// Replaces a user's task list.
    async fn update_user_tasks(&self, name: &str, tasks: Vec<String>)
        -> StoreResult<Option<User>>;

    // =========================================================================
    // Task log operations
    // =========================================================================

    /// Appends a task log stamped with the current time.
    async fn create_task_log(&self, log: CreateTaskLog) -> StoreResult<TaskLog>;

    /// Lists all task logs, newest first.
    async fn list_task_logs(&self) -> StoreResult<Vec<TaskLog>>;

    /// Lists task logs whose `user` equals `user` exactly, newest first.
    async fn list_task_logs_by_user(&self, user: &str) -> StoreResult<Vec<TaskLog>>;

    /// Removes every task log.
    async fn clear_task_logs(&self) -> StoreResult<()>;
}
