//! In-memory store for development and testing.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::{seed, TaskStore};
use crate::{
    models::{
        task_log::{CreateTaskLog, TaskLog},
        user::{CreateUser, User},
    },
    StoreError, StoreResult,
};

/// Process-lifetime store. Nothing survives a restart.
///
/// Users are kept in insertion order. Each collection sits behind its own
/// lock, so concurrent requests are safe on a multi-threaded runtime.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    users: Arc<RwLock<Vec<User>>>,
    task_logs: Arc<RwLock<Vec<TaskLog>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the example users from [`seed::sample_users`].
    pub fn with_sample_users() -> Self {
        let users = seed::sample_users().into_iter().map(new_user).collect();

        Self {
            users: Arc::new(RwLock::new(users)),
            task_logs: Arc::default(),
        }
    }
}

fn new_user(data: CreateUser) -> User {
    User {
        id: Uuid::new_v4(),
        name: data.name,
        project: data.project,
        tasks: data.tasks.unwrap_or_default(),
    }
}

/// Newest first. Logs are stored oldest first, so reversing before the
/// stable sort puts the later insert first when timestamps tie.
fn newest_first<'a>(logs: impl DoubleEndedIterator<Item = &'a TaskLog>) -> Vec<TaskLog> {
    let mut result: Vec<TaskLog> = logs.rev().cloned().collect();
    result.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    result
}

#[async_trait]
impl TaskStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    // =========================================================================
    // User operations
    // =========================================================================

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.clone())
    }

    async fn get_user(&self, name: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.name == name).cloned())
    }

    async fn create_user(&self, data: CreateUser) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.name == data.name) {
            return Err(StoreError::already_exists("User", data.name));
        }

        let user = new_user(data);
        debug!(id = %user.id, name = %user.name, "Created user");
        users.push(user.clone());
        Ok(user)
    }

    async fn delete_user(&self, name: &str) -> StoreResult<bool> {
        let mut users = self.users.write().await;
        match users.iter().position(|u| u.name == name) {
            Some(index) => {
                let removed = users.remove(index);
                debug!(id = %removed.id, name = %removed.name, "Deleted user");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_user_tasks(
        &self,
        name: &str,
        tasks: Vec<String>,
    ) -> StoreResult<Option<User>> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.name == name) else {
            return Ok(None);
        };

        user.tasks = tasks;
        debug!(name = %user.name, tasks = user.tasks.len(), "Replaced user tasks");
        Ok(Some(user.clone()))
    }

    // =========================================================================
    // Task log operations
    // =========================================================================

    async fn create_task_log(&self, data: CreateTaskLog) -> StoreResult<TaskLog> {
        let log = TaskLog {
            id: Uuid::new_v4(),
            status: data.status_or_default(),
            user: data.user,
            task: data.task,
            comment: data.comment,
            // Postgres TIMESTAMPTZ keeps microseconds
            timestamp: Utc::now().trunc_subsecs(6),
        };

        let mut logs = self.task_logs.write().await;
        logs.push(log.clone());
        debug!(id = %log.id, user = %log.user, status = %log.status, "Created task log");
        Ok(log)
    }

    async fn list_task_logs(&self) -> StoreResult<Vec<TaskLog>> {
        let logs = self.task_logs.read().await;
        Ok(newest_first(logs.iter()))
    }

    async fn list_task_logs_by_user(&self, user: &str) -> StoreResult<Vec<TaskLog>> {
        let logs = self.task_logs.read().await;
        let matching: Vec<&TaskLog> = logs.iter().filter(|l| l.user == user).collect();
        Ok(newest_first(matching.into_iter()))
    }

    async fn clear_task_logs(&self) -> StoreResult<()> {
        let mut logs = self.task_logs.write().await;
        let cleared = logs.len();
        logs.clear();
        debug!(cleared, "Cleared task logs");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task_log::TaskStatus;

    #[tokio::test]
    async fn test_sample_users_are_seeded() {
        let store = MemoryStore::with_sample_users();

        let users = store.list_users().await.unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith", "Mike Johnson"]);

        let jane = store.get_user("Jane Smith").await.unwrap().unwrap();
        assert_eq!(jane.project, "Mobile App Development");
        assert_eq!(jane.tasks.len(), 3);
    }

    #[tokio::test]
    async fn test_new_store_is_empty() {
        let store = MemoryStore::new();
        assert!(store.list_users().await.unwrap().is_empty());
        assert!(store.list_task_logs().await.unwrap().is_empty());
        assert_eq!(store.backend(), "memory");
        store.health_check().await.unwrap();
    }

    #[tokio::test]
    async fn test_user_crud() {
        let store = MemoryStore::new();

        // Create without tasks
        let created = store.create_user(CreateUser::new("Ann", "X")).await.unwrap();
        assert_eq!(created.name, "Ann");
        assert!(created.tasks.is_empty());

        // Get
        let fetched = store.get_user("Ann").await.unwrap().unwrap();
        assert_eq!(fetched, created);

        // List keeps insertion order
        store.create_user(CreateUser::new("Bob", "Y")).await.unwrap();
        let names: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Ann", "Bob"]);

        // Delete
        assert!(store.delete_user("Ann").await.unwrap());
        assert!(store.get_user("Ann").await.unwrap().is_none());
        assert_eq!(store.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_user_requires_exact_name() {
        let store = MemoryStore::with_sample_users();
        assert!(store.get_user("john doe").await.unwrap().is_none());
        assert!(store.get_user("John").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_user_leaves_store_unchanged() {
        let store = MemoryStore::with_sample_users();
        let before = store.list_users().await.unwrap();

        assert!(!store.delete_user("Nobody").await.unwrap());
        assert_eq!(store.list_users().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let store = MemoryStore::new();
        let first = store.create_user(CreateUser::new("Ann", "X")).await.unwrap();

        let err = store
            .create_user(CreateUser::new("Ann", "Other"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists { .. }));

        let users = store.list_users().await.unwrap();
        assert_eq!(users, vec![first]);
    }

    #[tokio::test]
    async fn test_update_tasks_replaces_whole_list() {
        let store = MemoryStore::new();
        store
            .create_user(CreateUser::new("Ann", "X").with_tasks(["Old1", "Old2"]))
            .await
            .unwrap();

        let updated = store
            .update_user_tasks("Ann", vec!["A".to_string(), "B".to_string()])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.tasks, vec!["A", "B"]);

        let fetched = store.get_user("Ann").await.unwrap().unwrap();
        assert_eq!(fetched.tasks, vec!["A", "B"]);
        assert_eq!(fetched.id, updated.id);
    }

    #[tokio::test]
    async fn test_update_tasks_for_missing_user() {
        let store = MemoryStore::new();
        let result = store
            .update_user_tasks("Nobody", vec!["A".to_string()])
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_task_log_defaults() {
        let store = MemoryStore::new();
        let before = Utc::now().trunc_subsecs(6);

        let log = store
            .create_task_log(CreateTaskLog::new("Ann", "A"))
            .await
            .unwrap();

        assert_eq!(log.status, TaskStatus::Completed);
        assert!(log.comment.is_none());
        assert!(log.timestamp >= before);
    }

    #[tokio::test]
    async fn test_task_log_timestamp_has_microsecond_precision() {
        let store = MemoryStore::new();

        for _ in 0..5 {
            let log = store
                .create_task_log(CreateTaskLog::new("Ann", "A"))
                .await
                .unwrap();
            assert_eq!(log.timestamp.timestamp_subsec_nanos() % 1_000, 0);
        }
    }

    #[tokio::test]
    async fn test_task_log_with_status_and_comment() {
        let store = MemoryStore::new();

        let log = store
            .create_task_log(
                CreateTaskLog::new("Ann", "A")
                    .with_status(TaskStatus::NotCompleted)
                    .with_comment("blocked on review"),
            )
            .await
            .unwrap();

        assert_eq!(log.status, TaskStatus::NotCompleted);
        assert_eq!(log.comment.as_deref(), Some("blocked on review"));
    }

    #[tokio::test]
    async fn test_task_logs_newest_first() {
        let store = MemoryStore::new();
        for task in ["first", "second", "third"] {
            store
                .create_task_log(CreateTaskLog::new("Ann", task))
                .await
                .unwrap();
        }

        let logs = store.list_task_logs().await.unwrap();
        let tasks: Vec<&str> = logs.iter().map(|l| l.task.as_str()).collect();
        assert_eq!(tasks, vec!["third", "second", "first"]);
        assert!(logs.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[tokio::test]
    async fn test_task_logs_by_user_exact_match() {
        let store = MemoryStore::new();
        store
            .create_task_log(CreateTaskLog::new("Jane Smith", "User Research"))
            .await
            .unwrap();
        store
            .create_task_log(CreateTaskLog::new("John Doe", "Wireframe Review"))
            .await
            .unwrap();
        store
            .create_task_log(CreateTaskLog::new("Jane Smithers", "Other"))
            .await
            .unwrap();
        store
            .create_task_log(CreateTaskLog::new("Jane Smith", "Prototype Testing"))
            .await
            .unwrap();

        let logs = store.list_task_logs_by_user("Jane Smith").await.unwrap();
        assert_eq!(logs.len(), 2);
        assert!(logs.iter().all(|l| l.user == "Jane Smith"));
        assert_eq!(logs[0].task, "Prototype Testing");
        assert_eq!(logs[1].task, "User Research");
    }

    #[tokio::test]
    async fn test_clear_task_logs() {
        let store = MemoryStore::new();
        store
            .create_task_log(CreateTaskLog::new("Ann", "A"))
            .await
            .unwrap();
        store
            .create_task_log(CreateTaskLog::new("Bob", "B"))
            .await
            .unwrap();

        store.clear_task_logs().await.unwrap();
        assert!(store.list_task_logs().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_user_keeps_their_logs() {
        let store = MemoryStore::new();
        store.create_user(CreateUser::new("Ann", "X")).await.unwrap();
        store
            .create_task_log(CreateTaskLog::new("Ann", "A"))
            .await
            .unwrap();

        assert!(store.delete_user("Ann").await.unwrap());

        let logs = store.list_task_logs_by_user("Ann").await.unwrap();
        assert_eq!(logs.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_log_creation() {
        let store = MemoryStore::new();

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_task_log(CreateTaskLog::new("Ann", format!("task-{}", i)))
                        .await
                        .unwrap()
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.list_task_logs().await.unwrap().len(), 20);
    }
}
