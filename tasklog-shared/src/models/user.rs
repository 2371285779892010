/// User model and database operations
///
/// Users are addressed by `name` everywhere outside this crate; the `id` is
/// generated on creation and never changes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name TEXT NOT NULL,
///     project TEXT NOT NULL,
///     tasks TEXT[] NOT NULL DEFAULT ARRAY[]::TEXT[],
///     CONSTRAINT users_name_key UNIQUE (name)
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use tasklog_shared::models::user::{User, CreateUser};
/// use tasklog_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser::new("Ann", "Website Refresh")).await?;
/// println!("Created user: {}", user.id);
///
/// let found = User::find_by_name(&pool, "Ann").await?;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Name of the unique constraint on `users.name`
pub const NAME_UNIQUE_CONSTRAINT: &str = "users_name_key";

/// A person who can submit task logs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name, also the lookup key
    pub name: String,

    /// Project the user is assigned to
    pub project: String,

    /// Task names the user can currently submit against
    pub tasks: Vec<String>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,

    pub project: String,

    /// Initial task list; `None` means no tasks
    #[serde(default)]
    pub tasks: Option<Vec<String>>,
}

impl CreateUser {
    /// Creates input with no tasks
    pub fn new(name: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            project: project.into(),
            tasks: None,
        }
    }

    /// Sets the initial task list
    pub fn with_tasks<I, S>(mut self, tasks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tasks = Some(tasks.into_iter().map(Into::into).collect());
        self
    }
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The name is already taken (`users_name_key` violation)
    /// - Database connection fails
    pub async fn create(pool: &PgPool, data: CreateUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, project, tasks)
            VALUES ($1, $2, $3)
            RETURNING id, name, project, tasks
            "#,
        )
        .bind(data.name)
        .bind(data.project)
        .bind(data.tasks.unwrap_or_default())
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Finds a user by exact name
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, project, tasks
            FROM users
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Lists all users
    ///
    /// No ordering is guaranteed.
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, project, tasks
            FROM users
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Replaces a user's task list
    ///
    /// # Returns
    ///
    /// The updated user, or None if no user has that name
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use tasklog_shared::models::user::User;
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
    /// let tasks = vec!["Design Review".to_string()];
    /// if let Some(user) = User::update_tasks(&pool, "Ann", &tasks).await? {
    ///     assert_eq!(user.tasks, tasks);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn update_tasks(
        pool: &PgPool,
        name: &str,
        tasks: &[String],
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET tasks = $2
            WHERE name = $1
            RETURNING id, name, project, tasks
            "#,
        )
        .bind(name)
        .bind(tasks)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by name
    ///
    /// The user's task logs are left in place.
    ///
    /// # Returns
    ///
    /// True if a user was deleted, false if none matched
    pub async fn delete_by_name(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts total number of users
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
