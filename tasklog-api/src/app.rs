/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasklog_api::{app::AppState, config::Config};
/// use tasklog_shared::store::MemoryStore;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryStore::with_sample_users()), config);
/// let app = tasklog_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, middleware::security::SecurityHeadersLayer};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get},
    Router,
};
use std::sync::Arc;
use tasklog_shared::store::TaskStore;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Storage backend chosen at startup
    pub store: Arc<dyn TaskStore>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Arc<dyn TaskStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                  # Health check
/// ├── /api/
/// │   ├── /users
/// │   │   ├── GET    /         # List users
/// │   │   ├── POST   /         # Create user
/// │   │   └── DELETE /:name    # Delete user
/// │   ├── /tasks
/// │   │   ├── GET    /:user    # Get user's tasks
/// │   │   └── POST   /:user    # Replace user's tasks
/// │   └── /logs
/// │       ├── GET    /         # List logs (?user=)
/// │       ├── POST   /         # Submit log
/// │       └── DELETE /         # Clear logs
/// └── /*                       # Static front-end (when STATIC_DIR is set)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Response compression (gzip, brotli)
/// 4. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let user_routes = Router::new()
        .route(
            "/",
            get(routes::users::list_users).post(routes::users::create_user),
        )
        .route("/:name", delete(routes::users::delete_user));

    let task_routes = Router::new().route(
        "/:user",
        get(routes::tasks::get_user_tasks).post(routes::tasks::update_user_tasks),
    );

    let log_routes = Router::new().route(
        "/",
        get(routes::logs::list_task_logs)
            .post(routes::logs::create_task_log)
            .delete(routes::logs::clear_task_logs),
    );

    let api_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .nest("/logs", log_routes);

    let cors = cors_layer(&state.config);

    let mut router = Router::new()
        .merge(health_routes)
        .nest("/api", api_routes);

    if let Some(dir) = &state.config.api.static_dir {
        tracing::info!(dir = %dir.display(), "Serving static front-end");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Configures CORS from the allowed origin list
fn cors_layer(config: &Config) -> CorsLayer {
    if config.api.cors_origins.iter().any(|origin| origin == "*") {
        // Development mode: permissive CORS
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}
