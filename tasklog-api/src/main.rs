//! # Tasklog API Server
//!
//! Serves the Tasklog REST API and, optionally, the built front-end.
//!
//! ## Usage
//!
//! ```bash
//! STORAGE_BACKEND=memory cargo run -p tasklog-api
//! DATABASE_URL=postgresql://localhost/tasklog cargo run -p tasklog-api
//! ```

use std::sync::Arc;
use tasklog_api::{
    app::{build_router, AppState},
    config::{Config, LogFormat, StorageBackend},
};
use tasklog_shared::{
    db::{
        migrations::{ensure_database_exists, run_migrations},
        pool::{close_pool, create_pool},
    },
    store::{MemoryStore, PgStore, TaskStore},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_tracing(config.logging.format);

    tracing::info!(
        "Tasklog API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let mut pool = None;
    let store: Arc<dyn TaskStore> = match config.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            Arc::new(MemoryStore::with_sample_users())
        }
        StorageBackend::Postgres => {
            let database = config
                .storage
                .database
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for the postgres backend"))?;

            if !config.api.production {
                ensure_database_exists(&database.url).await?;
            }

            let db = create_pool(database.pool_config()).await?;
            run_migrations(&db).await?;

            let store = PgStore::new(db.clone());
            store.seed_if_empty().await?;

            pool = Some(db);
            Arc::new(store)
        }
    };

    let addr = config.bind_address();
    let state = AppState::new(store, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(pool) = pool {
        close_pool(pool).await;
    }

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tasklog_api=debug,tasklog_shared=info,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Resolves on Ctrl+C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections...");
}
