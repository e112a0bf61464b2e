use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{
    Extension, Router,
    http::{
        HeaderValue, Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    middleware,
    routing::{get, post},
};
use chrono::Utc;
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::{
    auth::{AuthGate, require_bearer},
    config::Config,
    ingestion::{Ingestor, handlers::handle_fetch_students, read_seed_file},
    storage::{MemoryStore, StudentStore},
    students::handlers::{handle_get_students, handle_health, handle_student_stats},
};

/// Builds the HTTP surface over `store`.
///
/// `/health` is public; every `/students` route requires the bearer secret.
/// `POST /students/fetch` exists only when ingest is enabled.
pub fn build_router<S: StudentStore>(store: Arc<S>, config: &Config) -> Result<Router> {
    let gate = Arc::new(AuthGate::new(&config.api_secret));

    let mut students = Router::new()
        .route("/students", get(handle_get_students::<S>))
        .route("/students/stats", get(handle_student_stats::<S>));

    if config.ingest.enabled {
        let ingestor = Arc::new(Ingestor::new(&config.ingest)?);
        info!(
            "Ingest enabled from {} ({} mode)",
            config.ingest.source_url, config.ingest.mode
        );
        students = students
            .route("/students/fetch", post(handle_fetch_students::<S>))
            .layer(Extension(ingestor));
    }

    let students = students.route_layer(middleware::from_fn_with_state(gate, require_bearer));

    let origin = match &config.cors_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin)
                .with_context(|| format!("Invalid CORS_ORIGIN '{origin}'"))?,
        ),
        None => AllowOrigin::from(Any),
    };

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Ok(Router::new()
        .route("/health", get(handle_health::<S>))
        .merge(students)
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}

/// Loads the optional seed file into a fresh store.
pub async fn open_store(config: &Config) -> Result<Arc<MemoryStore>> {
    let store = Arc::new(MemoryStore::new());

    if let Some(path) = &config.seed_file {
        let students = read_seed_file(path)?;
        let seeded = store.insert_many(students, Utc::now()).await?;
        info!("Seeded {} students from {}", seeded.len(), path.display());
    }

    Ok(store)
}

pub async fn start_server(config: Config) -> Result<()> {
    info!("Opening student store...");
    let store = open_store(&config).await?;

    let app = build_router(store.clone(), &config)?;

    info!("Binding to {}", config.bind_addr);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Server running on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("Server shutting down...");
    store.close().await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install terminate handler: {}", e);
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
}
