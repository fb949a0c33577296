//! Cafe API Server
//!
//! A small REST service over a single SQLite table of cafes: list, random
//! pick, search by location, add, price update and API-key guarded delete.

mod handlers;
mod services;
mod settings;
mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use services::CafeDirectory;
use settings::Settings;
use storage::Database;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<CafeDirectory>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Settings errors are reported through tracing
    let loaded = Settings::load();

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings::startup_log_level(&loaded)));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {:#}", e);
            std::process::exit(1);
        }
    };

    info!("Starting Cafe API Server v{}", env!("CARGO_PKG_VERSION"));
    info!("PID: {}", std::process::id());

    if let Err(e) = run_server(settings).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server(settings: Settings) -> Result<()> {
    info!(
        "Config loaded: bind={}, db={}",
        settings.bind_address, settings.database_path
    );
    if settings.uses_default_api_key() {
        warn!("CAFE_API_KEY not set, using default (insecure for production)");
    }

    let db = Database::new(&settings.database_path)
        .await
        .context("Failed to initialize database")?;

    let state = AppState {
        directory: Arc::new(CafeDirectory::new(Arc::new(db), settings.api_key.clone())),
    };

    let app = build_router(state);

    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .context("Failed to parse bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/random", get(handlers::cafes::random))
        .route("/all", get(handlers::cafes::all))
        .route("/search", get(handlers::cafes::search))
        .route("/add", post(handlers::manage::add))
        .route("/update-price/:id", patch(handlers::manage::update_price))
        .route("/report-closed/:id", delete(handlers::manage::report_closed))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
