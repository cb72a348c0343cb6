//! HTTP surface
//!
//! `GET /property` answers an exact lookup, `GET /properties` a criteria
//! search and `GET /health` a liveness probe. Every error goes out as
//! `{"error": ..., "code": ...}` through [`AppError`]'s response impl.

use crate::cli::{LookupArgs, SearchArgs};
use crate::error::AppError;
use crate::record::PropertyRecord;
use crate::state::AppState;
use crate::tools::{lookup, search};
use anyhow::{Context, Result};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

/// Query strings that fail to decode get the same JSON error body as everything else
fn query_args<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(args)| args)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LookupArgs>, QueryRejection>,
) -> Result<Json<PropertyRecord>, AppError> {
    let args = query_args(query)?;
    let record = lookup::execute_lookup(&state.store, args).await?;
    Ok(Json(record))
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchArgs>, QueryRejection>,
) -> Result<Json<Vec<PropertyRecord>>, AppError> {
    let args = query_args(query)?;
    let records = search::execute_search(&state.store, args).await?;
    Ok(Json(records))
}

async fn health_handler() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/property", get(lookup_handler))
        .route("/properties", get(search_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until ctrl-c or SIGTERM
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let address = state.config.listen_address();

    if !state.store.path().exists() {
        warn!(
            "Property data file {} does not exist; queries will fail until it appears",
            state.store.path().display()
        );
    }

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!("Server running on {address}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
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
