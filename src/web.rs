use crate::{
    config::Config,
    thumbnail::{CacheStats, ThumbnailCache, ThumbnailResult},
};
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tokio::signal;

#[derive(Clone)]
struct SharedState {
    cache: Arc<ThumbnailCache>,
}

pub fn router(cache: Arc<ThumbnailCache>) -> Router {
    let shared_state = Arc::new(SharedState { cache });

    Router::new()
        .route("/api/thumbnail", get(thumbnail))
        .route("/api/cache/stats", get(stats))
        .route("/api/cache/clear", post(clear))
        .route("/api/cache/prune", post(prune))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state)
}

/// Periodically drops expired entries so idle keys do not accumulate.
fn spawn_pruner(cache: Arc<ThumbnailCache>, every: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.prune_expired();
            log::info!("background prune removed {removed} entries");
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("failed to install Ctrl+C handler: {err}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                log::error!("failed to install signal handler: {err}");
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

    log::warn!("shutting down");
}

pub async fn start_daemon(config: &Config, cache: Arc<ThumbnailCache>) -> anyhow::Result<()> {
    let pruner = spawn_pruner(
        cache.clone(),
        Duration::from_secs(config.server.prune_interval_secs),
    );

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    log::info!("listening on {}", config.server.listen);

    axum::serve(listener, router(cache))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pruner.abort();
    Ok(())
}

#[derive(Debug)]
enum HttpError {
    MissingUrl,
    NotResolved(String),
}

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let response = match self {
            HttpError::MissingUrl => (
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({"error": "missing url parameter"})),
            ),
            HttpError::NotResolved(url) => {
                log::debug!("no thumbnail for {url}");
                (
                    axum::http::StatusCode::NOT_FOUND,
                    Json(json!({"error": format!("no thumbnail found for {url}")})),
                )
            }
        };

        response.into_response()
    }
}

#[derive(Debug, Deserialize)]
struct ThumbnailQuery {
    url: Option<String>,
}

async fn thumbnail(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<ThumbnailQuery>,
) -> Result<Json<ThumbnailResult>, HttpError> {
    let url = query
        .url
        .filter(|u| !u.is_empty())
        .ok_or(HttpError::MissingUrl)?;

    match state.cache.resolve(&url).await {
        Some(result) => Ok(Json(result)),
        None => Err(HttpError::NotResolved(url)),
    }
}

async fn stats(State(state): State<Arc<SharedState>>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

async fn clear(State(state): State<Arc<SharedState>>) -> impl IntoResponse {
    state.cache.clear();
    Json(json!({ "cleared": true }))
}

async fn prune(State(state): State<Arc<SharedState>>) -> impl IntoResponse {
    let removed = state.cache.prune_expired();
    Json(json!({ "removed": removed }))
}
