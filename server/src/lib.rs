use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use hashdex_core::corpus::read_stopwords;
use hashdex_core::{DocScore, IndexConfig, IndexStats, SearchEngine, SearchError, StopWords};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Directory the engine is built from (and rebuilt from on reindex).
    pub docs: PathBuf,
    pub stopwords: Option<PathBuf>,
    pub index: IndexConfig,
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_k")]
    pub k: usize,
}
fn default_k() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<DocScore>,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    (status, Json(ErrorBody { error: msg.into() }))
}

/// Shared by every handler. Readers clone the current engine `Arc` and drop
/// the lock; a reindex builds the replacement off-lock and only takes the
/// write lock to swap it in.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub engine: Arc<RwLock<Arc<SearchEngine>>>,
}

impl AppState {
    pub fn engine(&self) -> Arc<SearchEngine> {
        self.engine.read().clone()
    }
}

pub fn load_engine(config: &ServerConfig) -> hashdex_core::error::Result<SearchEngine> {
    let stopwords = match &config.stopwords {
        Some(path) => read_stopwords(path, config.index.strategy)?,
        None => StopWords::empty(config.index.strategy),
    };
    SearchEngine::from_directory(config.index.clone(), stopwords, &config.docs)
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let engine = load_engine(&config)?;
    let stats = engine.stats();
    tracing::info!(documents = stats.documents, terms = stats.terms, "engine ready");
    let app_state = AppState { config: Arc::new(config), engine: Arc::new(RwLock::new(Arc::new(engine))) };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stats", get(stats_handler))
        .route("/reindex", post(reindex_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());
    Ok(app)
}

// CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = std::env::var("CORS_ALLOW_ORIGIN")
        .map(|val| val.split(',').filter_map(|s| s.trim().parse().ok()).collect())
        .unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, ApiError> {
    let start = std::time::Instant::now();
    let engine = state.engine();
    let mut results = engine.search(&params.q).map_err(|err| match err {
        SearchError::UnknownTerm(_) => api_error(StatusCode::NOT_FOUND, err.to_string()),
        other => api_error(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    })?;
    let total_hits = results.len();
    results.truncate(params.k.clamp(1, 100));
    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), total_hits, results }))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<IndexStats> {
    Json(state.engine().stats())
}

async fn reindex_handler(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<IndexStats>, ApiError> {
    authorize(&state, &headers)?;
    let config = state.config.clone();
    let engine = tokio::task::spawn_blocking(move || load_engine(&config))
        .await
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let stats = engine.stats();
    *state.engine.write() = Arc::new(engine);
    tracing::info!(documents = stats.documents, terms = stats.terms, "reindexed");
    Ok(Json(stats))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let required = match &state.config.admin_token {
        Some(t) => t,
        None => return Err(api_error(StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set")),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err(api_error(StatusCode::UNAUTHORIZED, "invalid admin token"))
    }
}
