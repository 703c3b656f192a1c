//! Route handlers for the now-playing API

use crate::files::{read_cover, read_static, FileError, LoadedFile};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use nowplaying_core::NowPlayingResolver;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error};

/// Front-end entry point inside the static directory
const INDEX_FILE: &str = "index.html";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<NowPlayingResolver>,
    pub static_dir: Arc<PathBuf>,
}

impl AppState {
    pub fn new(resolver: NowPlayingResolver, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            resolver: Arc::new(resolver),
            static_dir: Arc::new(static_dir.into()),
        }
    }
}

/// Query for GET /api/cover
#[derive(Debug, Deserialize)]
pub struct CoverQuery {
    pub path: Option<String>,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/now", get(now_playing))
        .route("/api/cover", get(cover))
        .fallback(static_asset)
        .with_state(state)
}

/// GET /api/now - What is playing right now
async fn now_playing(State(state): State<AppState>) -> Response {
    let now = state.resolver.resolve().await;
    debug!("GET /api/now: {}", if now.is_playing() { "playing" } else { "stopped" });

    Json(now).into_response()
}

/// GET /api/cover?path=... - Stream a local cover image
async fn cover(Query(query): Query<CoverQuery>) -> Response {
    let Some(path) = query.path.filter(|path| !path.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "No path provided").into_response();
    };
    debug!("GET /api/cover: {}", path);

    file_response(read_cover(&path).await)
}

/// GET / - Front-end entry point
async fn index(State(state): State<AppState>) -> Response {
    file_response(read_static(&state.static_dir, INDEX_FILE).await)
}

/// Any other path - front-end assets from the static directory
async fn static_asset(State(state): State<AppState>, uri: Uri) -> Response {
    let relative = uri.path().trim_start_matches('/');
    if relative.is_empty() || relative == "api" || relative.starts_with("api/") {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    file_response(read_static(&state.static_dir, relative).await)
}

fn file_response(result: Result<LoadedFile, FileError>) -> Response {
    match result {
        Ok(file) => ([(header::CONTENT_TYPE, file.content_type)], file.bytes).into_response(),
        Err(FileError::NotFound(_)) => (StatusCode::NOT_FOUND, "File not found").into_response(),
        Err(e) => {
            error!("{}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
