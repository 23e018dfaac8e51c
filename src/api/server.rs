//! HTTP server implementation for the API

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::handlers;
use super::models::{PageQuery, SearchQuery, SearchRequest};
use crate::config::Config;
use crate::pipeline::HighlightService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<HighlightService>,
    pub config: Arc<Config>,
}

/// Build the application router with its middleware
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/healthz", get(health_handler))
        .route("/", get(club_page_handler).post(club_page_handler))
        .route("/club", get(club_page_handler).post(club_page_handler))
        .route("/search", get(search_get_handler).post(search_post_handler))
        .route("/api/status", get(status_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

/// Configure and start the HTTP server
pub async fn start_http_server(state: AppState) -> Result<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🌐 Highlight server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn club_page_handler(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> impl IntoResponse {
    match handlers::render_club_page(state.service.teams(), query.team.as_deref()) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            (status, format!("Failed to render page: {}", e)).into_response()
        }
    }
}

async fn search_get_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let request = SearchRequest::from_query(&query);
    Json(handlers::search(&state.service, &request).await)
}

async fn search_post_handler(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let request = SearchRequest::from_body(&body);
    Json(handlers::search(&state.service, &request).await)
}

async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    match handlers::service_status(&state.service).await {
        Ok(data) => (StatusCode::OK, Json(data)).into_response(),
        Err(e) => {
            let status = StatusCode::INTERNAL_SERVER_ERROR;
            (status, Json(serde_json::json!({"error": e.to_string()}))).into_response()
        }
    }
}
