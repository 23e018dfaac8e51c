mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use common::lg_source;
use kbo_highlights::api::{router, AppState};
use kbo_highlights::{Config, HighlightService};
use serde_json::Value;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> (Router, Arc<common::MockSource>) {
    let source = Arc::new(lg_source());
    let config = Config::default();
    let service = HighlightService::from_config(&config, source.clone());
    let state = AppState {
        service: Arc::new(service),
        config: Arc::new(config),
    };
    (router(state), source)
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(response: axum::response::Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn post_search(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn healthz_returns_ok() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"ok");
}

#[tokio::test]
async fn post_search_returns_mirrored_buckets() {
    let (app, _) = app();
    let response = app.oneshot(post_search(r#"{"club": "LG"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["shorts"], body["short"]);
    assert_eq!(body["shorts"].as_array().unwrap().len(), 1);
    assert_eq!(body["long"].as_array().unwrap().len(), 0);

    let item = &body["shorts"][0];
    assert_eq!(item["title"], "LG 트윈스 하이라이트");
    assert_eq!(item["url"], "https://www.youtube.com/watch?v=lg1");
    assert_eq!(item["seconds"], 40);
    assert_eq!(item["duration"], "PT40S");
    assert!(item.get("id").is_none());
}

#[tokio::test]
async fn empty_or_broken_body_is_an_empty_search() {
    for body in [r#"{"club": ""}"#, "{not json", ""] {
        let (app, source) = app();
        let response = app.oneshot(post_search(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body, serde_json::json!({"shorts": [], "short": [], "long": []}));
        assert_eq!(source.total_calls(), 0);
    }
}

#[tokio::test]
async fn get_search_reads_team_query_parameter() {
    let (app, source) = app();
    let response = app
        .oneshot(
            Request::get("/search?team=LG%20%ED%8A%B8%EC%9C%88%EC%8A%A4")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["shorts"].as_array().unwrap().len(), 1);
    assert_eq!(source.search_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn truthy_force_refetches() {
    let (app, source) = app();

    app.clone().oneshot(post_search(r#"{"club": "LG"}"#)).await.unwrap();
    let calls = source.total_calls();

    app.clone().oneshot(post_search(r#"{"club": "LG"}"#)).await.unwrap();
    assert_eq!(source.total_calls(), calls);

    app.oneshot(post_search(r#"{"club": "LG", "force": "yes"}"#))
        .await
        .unwrap();
    assert_eq!(source.total_calls(), calls * 2);
}

#[tokio::test]
async fn club_page_lists_teams_and_preselects() {
    let (app, _) = app();
    let response = app
        .oneshot(
            Request::get("/club?team=%EB%91%90%EC%82%B0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("LG 트윈스"));
    assert!(html.contains("한화 이글스"));
    assert!(html.contains(r#"<option value="두산" selected>두산 베어스</option>"#));
}

#[tokio::test]
async fn root_page_accepts_post() {
    let (app, _) = app();
    let response = app
        .oneshot(Request::post("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains(r#"<option value="LG" selected>LG 트윈스</option>"#));
}

#[tokio::test]
async fn status_reports_cache_and_credential() {
    let (app, _) = app();

    app.clone().oneshot(post_search(r#"{"club": "LG"}"#)).await.unwrap();

    let response = app
        .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = json_body(response).await;

    assert_eq!(body["service"], "kbo-highlights");
    assert_eq!(body["credential_configured"], true);
    assert_eq!(body["teams"], 10);
    assert_eq!(body["cache"]["total_entries"], 1);
    assert_eq!(body["cache"]["ttl_seconds"], 60);
    assert_eq!(body["keywords"]["teams_with_deny_lists"], 10);
    assert!(body["keywords"]["category_counts"]["ShortMarkers"].as_u64().unwrap() > 0);
}
