use axum::http::{Request, StatusCode};
use paperscout::{api, app, config};
use tower::util::ServiceExt; // for `oneshot`

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let state = app::AppState::new(config::Config::default());
    let app = api::build_router(state);

    let response = app
        .oneshot(Request::builder().uri("/health").body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_reports_version() {
    let state = app::AppState::new(config::Config::default());
    let app = api::build_router(state);

    let resp = app
        .oneshot(Request::builder().uri("/health").body(axum::body::Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let v: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v.get("status").and_then(|s| s.as_str()), Some("ok"));
    assert!(v.get("version").and_then(|s| s.as_str()).is_some());
}
