#![cfg(feature = "web")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use enyaq::config::ConnectorConfig;
use enyaq::connector::Connector;
use enyaq::web::{ConnectorUi, nav_items};
use http_body_util::BodyExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

fn ui_with_garage() -> ConnectorUi {
    let mut connector = Connector::new(ConnectorConfig::default());
    let listing = serde_json::from_value(serde_json::json!({
        "vehicles": [{"vin": "TMBJB9NY6RF000030", "licensePlate": "4SK 1234"}]
    }))
    .unwrap();
    connector.apply_garage(&listing).unwrap();
    ConnectorUi::new(Arc::new(Mutex::new(connector)), "templates")
}

#[test]
fn registration_surface() {
    let ui = ui_with_garage();
    assert_eq!(ui.title(), "Skoda");
    assert_eq!(ui.url_prefix(), "/skoda");

    let items = nav_items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].text, "Skoda");
    assert_eq!(items[0].url, "/skoda");
}

#[tokio::test]
async fn health_ok() {
    let router = ui_with_garage().router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/skoda/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn nav_returns_the_skoda_entry() {
    let router = ui_with_garage().router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/skoda/api/nav")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json[0]["text"], "Skoda");
    assert_eq!(json[0]["url"], "/skoda");
}

#[tokio::test]
async fn vehicles_list_serves_the_garage() {
    let router = ui_with_garage().router();
    let response = router
        .oneshot(
            Request::builder()
                .uri("/skoda/api/vehicles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["vin"], "TMBJB9NY6RF000030");
    assert_eq!(json[0]["manufacturer"], "Škoda");
}

#[tokio::test]
async fn vehicle_detail_and_404() {
    let router = ui_with_garage().router();
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/skoda/api/vehicles/TMBJB9NY6RF000030")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::builder()
                .uri("/skoda/api/vehicles/UNKNOWNVIN")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
