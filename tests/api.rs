//! HTTP surface tests driven through the router without binding a port

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use common::{Behavior, Mode, Upstream};
use serde_json::Value;
use tower::ServiceExt;
use tourism_planner::{GeocoderBackend, TripPlanner, web};

fn app(upstream: &Upstream) -> Router {
    let planner = TripPlanner::from_config(&upstream.config(GeocoderBackend::OpenMeteo)).unwrap();
    web::app(Arc::new(planner), Duration::from_secs(10))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_trip_located() {
    let upstream = Upstream::start(Behavior::default()).await;

    let (status, body) = get_json(app(&upstream), "/api/trip?query=Munnar").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "located");
    assert_eq!(body["place"]["display_name"], "Munnar, India");
    assert_eq!(body["place"]["resolution"]["kind"], "point_only");
    assert_eq!(body["weather"]["status"], "current");
    assert_eq!(body["attractions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_trip_not_found() {
    let upstream = Upstream::start(Behavior::default()).await;

    let (status, body) = get_json(app(&upstream), "/api/trip?query=Atlantis").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "not_found");
    assert_eq!(body["query"], "Atlantis");
}

#[tokio::test]
async fn test_trip_blank_query_rejected() {
    let upstream = Upstream::start(Behavior::default()).await;

    for uri in ["/api/trip", "/api/trip?query=%20%20"] {
        let (status, body) = get_json(app(&upstream), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        assert_eq!(body["error"], "Invalid input: Location cannot be empty");
    }
    assert_eq!(upstream.request_count(), 0);
}

#[tokio::test]
async fn test_health() {
    let upstream = Upstream::start(Behavior::default()).await;

    let (status, body) = get_json(app(&upstream), "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], tourism_planner::VERSION);
}

#[tokio::test]
async fn test_slow_trip_hits_request_timeout() {
    let upstream = Upstream::start(Behavior {
        weather: Mode::Slow,
        overpass: Mode::Ok,
    })
    .await;
    let planner = TripPlanner::from_config(&upstream.config(GeocoderBackend::OpenMeteo)).unwrap();
    let app = web::app(Arc::new(planner), Duration::from_millis(100));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/trip?query=Munnar")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}
