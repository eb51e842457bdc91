// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    extract::Query,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use nursery_locator::config::Config;
use nursery_locator::models::BoundaryRegion;
use nursery_locator::routes::create_router;
use nursery_locator::services::{BoundaryProvider, GeocoderService, RecordStore, SessionData};
use nursery_locator::AppState;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[allow(dead_code)]
pub const RECORDS_FIXTURE: &str = "tests/fixtures/nurseries.csv";
#[allow(dead_code)]
pub const MINIMAL_RECORDS_FIXTURE: &str = "tests/fixtures/nurseries_minimal.csv";
#[allow(dead_code)]
pub const XLSX_RECORDS_FIXTURE: &str = "tests/fixtures/nurseries.xlsx";
#[allow(dead_code)]
pub const BOUNDARY_FIXTURE: &str = "tests/fixtures/khariar_boundary.geojson";

/// Address the stub geocoder resolves (before the hint is appended).
#[allow(dead_code)]
pub const KNOWN_ADDRESS: &str = "Main Road";
/// Address that makes the stub geocoder fail with HTTP 500.
#[allow(dead_code)]
pub const OUTAGE_ADDRESS: &str = "Outage";

/// Load the fixture nursery sheet.
#[allow(dead_code)]
pub fn fixture_records() -> RecordStore {
    let bytes = std::fs::read(RECORDS_FIXTURE).expect("Failed to read nursery fixture");
    RecordStore::from_bytes(&bytes).expect("Failed to parse nursery fixture")
}

/// Load the fixture boundary.
#[allow(dead_code)]
pub fn fixture_boundary() -> BoundaryRegion {
    let json = std::fs::read_to_string(BOUNDARY_FIXTURE).expect("Failed to read boundary fixture");
    BoundaryProvider::parse(&json).expect("Failed to parse boundary fixture")
}

/// Create a test app backed by the fixture datasets and an unroutable
/// geocoder.
#[allow(dead_code)]
pub fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let geocoder_url = config.geocoder_url.clone();
    create_test_app_with(
        SessionData::preloaded(fixture_records(), fixture_boundary()),
        &geocoder_url,
    )
}

/// Create a test app with a custom session and geocoder endpoint.
#[allow(dead_code)]
pub fn create_test_app_with(session: SessionData, geocoder_url: &str) -> (Router, Arc<AppState>) {
    let config = Config {
        geocoder_url: geocoder_url.to_string(),
        ..Config::test_default()
    };
    let geocoder = GeocoderService::new(
        &config.geocoder_url,
        &config.geocoder_user_agent,
        Duration::from_secs(2),
    )
    .expect("Failed to build geocoder");

    let state = Arc::new(AppState {
        config,
        session,
        geocoder,
    });

    (create_router(state.clone()), state)
}

/// Serve a router on an ephemeral local port and return its base URL.
#[allow(dead_code)]
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub server");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Base URL of a local port nothing listens on.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe socket");
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Minimal Nominatim stand-in.
///
/// Resolves `"Main Road, Khariar, India"`, fails with 500 for addresses
/// starting with "Outage", and returns no match for anything else.
#[allow(dead_code)]
pub fn stub_geocoder() -> Router {
    Router::new().route(
        "/search",
        get(|Query(params): Query<HashMap<String, String>>| async move {
            if params.get("format").map(String::as_str) != Some("json")
                || params.get("limit").map(String::as_str) != Some("1")
            {
                return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad params"})));
            }
            match params.get("q").map(String::as_str) {
                Some("Main Road, Khariar, India") => (
                    StatusCode::OK,
                    Json(json!([{
                        "lat": "20.11",
                        "lon": "82.51",
                        "display_name": "Main Road, Khariar, Nuapada, Odisha, India"
                    }])),
                ),
                Some(q) if q.starts_with(OUTAGE_ADDRESS) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": "service down"})),
                ),
                _ => (StatusCode::OK, Json(json!([]))),
            }
        }),
    )
}

/// Issue a GET against the app and decode the JSON body.
#[allow(dead_code)]
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}
