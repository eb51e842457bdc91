// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Geocoder adapter tests against a local Nominatim stand-in.

use axum::{routing::get, Router};
use nursery_locator::models::Coordinate;
use nursery_locator::services::{GeocodeError, GeocodeHint, GeocoderService};
use std::time::Duration;

mod common;

fn geocoder(base_url: &str) -> GeocoderService {
    GeocoderService::new(base_url, "nursery-locator-tests", Duration::from_secs(2))
        .expect("Failed to build geocoder")
}

#[tokio::test]
async fn test_known_address_resolves_with_hint() {
    let base = common::spawn_stub(common::stub_geocoder()).await;

    // The stub only answers the fully qualified query
    let result = geocoder(&base)
        .geocode(common::KNOWN_ADDRESS, &GeocodeHint::default())
        .await;

    assert_eq!(result, Ok(Some(Coordinate::new(20.11, 82.51))));
}

#[tokio::test]
async fn test_different_hint_changes_query() {
    let base = common::spawn_stub(common::stub_geocoder()).await;

    let result = geocoder(&base)
        .geocode(common::KNOWN_ADDRESS, &GeocodeHint::new("Komna", "India"))
        .await;

    assert_eq!(result, Err(GeocodeError::NoMatch));
}

#[tokio::test]
async fn test_empty_address_is_no_location() {
    let base = common::spawn_stub(common::stub_geocoder()).await;

    let result = geocoder(&base).geocode("", &GeocodeHint::default()).await;
    assert_eq!(result, Ok(None));
}

#[tokio::test]
async fn test_server_error_is_status() {
    let base = common::spawn_stub(common::stub_geocoder()).await;

    let result = geocoder(&base)
        .geocode(common::OUTAGE_ADDRESS, &GeocodeHint::default())
        .await;

    assert_eq!(result, Err(GeocodeError::Status(500)));
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
    let base = common::unreachable_url().await;

    let err = geocoder(&base)
        .geocode(common::KNOWN_ADDRESS, &GeocodeHint::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GeocodeError::Request(_)));
    assert_eq!(err.code(), "geocode_unavailable");
}

#[tokio::test]
async fn test_non_json_response_is_parse_error() {
    let base = common::spawn_stub(Router::new().route(
        "/search",
        get(|| async { "<html>maintenance</html>" }),
    ))
    .await;

    let err = geocoder(&base)
        .geocode(common::KNOWN_ADDRESS, &GeocodeHint::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GeocodeError::Parse(_)));
}

#[tokio::test]
async fn test_slow_service_times_out() {
    let base = common::spawn_stub(Router::new().route(
        "/search",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "[]"
        }),
    ))
    .await;

    let slow = GeocoderService::new(&base, "nursery-locator-tests", Duration::from_millis(200))
        .unwrap();
    let err = slow
        .geocode(common::KNOWN_ADDRESS, &GeocodeHint::default())
        .await
        .unwrap_err();

    assert_eq!(err, GeocodeError::Timeout);
}
