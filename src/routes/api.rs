// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the map front end.

use crate::error::{AppError, Result};
use crate::models::facility::{CellValue, Coordinate, FacilityRecord, REQUIRED_COLUMNS};
use crate::models::map::MapDescription;
use crate::services::composer::compose_for_query;
use crate::services::nearest::{nearest, NearestResult};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Longest address accepted from the search box.
const MAX_ADDRESS_LEN: usize = 200;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/map", get(get_map))
        .route("/api/records", get(get_records))
        .route("/api/nearest", get(get_nearest))
}

// ─── Shared response types ───────────────────────────────────

/// Non-fatal problem the front end should show without blocking the map.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

/// The nursery closest to a query position.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NearestSummary {
    pub name: String,
    pub location: Coordinate,
    pub distance_km: f64,
    pub capacity: CellValue,
    pub plants_available: CellValue,
    pub contact: String,
}

impl From<&NearestResult<'_>> for NearestSummary {
    fn from(found: &NearestResult<'_>) -> Self {
        Self {
            name: found.record.name.clone(),
            location: found.location,
            distance_km: found.distance_km,
            capacity: found.record.capacity.clone(),
            plants_available: found.record.plants_available.clone(),
            contact: found.record.contact.clone(),
        }
    }
}

// ─── Map ─────────────────────────────────────────────────────

#[derive(Deserialize)]
struct MapQuery {
    /// Free-text address typed by the user
    address: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapResponse {
    pub map: MapDescription,
    /// Geocoded user position, absent when no address was given or it
    /// could not be resolved
    pub user_location: Option<Coordinate>,
    pub nearest: Option<NearestSummary>,
    /// Whether the user position falls inside the loaded boundary
    pub within_boundary: Option<bool>,
    pub warnings: Vec<Warning>,
}

/// Build the map, optionally around a geocoded address.
///
/// Only a failure to load the nursery sheet is an error. Boundary and
/// geocoding problems degrade the map and are reported in `warnings`.
async fn get_map(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MapQuery>,
) -> Result<Json<MapResponse>> {
    let address = params.address.unwrap_or_default();
    if address.len() > MAX_ADDRESS_LEN {
        return Err(AppError::BadRequest(format!(
            "Address must be at most {} characters",
            MAX_ADDRESS_LEN
        )));
    }

    let records = state.session.records().await?;
    let boundary = state.session.boundary().await;

    let mut warnings = Vec::new();
    let user_location = match state
        .geocoder
        .geocode(&address, &state.config.geocode_hint)
        .await
    {
        Ok(location) => location,
        Err(e) => {
            tracing::warn!(error = %e, code = e.code(), "Geocoding failed, showing map without user location");
            warnings.push(Warning {
                code: e.code().to_string(),
                message: e.user_message().to_string(),
            });
            None
        }
    };

    if user_location.is_some() && records.locatable_count() == 0 {
        warnings.push(Warning {
            code: "no_facilities".to_string(),
            message: "No nurseries with valid coordinates to compare against".to_string(),
        });
    }

    let (map, found) = compose_for_query(&records, &boundary, user_location);

    if let Some(found) = &found {
        tracing::debug!(
            nursery = %found.record.name,
            distance_km = found.distance_km,
            "Nearest nursery found"
        );
    }

    let within_boundary = user_location
        .filter(|_| !boundary.is_empty())
        .map(|location| boundary.contains(location));

    Ok(Json(MapResponse {
        map,
        user_location,
        nearest: found.as_ref().map(NearestSummary::from),
        within_boundary,
        warnings,
    }))
}

// ─── Raw data ────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RecordsResponse {
    pub columns: Vec<String>,
    /// Columns the sheet lacked, shown as "N/A" in every row
    pub missing_columns: Vec<String>,
    pub records: Vec<FacilityRecord>,
}

/// The nursery sheet as loaded, for the "show raw data" table.
async fn get_records(State(state): State<Arc<AppState>>) -> Result<Json<RecordsResponse>> {
    let records = state.session.records().await?;

    Ok(Json(RecordsResponse {
        columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        missing_columns: records
            .missing_columns()
            .iter()
            .map(|c| c.to_string())
            .collect(),
        records: records.records().to_vec(),
    }))
}

// ─── Nearest ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct NearestQuery {
    lat: f64,
    lon: f64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NearestResponse {
    pub query: Coordinate,
    pub nearest: NearestSummary,
}

/// Nearest nursery to an explicit position (e.g. browser geolocation).
async fn get_nearest(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NearestQuery>,
) -> Result<Json<NearestResponse>> {
    let query = Coordinate::new(params.lat, params.lon);
    if !query.is_valid() {
        return Err(AppError::BadRequest(
            "lat must be within [-90, 90] and lon within [-180, 180]".to_string(),
        ));
    }

    let records = state.session.records().await?;
    let found = nearest(query, records.records())?;

    Ok(Json(NearestResponse {
        query,
        nearest: NearestSummary::from(&found),
    }))
}
