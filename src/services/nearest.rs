// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nearest-nursery lookup by geodesic distance.
//!
//! A plain linear scan: the sheet holds at most a few hundred nurseries and
//! one lookup runs per user interaction. A spatial index would slot in here
//! if the dataset ever grows by orders of magnitude.

use crate::models::facility::{Coordinate, FacilityRecord};
use geo::{Distance, Geodesic};

/// The closest nursery to a query position.
#[derive(Debug, Clone, Copy)]
pub struct NearestResult<'a> {
    pub record: &'a FacilityRecord,
    /// Position of the record in sheet order
    pub index: usize,
    pub location: Coordinate,
    pub distance_km: f64,
}

/// No record had usable coordinates, so there is nothing to measure to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("No nurseries with valid coordinates are available")]
pub struct NoFacilitiesError;

/// Ellipsoidal (WGS84) distance between two positions, in kilometres.
pub fn geodesic_distance_km(a: Coordinate, b: Coordinate) -> f64 {
    Geodesic.distance(a.to_point(), b.to_point()) / 1000.0
}

/// Find the record closest to `query`.
///
/// Records without usable coordinates are skipped. Ties go to the record
/// that comes first in `records`.
pub fn nearest(
    query: Coordinate,
    records: &[FacilityRecord],
) -> Result<NearestResult<'_>, NoFacilitiesError> {
    let mut best: Option<NearestResult<'_>> = None;

    for (index, record) in records.iter().enumerate() {
        let Some(location) = record.coordinate() else {
            continue;
        };
        let distance_km = geodesic_distance_km(query, location);

        if best.map_or(true, |b| distance_km < b.distance_km) {
            best = Some(NearestResult {
                record,
                index,
                location,
                distance_km,
            });
        }
    }

    best.ok_or(NoFacilitiesError)
}
