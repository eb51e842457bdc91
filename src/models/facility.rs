// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Nursery facility records as loaded from the nursery sheet.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Placeholder for empty cells and for columns the sheet does not carry.
pub const NOT_AVAILABLE: &str = "N/A";

/// Columns every nursery sheet is expected to provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Name",
    "Longitude",
    "Latitude",
    "Capacity",
    "PlantsAvailable",
    "Contact",
];

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }

    /// Convert to a `geo` point (x = longitude, y = latitude).
    pub fn to_point(self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}

/// A single spreadsheet cell, kept with the type the sheet gave it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn not_available() -> Self {
        CellValue::Text(NOT_AVAILABLE.to_string())
    }

    /// Build a cell from raw text. Blank text becomes "N/A".
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self::not_available()
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, CellValue::Text(s) if s == NOT_AVAILABLE)
    }

    /// Numeric view of the cell. Text cells are parsed leniently.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::not_available()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

/// One nursery row. Field names serialize as the sheet's column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FacilityRecord {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Longitude")]
    pub longitude: CellValue,
    #[serde(rename = "Latitude")]
    pub latitude: CellValue,
    #[serde(rename = "Capacity")]
    pub capacity: CellValue,
    #[serde(rename = "PlantsAvailable")]
    pub plants_available: CellValue,
    #[serde(rename = "Contact")]
    pub contact: String,
}

impl FacilityRecord {
    /// Convenience constructor for a record with numeric coordinates and
    /// every other field defaulted.
    pub fn at(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            longitude: CellValue::Number(lon),
            latitude: CellValue::Number(lat),
            capacity: CellValue::not_available(),
            plants_available: CellValue::not_available(),
            contact: NOT_AVAILABLE.to_string(),
        }
    }

    /// The record's position, if both cells are numeric and in range.
    pub fn coordinate(&self) -> Option<Coordinate> {
        let coordinate = Coordinate::new(self.latitude.as_f64()?, self.longitude.as_f64()?);
        coordinate.is_valid().then_some(coordinate)
    }
}
