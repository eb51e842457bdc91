// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Renderable map description handed to the front-end map widget.
//!
//! Everything here is plain data. The widget draws markers, clusters them,
//! and frames the view; this crate only decides what goes on the map.

use crate::models::facility::Coordinate;
use geojson::FeatureCollection;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Full map for one user interaction.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MapDescription {
    /// Rendered width in pixels
    pub width: u32,
    /// Rendered height in pixels
    pub height: u32,
    pub view: MapView,
    /// Region outline, omitted when no boundary is loaded
    pub boundary: Option<BoundaryLayer>,
    /// Nursery markers, grouped by the widget's marker clustering
    pub facilities: MarkerCluster,
    pub user_marker: Option<Marker>,
    /// Straight line from the user to the nearest nursery
    pub connecting_line: Option<LineLayer>,
}

/// How the widget should frame the map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum MapView {
    Center { center: Coordinate, zoom: u8 },
    FitBounds {
        south_west: Coordinate,
        north_east: Coordinate,
    },
}

impl MapView {
    /// Smallest box containing every given point.
    pub fn fit(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let (mut south_west, mut north_east) = (*first, *first);
        for p in &points[1..] {
            south_west.lat = south_west.lat.min(p.lat);
            south_west.lon = south_west.lon.min(p.lon);
            north_east.lat = north_east.lat.max(p.lat);
            north_east.lon = north_east.lon.max(p.lon);
        }
        Some(MapView::FitBounds {
            south_west,
            north_east,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BoundaryLayer {
    pub name: String,
    pub style: OutlineStyle,
    #[cfg_attr(feature = "binding-generation", ts(type = "unknown"))]
    pub geojson: FeatureCollection,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OutlineStyle {
    pub color: String,
    pub weight: u32,
    pub fill_opacity: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerCluster {
    pub markers: Vec<Marker>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Marker {
    pub location: Coordinate,
    pub icon: MarkerIcon,
    /// Pre-escaped HTML shown when the marker is clicked
    pub popup_html: Option<String>,
    pub tooltip: Option<String>,
}

/// Font Awesome icon name (`icon`, `prefix`) plus marker colour.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MarkerIcon {
    pub icon: String,
    pub prefix: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LineLayer {
    pub points: Vec<Coordinate>,
    pub color: String,
    pub weight: u32,
}
