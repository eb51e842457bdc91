// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Region boundary model and geometry handling.

use crate::models::facility::Coordinate;
use geo::{MultiPolygon, Polygon};
use geojson::{Feature, FeatureCollection, JsonObject};

/// One outline feature of the region.
#[derive(Debug, Clone)]
pub struct BoundaryFeature {
    /// Value of the feature's `name` property, if it had one
    pub name: Option<String>,
    /// Outline geometry (can be Polygon or MultiPolygon)
    pub geometry: BoundaryGeometry,
}

/// Boundary geometry - either a simple polygon or multi-polygon.
#[derive(Debug, Clone)]
pub enum BoundaryGeometry {
    Polygon(Polygon<f64>),
    MultiPolygon(MultiPolygon<f64>),
}

impl BoundaryGeometry {
    /// Check if a position lies inside this geometry.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        use geo::Contains;
        let point = coordinate.to_point();
        match self {
            BoundaryGeometry::Polygon(p) => p.contains(&point),
            BoundaryGeometry::MultiPolygon(mp) => mp.contains(&point),
        }
    }

    fn to_geojson(&self) -> geojson::Geometry {
        let value = match self {
            BoundaryGeometry::Polygon(p) => geojson::Value::from(p),
            BoundaryGeometry::MultiPolygon(mp) => geojson::Value::from(mp),
        };
        geojson::Geometry::new(value)
    }
}

/// The outline of the area of interest. An empty region is valid and
/// renders nothing.
#[derive(Debug, Clone, Default)]
pub struct BoundaryRegion {
    features: Vec<BoundaryFeature>,
}

impl BoundaryRegion {
    pub fn new(features: Vec<BoundaryFeature>) -> Self {
        Self { features }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.features
    }

    /// True if any feature of the region contains the position.
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.features
            .iter()
            .any(|f| f.geometry.contains(coordinate))
    }

    /// Rebuild a GeoJSON FeatureCollection for the map widget.
    pub fn to_feature_collection(&self) -> FeatureCollection {
        let features = self
            .features
            .iter()
            .map(|f| {
                let properties = f.name.as_ref().map(|name| {
                    let mut props = JsonObject::new();
                    props.insert("name".to_string(), name.clone().into());
                    props
                });
                Feature {
                    bbox: None,
                    geometry: Some(f.geometry.to_geojson()),
                    id: None,
                    properties,
                    foreign_members: None,
                }
            })
            .collect();

        FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
