// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Region boundary loading.

use crate::models::boundary::{BoundaryFeature, BoundaryGeometry, BoundaryRegion};
use crate::services::source::{DataSource, SourceError};
use geo::{MultiPolygon, Polygon};
use geojson::GeoJson;

/// Loads the region outline from a GeoJSON FeatureCollection.
pub struct BoundaryProvider;

impl BoundaryProvider {
    /// Fetch and parse the boundary, reporting why it failed if it did.
    pub async fn fetch(
        source: &DataSource,
        http: &reqwest::Client,
    ) -> Result<BoundaryRegion, BoundaryLoadError> {
        let bytes = source.fetch_bytes(http).await?;
        let json_data =
            std::str::from_utf8(&bytes).map_err(|e| BoundaryLoadError::Parse(e.to_string()))?;
        Self::parse(json_data)
    }

    /// Fetch the boundary, degrading to an empty region on any failure.
    pub async fn load_or_empty(source: &DataSource, http: &reqwest::Client) -> BoundaryRegion {
        match Self::fetch(source, http).await {
            Ok(region) => region,
            Err(e) => {
                tracing::warn!(
                    source = %source,
                    error = %e,
                    "Could not load region boundary, continuing without it"
                );
                BoundaryRegion::empty()
            }
        }
    }

    /// Parse a GeoJSON FeatureCollection, keeping polygonal features only.
    pub fn parse(json_data: &str) -> Result<BoundaryRegion, BoundaryLoadError> {
        let geojson: GeoJson = json_data
            .parse()
            .map_err(|e: geojson::Error| BoundaryLoadError::Parse(e.to_string()))?;

        let GeoJson::FeatureCollection(collection) = geojson else {
            return Err(BoundaryLoadError::NotFeatureCollection);
        };

        let mut features = Vec::new();
        for feature in collection.features {
            let name = feature
                .property("name")
                .and_then(|v| v.as_str())
                .map(str::to_string);

            let Some(geom) = feature.geometry else {
                tracing::debug!(name = ?name, "Skipping boundary feature without geometry");
                continue;
            };

            match Self::convert_geometry(geom.value) {
                Some(geometry) => features.push(BoundaryFeature { name, geometry }),
                None => {
                    tracing::debug!(name = ?name, "Skipping non-polygonal boundary feature");
                }
            }
        }

        tracing::info!(count = features.len(), "Loaded boundary features");
        Ok(BoundaryRegion::new(features))
    }

    /// Convert GeoJSON geometry to our internal format.
    fn convert_geometry(value: geojson::Value) -> Option<BoundaryGeometry> {
        match value {
            geojson::Value::Polygon(_) => Polygon::<f64>::try_from(value)
                .ok()
                .map(BoundaryGeometry::Polygon),
            geojson::Value::MultiPolygon(_) => MultiPolygon::<f64>::try_from(value)
                .ok()
                .map(BoundaryGeometry::MultiPolygon),
            _ => None,
        }
    }
}

/// Reasons the boundary could not be loaded. Never fatal: callers fall back
/// to the empty region.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BoundaryLoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to parse GeoJSON: {0}")]
    Parse(String),

    #[error("Boundary GeoJSON is not a FeatureCollection")]
    NotFeatureCollection,
}
