// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-lifetime datasets.
//!
//! The nursery records and the region boundary are each fetched at most
//! once per process and then shared read-only by every request. Concurrent
//! first requests wait on a single load.

use crate::models::boundary::BoundaryRegion;
use crate::services::boundary::BoundaryProvider;
use crate::services::records::{DataLoadError, RecordStore};
use crate::services::source::DataSource;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub struct SessionData {
    http: reqwest::Client,
    record_source: DataSource,
    boundary_source: DataSource,
    records: OnceCell<Arc<RecordStore>>,
    boundary: OnceCell<Arc<BoundaryRegion>>,
}

impl SessionData {
    pub fn new(http: reqwest::Client, record_source: DataSource, boundary_source: DataSource) -> Self {
        Self {
            http,
            record_source,
            boundary_source,
            records: OnceCell::new(),
            boundary: OnceCell::new(),
        }
    }

    /// Session with both datasets already in memory (tests, benchmarks).
    pub fn preloaded(records: RecordStore, boundary: BoundaryRegion) -> Self {
        let unused = DataSource::File(PathBuf::new());
        Self {
            http: reqwest::Client::new(),
            record_source: unused.clone(),
            boundary_source: unused,
            records: OnceCell::new_with(Some(Arc::new(records))),
            boundary: OnceCell::new_with(Some(Arc::new(boundary))),
        }
    }

    /// Nursery records, loading them on first use.
    ///
    /// Only a successful load is kept; after a failure the next call tries
    /// again.
    pub async fn records(&self) -> Result<Arc<RecordStore>, DataLoadError> {
        self.records
            .get_or_try_init(|| async {
                RecordStore::load(&self.record_source, &self.http)
                    .await
                    .map(Arc::new)
            })
            .await
            .cloned()
    }

    /// Region boundary, loading it on first use. A failed load is kept as
    /// the empty region.
    pub async fn boundary(&self) -> Arc<BoundaryRegion> {
        self.boundary
            .get_or_init(|| async {
                Arc::new(BoundaryProvider::load_or_empty(&self.boundary_source, &self.http).await)
            })
            .await
            .clone()
    }

    /// Load both datasets concurrently. Failures are logged, not returned:
    /// the server still starts and reports them per request.
    pub async fn warm(&self) {
        let (records, boundary) = tokio::join!(self.records(), self.boundary());
        match records {
            Ok(store) => tracing::info!(
                records = store.len(),
                boundary_features = boundary.features().len(),
                "Datasets ready"
            ),
            Err(e) => tracing::error!(
                error = %e,
                source = %self.record_source,
                "Nursery records unavailable at startup"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FacilityRecord;

    #[tokio::test]
    async fn test_preloaded_returns_same_handles() {
        let session = SessionData::preloaded(
            RecordStore::from_records(vec![FacilityRecord::at("A", 20.1, 82.5)]),
            BoundaryRegion::empty(),
        );

        let first = session.records().await.unwrap();
        let second = session.records().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.len(), 1);

        let b1 = session.boundary().await;
        let b2 = session.boundary().await;
        assert!(Arc::ptr_eq(&b1, &b2));
    }

    #[tokio::test]
    async fn test_failed_record_load_not_cached() {
        let dir = std::env::temp_dir().join(format!("nursery-session-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("late.csv");
        let _ = std::fs::remove_file(&path);

        let session = SessionData::new(
            reqwest::Client::new(),
            DataSource::File(path.clone()),
            DataSource::File(dir.join("missing.geojson")),
        );

        assert!(session.records().await.is_err());

        std::fs::write(&path, "Name,Latitude,Longitude\nA,20.1,82.5\n").unwrap();
        let store = session.records().await.expect("second attempt should load");
        assert_eq!(store.len(), 1);

        // Missing boundary degrades to empty and stays cached
        assert!(session.boundary().await.is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }
}
