// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod boundary;
pub mod composer;
pub mod geocoder;
pub mod nearest;
pub mod records;
pub mod session;
pub mod source;

pub use boundary::{BoundaryLoadError, BoundaryProvider};
pub use composer::{compose, compose_for_query};
pub use geocoder::{GeocodeError, GeocodeHint, GeocoderService};
pub use nearest::{geodesic_distance_km, nearest, NearestResult, NoFacilitiesError};
pub use records::{DataLoadError, RecordStore};
pub use session::SessionData;
pub use source::{DataSource, SourceError};
