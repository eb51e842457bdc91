// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod boundary;
pub mod facility;
pub mod map;

pub use boundary::{BoundaryFeature, BoundaryGeometry, BoundaryRegion};
pub use facility::{CellValue, Coordinate, FacilityRecord};
pub use map::MapDescription;
