// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Nursery Locator: find the nearest plant nursery in Khariar.
//!
//! This crate provides the backend API for the nursery map: it loads the
//! nursery sheet and block boundary, geocodes user addresses, and describes
//! the map the front end should draw.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{GeocoderService, SessionData};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub session: SessionData,
    pub geocoder: GeocoderService,
}
