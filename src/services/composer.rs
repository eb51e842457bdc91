// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Map assembly: boundary, nursery markers, user marker and the line to the
//! nearest nursery. Pure functions of their inputs.

use crate::models::boundary::BoundaryRegion;
use crate::models::facility::{Coordinate, FacilityRecord};
use crate::models::map::{
    BoundaryLayer, LineLayer, MapDescription, MapView, Marker, MarkerCluster, MarkerIcon,
    OutlineStyle,
};
use crate::services::nearest::{nearest, NearestResult};
use crate::services::records::RecordStore;

/// Default view when there is no user location: the whole Khariar block.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(20.1, 82.5);
pub const DEFAULT_ZOOM: u8 = 11;

pub const MAP_WIDTH: u32 = 1200;
pub const MAP_HEIGHT: u32 = 700;

const BOUNDARY_LAYER_NAME: &str = "Khariar Boundary";
const USER_TOOLTIP: &str = "Your Location";

/// Build the map for one interaction.
///
/// `nearest` is only drawn when `user_location` is present.
pub fn compose(
    records: &RecordStore,
    boundary: &BoundaryRegion,
    user_location: Option<Coordinate>,
    nearest: Option<&NearestResult<'_>>,
) -> MapDescription {
    let facilities = MarkerCluster {
        markers: records
            .records()
            .iter()
            .filter_map(facility_marker)
            .collect(),
    };

    let boundary = (!boundary.is_empty()).then(|| BoundaryLayer {
        name: BOUNDARY_LAYER_NAME.to_string(),
        style: OutlineStyle {
            color: "yellow".to_string(),
            weight: 3,
            fill_opacity: 0.1,
        },
        geojson: boundary.to_feature_collection(),
    });

    let default_view = MapView::Center {
        center: DEFAULT_CENTER,
        zoom: DEFAULT_ZOOM,
    };

    let (user_marker, connecting_line, view) = match user_location {
        Some(user) => {
            let marker = Marker {
                location: user,
                icon: icon("user", "blue"),
                popup_html: None,
                tooltip: Some(USER_TOOLTIP.to_string()),
            };
            match nearest {
                Some(found) => {
                    let line = LineLayer {
                        points: vec![user, found.location],
                        color: "red".to_string(),
                        weight: 2,
                    };
                    let view = MapView::fit(&[user, found.location]).unwrap_or(default_view);
                    (Some(marker), Some(line), view)
                }
                None => (
                    Some(marker),
                    None,
                    MapView::Center {
                        center: user,
                        zoom: DEFAULT_ZOOM,
                    },
                ),
            }
        }
        None => (None, None, default_view),
    };

    MapDescription {
        width: MAP_WIDTH,
        height: MAP_HEIGHT,
        view,
        boundary,
        facilities,
        user_marker,
        connecting_line,
    }
}

/// Look up the nearest nursery for the user's location (if any) and build
/// the map around it.
pub fn compose_for_query<'a>(
    records: &'a RecordStore,
    boundary: &BoundaryRegion,
    user_location: Option<Coordinate>,
) -> (MapDescription, Option<NearestResult<'a>>) {
    let found = user_location.and_then(|user| match nearest(user, records.records()) {
        Ok(found) => Some(found),
        Err(e) => {
            tracing::warn!(error = %e, "No nearest nursery for user location");
            None
        }
    });

    let map = compose(records, boundary, user_location, found.as_ref());
    (map, found)
}

fn facility_marker(record: &FacilityRecord) -> Option<Marker> {
    let location = record.coordinate()?;
    Some(Marker {
        location,
        icon: icon("leaf", "green"),
        popup_html: Some(popup_html(record)),
        tooltip: None,
    })
}

/// Popup body: bold name, available plants, contact.
pub fn popup_html(record: &FacilityRecord) -> String {
    format!(
        "<b>{}</b><br>Plants: {}<br>Contact: {}",
        escape_html(&record.name),
        escape_html(&record.plants_available.to_string()),
        escape_html(&record.contact)
    )
}

fn icon(name: &str, color: &str) -> MarkerIcon {
    MarkerIcon {
        icon: name.to_string(),
        prefix: "fa".to_string(),
        color: color.to_string(),
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::boundary::{BoundaryFeature, BoundaryGeometry};
    use crate::models::CellValue;
    use geo::polygon;

    fn two_nurseries() -> RecordStore {
        RecordStore::from_records(vec![
            FacilityRecord::at("A", 20.10, 82.50),
            FacilityRecord::at("B", 20.20, 82.60),
        ])
    }

    fn khariar_outline() -> BoundaryRegion {
        let poly = polygon![
            (x: 82.3, y: 20.0),
            (x: 82.8, y: 20.0),
            (x: 82.8, y: 20.4),
            (x: 82.3, y: 20.4),
            (x: 82.3, y: 20.0),
        ];
        BoundaryRegion::new(vec![BoundaryFeature {
            name: None,
            geometry: BoundaryGeometry::Polygon(poly),
        }])
    }

    #[test]
    fn test_no_user_location_uses_default_view() {
        let map = compose(&two_nurseries(), &BoundaryRegion::empty(), None, None);

        assert_eq!(map.facilities.markers.len(), 2);
        assert!(map.user_marker.is_none());
        assert!(map.connecting_line.is_none());
        assert!(map.boundary.is_none());
        assert_eq!(
            map.view,
            MapView::Center {
                center: DEFAULT_CENTER,
                zoom: DEFAULT_ZOOM
            }
        );
        assert_eq!((map.width, map.height), (1200, 700));
    }

    #[test]
    fn test_user_location_draws_line_to_nearest() {
        let records = two_nurseries();
        let user = Coordinate::new(20.11, 82.51);
        let (map, found) = compose_for_query(&records, &BoundaryRegion::empty(), Some(user));

        let found = found.expect("nearest should be found");
        assert_eq!(found.record.name, "A");

        let marker = map.user_marker.expect("user marker");
        assert_eq!(marker.location, user);
        assert_eq!(marker.icon.icon, "user");
        assert_eq!(marker.icon.color, "blue");
        assert_eq!(marker.tooltip.as_deref(), Some("Your Location"));

        let line = map.connecting_line.expect("connecting line");
        assert_eq!(line.points, vec![user, Coordinate::new(20.10, 82.50)]);
        assert_eq!(line.color, "red");
        assert_eq!(line.weight, 2);

        assert_eq!(
            map.view,
            MapView::FitBounds {
                south_west: Coordinate::new(20.10, 82.50),
                north_east: Coordinate::new(20.11, 82.51),
            }
        );
    }

    #[test]
    fn test_boundary_layer_has_fixed_style() {
        let map = compose(&two_nurseries(), &khariar_outline(), None, None);
        let layer = map.boundary.expect("boundary layer");

        assert_eq!(layer.name, "Khariar Boundary");
        assert_eq!(layer.style.color, "yellow");
        assert_eq!(layer.style.weight, 3);
        assert_eq!(layer.style.fill_opacity, 0.1);
        assert_eq!(layer.geojson.features.len(), 1);
    }

    #[test]
    fn test_user_without_locatable_nurseries() {
        let mut record = FacilityRecord::at("Unmapped", 0.0, 0.0);
        record.latitude = CellValue::not_available();
        let records = RecordStore::from_records(vec![record]);
        let user = Coordinate::new(20.11, 82.51);

        let (map, found) = compose_for_query(&records, &BoundaryRegion::empty(), Some(user));

        assert!(found.is_none());
        assert!(map.facilities.markers.is_empty());
        assert!(map.user_marker.is_some());
        assert!(map.connecting_line.is_none());
        assert_eq!(
            map.view,
            MapView::Center {
                center: user,
                zoom: DEFAULT_ZOOM
            }
        );
    }

    #[test]
    fn test_popup_content_and_escaping() {
        let mut record = FacilityRecord::at("Sinapali <Central>", 20.1, 82.5);
        record.plants_available = CellValue::Number(1500.0);
        record.contact = "R & D Office".to_string();

        assert_eq!(
            popup_html(&record),
            "<b>Sinapali &lt;Central&gt;</b><br>Plants: 1500<br>Contact: R &amp; D Office"
        );
    }

    #[test]
    fn test_facility_marker_icon() {
        let map = compose(&two_nurseries(), &BoundaryRegion::empty(), None, None);
        let icon = &map.facilities.markers[0].icon;

        assert_eq!(icon.icon, "leaf");
        assert_eq!(icon.prefix, "fa");
        assert_eq!(icon.color, "green");
    }
}
