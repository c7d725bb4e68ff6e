//! Map marker projection and map framing.

use bike_lane_analytics_models::{CenterSource, MapView, MarkerDescriptor};
use bike_lane_dataset::CommunityBoardBoundaries;
use bike_lane_request_models::{BoardSelection, ResponseSpeed, ServiceRequestRecord};

/// Zoom for the citywide (`All`) view.
pub const CITYWIDE_ZOOM: f64 = 11.25;

/// Zoom when a single board is selected.
pub const BOARD_ZOOM: f64 = 13.0;

/// Fallback `(latitude, longitude)` when neither markers nor boundaries
/// provide an extent.
pub const DEFAULT_CENTER: (f64, f64) = (40.7128, -74.0060);

/// Base tile layer drawn under the markers.
pub const MAP_TILES: &str = "CartoDB positron";

/// Marker radius for a request count: `index / 15 + 3`.
#[must_use]
pub fn radius(index: u32) -> f64 {
    f64::from(index) / 15.0 + 3.0
}

/// Projects one request onto a circle marker.
#[must_use]
pub fn project_marker(record: &ServiceRequestRecord) -> MarkerDescriptor {
    let speed = ResponseSpeed::from_minutes(record.minutes_elapsed);

    MarkerDescriptor {
        latitude: record.latitude,
        longitude: record.longitude,
        radius: radius(record.index),
        speed,
        color: speed.color().to_string(),
        fill: true,
        label: format!(
            "Address: {} / Response Time: {:?} mins",
            record.incident_address, record.minutes_elapsed
        ),
    }
}

/// Projects every request onto a marker, preserving order.
pub fn project<'a, I>(records: I) -> Vec<MarkerDescriptor>
where
    I: IntoIterator<Item = &'a ServiceRequestRecord>,
{
    records.into_iter().map(project_marker).collect()
}

/// Midpoint of the records' latitude and longitude extent.
///
/// Returns `None` for an empty set. NaN coordinates are skipped; a set
/// with no finite coordinate on either axis also yields `None`.
pub fn marker_center<'a, I>(records: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a ServiceRequestRecord>,
{
    let (lat, lon) = records.into_iter().fold(
        (Extent::default(), Extent::default()),
        |(lat, lon), record| (lat.include(record.latitude), lon.include(record.longitude)),
    );

    Some((lat.midpoint()?, lon.midpoint()?))
}

/// Running min/max that ignores NaN.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f64,
    max: f64,
}

impl Default for Extent {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Extent {
    fn include(self, value: f64) -> Self {
        Self {
            min: self.min.min(value),
            max: self.max.max(value),
        }
    }

    fn midpoint(self) -> Option<f64> {
        (self.min <= self.max).then(|| (self.max + self.min) / 2.0)
    }
}

/// Frames the map for the filtered records.
///
/// The center is the records' extent midpoint. With no usable records it
/// falls back to the boundary overlay's center, then to
/// [`DEFAULT_CENTER`]. Zoom is [`CITYWIDE_ZOOM`] for `All` and
/// [`BOARD_ZOOM`] for a single board.
#[must_use]
pub fn map_view(
    records: &[&ServiceRequestRecord],
    board: &BoardSelection,
    boundaries: &CommunityBoardBoundaries,
) -> MapView {
    let ((center_latitude, center_longitude), center_source) =
        if let Some(center) = marker_center(records.iter().copied()) {
            (center, CenterSource::Markers)
        } else if let Some(center) = boundaries.center() {
            log::debug!("No markers to frame, centering on board boundaries");
            (center, CenterSource::Boundaries)
        } else {
            log::debug!("No markers or boundaries to frame, using default center");
            (DEFAULT_CENTER, CenterSource::Default)
        };

    MapView {
        center_latitude,
        center_longitude,
        zoom: if board.is_all() {
            CITYWIDE_ZOOM
        } else {
            BOARD_ZOOM
        },
        center_source,
        tiles: MAP_TILES.to_string(),
        markers: project(records.iter().copied()),
    }
}
