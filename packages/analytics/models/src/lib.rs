#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View types produced by the dashboard engine.
//!
//! A [`ViewModel`] is everything a frontend needs to draw one state of
//! the dashboard: the weekly chart series, the table preview, and the
//! marker map. These types are serialized to JSON unchanged, so they
//! carry colors and styles rather than leaving them to the client.

use bike_lane_request_models::{FilterCriteria, ResponseSpeed, ServiceRequestRecord};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// How a year's line is stroked.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LineStyle {
    /// The most recent year.
    Solid,
    /// Every earlier year.
    Dashed,
}

/// Summed request count for one week bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Week-of-year bucket.
    pub week_bin: i32,
    /// Sum of `index` over the bucket's records.
    pub total: u64,
}

/// One line of the weekly chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSeries {
    /// Year this line covers.
    pub year: i32,
    /// Stroke color.
    pub color: String,
    /// Stroke style.
    pub line_style: LineStyle,
    /// Week bins that have data, ascending. Absent bins are gaps.
    pub points: Vec<SeriesPoint>,
}

impl YearSeries {
    /// Aligns this line to a shared x-axis domain, yielding `None` for
    /// week bins this year has no data for.
    #[must_use]
    pub fn values_on(&self, domain: &[i32]) -> Vec<Option<u64>> {
        domain
            .iter()
            .map(|bin| {
                self.points
                    .binary_search_by_key(bin, |p| p.week_bin)
                    .ok()
                    .map(|i| self.points[i].total)
            })
            .collect()
    }

    /// Sum over every point of this line.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.total).sum()
    }
}

/// Weekly totals pivoted into one series per year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesByYear {
    /// Union of every year's week bins, ascending: the chart's x-axis.
    pub week_bins: Vec<i32>,
    /// One line per year, ascending by year.
    pub series: Vec<YearSeries>,
}

impl SeriesByYear {
    /// Whether there is nothing to plot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The line for `year`, if present.
    #[must_use]
    pub fn year(&self, year: i32) -> Option<&YearSeries> {
        self.series.iter().find(|s| s.year == year)
    }
}

/// The "Resolution Distribution" chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    /// Chart title.
    pub title: String,
    /// X-axis label.
    pub x_label: String,
    /// Legend heading.
    pub legend_title: String,
    /// Plotted data.
    pub data: SeriesByYear,
}

/// The first rows of the filtered set, untransformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePreview {
    /// Leading filtered rows.
    pub rows: Vec<ServiceRequestRecord>,
    /// Number of rows in the whole filtered set.
    pub total_rows: usize,
}

/// One circle marker on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerDescriptor {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Circle radius in pixels.
    pub radius: f64,
    /// Response-time bucket.
    pub speed: ResponseSpeed,
    /// Stroke and fill color for [`Self::speed`].
    pub color: String,
    /// Whether the circle is filled.
    pub fill: bool,
    /// Popup text.
    pub label: String,
}

/// Where the map center came from.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CenterSource {
    /// Midpoint of the filtered markers' extent.
    Markers,
    /// Midpoint of the community board overlay (no markers matched).
    Boundaries,
    /// Fixed citywide default (no markers and no overlay geometry).
    Default,
}

/// The interactive marker map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Center latitude.
    pub center_latitude: f64,
    /// Center longitude.
    pub center_longitude: f64,
    /// Initial zoom level.
    pub zoom: f64,
    /// Where the center came from.
    pub center_source: CenterSource,
    /// Base tile layer name.
    pub tiles: String,
    /// One marker per filtered request, in filtered order.
    pub markers: Vec<MarkerDescriptor>,
}

/// Everything needed to draw one state of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    /// The criteria this view was rendered for.
    pub criteria: FilterCriteria,
    /// Board dropdown options, `"All"` first.
    pub board_options: Vec<String>,
    /// Weekly chart.
    pub chart: ChartView,
    /// Table preview.
    pub table: TablePreview,
    /// Marker map.
    pub map: MapView,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> YearSeries {
        YearSeries {
            year: 2023,
            color: "#ff7f0e".to_string(),
            line_style: LineStyle::Solid,
            points: vec![
                SeriesPoint {
                    week_bin: 1,
                    total: 4,
                },
                SeriesPoint {
                    week_bin: 3,
                    total: 6,
                },
            ],
        }
    }

    #[test]
    fn values_on_leaves_gaps() {
        assert_eq!(
            series().values_on(&[0, 1, 2, 3]),
            vec![None, Some(4), None, Some(6)]
        );
    }

    #[test]
    fn total_sums_points() {
        assert_eq!(series().total(), 10);
    }

    #[test]
    fn styles_serialize_lowercase() {
        assert_eq!(
            serde_json::to_string(&LineStyle::Dashed).unwrap(),
            "\"dashed\""
        );
        assert_eq!(CenterSource::Boundaries.to_string(), "boundaries");
    }

    #[test]
    fn year_lookup() {
        let by_year = SeriesByYear {
            week_bins: vec![1, 3],
            series: vec![series()],
        };
        assert!(by_year.year(2023).is_some());
        assert!(by_year.year(2022).is_none());
        assert!(!by_year.is_empty());
        assert!(SeriesByYear::default().is_empty());
    }
}
