#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the bike lane dashboard server.
//!
//! The rendered dashboard itself is returned as
//! `bike_lane_analytics_models::ViewModel`; this crate holds the query
//! parameters, the control descriptors, and the static page content.

use bike_lane_request_models::{
    ALL_BOARDS_LABEL, DEFAULT_END_DATE, DEFAULT_MIN_ENTRIES, DEFAULT_START_DATE,
    MIN_ENTRIES_RANGE,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Query parameters for the dashboard endpoint. Every field is optional
/// and falls back to the control default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQueryParams {
    /// First day included (`YYYY-MM-DD`).
    pub start: Option<String>,
    /// Last day included (`YYYY-MM-DD`).
    pub end: Option<String>,
    /// Board dropdown label; `All` disables the board filter.
    pub board: Option<String>,
    /// Minimum-entries slider value (1-10).
    pub min_entries: Option<u32>,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Error body for rejected requests.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// What was wrong with the request.
    pub error: String,
}

/// The dashboard's input controls and their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiControls {
    /// Start/end date pickers.
    pub date_range: DateRangeControl,
    /// Community board dropdown.
    pub board: BoardControl,
    /// Minimum-entries slider.
    pub min_entries: SliderControl,
}

impl ApiControls {
    /// Controls for the given dropdown options.
    #[must_use]
    pub fn new(board_options: Vec<String>) -> Self {
        Self {
            date_range: DateRangeControl {
                default_start: DEFAULT_START_DATE,
                default_end: DEFAULT_END_DATE,
            },
            board: BoardControl {
                label: "Select Community Board".to_string(),
                options: board_options,
                default: ALL_BOARDS_LABEL.to_string(),
            },
            min_entries: SliderControl {
                label: "Min. Entries for Map Display".to_string(),
                min: *MIN_ENTRIES_RANGE.start(),
                max: *MIN_ENTRIES_RANGE.end(),
                default: DEFAULT_MIN_ENTRIES,
            },
        }
    }
}

/// Date-range picker defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeControl {
    /// Initial start date.
    pub default_start: NaiveDate,
    /// Initial end date.
    pub default_end: NaiveDate,
}

/// Single-select dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardControl {
    /// Control label.
    pub label: String,
    /// Options, `"All"` first.
    pub options: Vec<String>,
    /// Initially selected option.
    pub default: String,
}

/// Integer slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderControl {
    /// Control label.
    pub label: String,
    /// Lowest value.
    pub min: u8,
    /// Highest value.
    pub max: u8,
    /// Initial value.
    pub default: u8,
}

/// The dashboard's navigation tabs.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DashboardTab {
    /// Chart and summary table.
    Dashboard,
    /// Marker map.
    Map,
    /// Static description.
    About,
    /// Static data-source links.
    Sources,
}

impl DashboardTab {
    /// Tab heading shown in navigation.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Map => "Interactive Maps",
            Self::About => "About",
            Self::Sources => "Sources",
        }
    }

    /// Returns all variants of this enum, in navigation order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Dashboard, Self::Map, Self::About, Self::Sources]
    }
}

/// A hyperlink on a static page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLink {
    /// Link text.
    pub label: String,
    /// Target URL.
    pub url: String,
}

/// Literal content of one tab, deserialized from the embedded page TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContent {
    /// Which tab this content belongs to.
    pub tab: DashboardTab,
    /// Page heading.
    pub title: String,
    /// Section headings shown on the page, in order.
    #[serde(default)]
    pub sections: Vec<String>,
    /// Plain-text paragraphs.
    #[serde(default)]
    pub paragraphs: Vec<String>,
    /// External links.
    #[serde(default)]
    pub links: Vec<PageLink>,
}
