#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Service request record and filter criteria types.
//!
//! This crate defines the normalized shape of one 311 "blocked bike lane"
//! request row, the criteria a dashboard user filters those rows by, and
//! the response-time buckets used to color map markers.

use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

/// Date format used by both the request CSV and the filter controls.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Dropdown label meaning "no board filter".
pub const ALL_BOARDS_LABEL: &str = "All";

/// Default start of the date-range control.
pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};

/// Default end of the date-range control.
pub const DEFAULT_END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2023, 12, 31) {
    Some(date) => date,
    None => panic!("invalid default end date"),
};

/// Accepted range of the minimum-entries slider.
pub const MIN_ENTRIES_RANGE: RangeInclusive<u8> = 1..=10;

/// Default position of the minimum-entries slider.
pub const DEFAULT_MIN_ENTRIES: u8 = 3;

/// One normalized 311 service request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequestRecord {
    /// Day the request was filed.
    pub date: NaiveDate,
    /// Count/weight carried by this row.
    pub index: u32,
    /// Minutes from filing to resolution.
    pub minutes_elapsed: f64,
    /// Community board the request falls in, if known.
    pub community_board_name: Option<String>,
    /// Week-of-year bucket (0 = first week), pre-computed upstream.
    /// `None` when the export left the cell blank.
    pub week_bin: Option<i32>,
    /// Year, pre-computed upstream. `None` when the cell was blank.
    pub year: Option<i32>,
    /// Latitude, `NaN` when the cell was blank.
    pub latitude: f64,
    /// Longitude, `NaN` when the cell was blank.
    pub longitude: f64,
    /// Street address of the incident.
    pub incident_address: String,
}

/// Response-time bucket used to color a map marker.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResponseSpeed {
    /// Resolved within 30 minutes.
    Fast,
    /// Resolved within an hour.
    Medium,
    /// Anything slower.
    Slow,
}

impl ResponseSpeed {
    /// Upper bound (inclusive) of the fast bucket, in minutes.
    pub const FAST_MAX_MINUTES: f64 = 30.0;
    /// Upper bound (inclusive) of the medium bucket, in minutes.
    pub const MEDIUM_MAX_MINUTES: f64 = 60.0;

    /// Buckets an elapsed-minutes value.
    #[must_use]
    pub fn from_minutes(minutes: f64) -> Self {
        if minutes <= Self::FAST_MAX_MINUTES {
            Self::Fast
        } else if minutes <= Self::MEDIUM_MAX_MINUTES {
            Self::Medium
        } else {
            Self::Slow
        }
    }

    /// Hex color drawn for this bucket.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Fast => "#007849",
            Self::Medium => "#FFB52E",
            Self::Slow => "#E32227",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Fast, Self::Medium, Self::Slow]
    }
}

/// Community board dropdown selection.
///
/// Serialized as the plain dropdown label, so `"All"` round-trips to
/// [`BoardSelection::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum BoardSelection {
    /// No board filter.
    #[default]
    All,
    /// Only requests in the named board (exact, case-sensitive match).
    Board(String),
}

impl BoardSelection {
    /// Whether this selection is the unfiltered citywide view.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Whether a record's board name passes this selection.
    #[must_use]
    pub fn matches(&self, board_name: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Board(name) => board_name == Some(name.as_str()),
        }
    }

    /// Dropdown label for this selection.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_BOARDS_LABEL,
            Self::Board(name) => name,
        }
    }
}

impl FromStr for BoardSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for BoardSelection {
    fn from(value: String) -> Self {
        if value == ALL_BOARDS_LABEL {
            Self::All
        } else {
            Self::Board(value)
        }
    }
}

impl From<BoardSelection> for String {
    fn from(value: BoardSelection) -> Self {
        match value {
            BoardSelection::All => ALL_BOARDS_LABEL.to_string(),
            BoardSelection::Board(name) => name,
        }
    }
}

impl std::fmt::Display for BoardSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors produced while building [`FilterCriteria`] from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CriteriaError {
    /// A date control value did not match [`DATE_FORMAT`].
    #[error("Invalid {field} date '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// Which control the value came from.
        field: &'static str,
        /// The rejected input.
        value: String,
    },

    /// The minimum-entries value fell outside [`MIN_ENTRIES_RANGE`].
    #[error("Minimum entries {value} out of range 1-10")]
    MinEntriesOutOfRange {
        /// The rejected input.
        value: u32,
    },
}

/// The dashboard's filter controls, rebuilt on every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// First day included.
    pub start_date: NaiveDate,
    /// Last day included.
    pub end_date: NaiveDate,
    /// Board dropdown selection.
    pub board: BoardSelection,
    /// Minimum-entries slider value. Accepted and echoed; no view
    /// consults it yet.
    pub min_entries: u8,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            end_date: DEFAULT_END_DATE,
            board: BoardSelection::All,
            min_entries: DEFAULT_MIN_ENTRIES,
        }
    }
}

impl FilterCriteria {
    /// Builds criteria from raw control values, falling back to the
    /// control defaults for anything not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError`] if a date does not parse or the minimum
    /// entries value is outside the slider range.
    pub fn from_controls(
        start: Option<&str>,
        end: Option<&str>,
        board: Option<&str>,
        min_entries: Option<u32>,
    ) -> Result<Self, CriteriaError> {
        let defaults = Self::default();

        let start_date = start
            .map(|s| parse_date("start", s))
            .transpose()?
            .unwrap_or(defaults.start_date);
        let end_date = end
            .map(|s| parse_date("end", s))
            .transpose()?
            .unwrap_or(defaults.end_date);
        let board = board
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map_or(defaults.board, |b| BoardSelection::from(b.to_string()));
        let min_entries = min_entries
            .map(validate_min_entries)
            .transpose()?
            .unwrap_or(defaults.min_entries);

        Ok(Self {
            start_date,
            end_date,
            board,
            min_entries,
        })
    }

    /// Whether `date` falls inside the inclusive date range.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Parses a control date in [`DATE_FORMAT`].
///
/// # Errors
///
/// Returns [`CriteriaError::InvalidDate`] if `value` is not a `YYYY-MM-DD`
/// date.
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, CriteriaError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| CriteriaError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn validate_min_entries(value: u32) -> Result<u8, CriteriaError> {
    u8::try_from(value)
        .ok()
        .filter(|v| MIN_ENTRIES_RANGE.contains(v))
        .ok_or(CriteriaError::MinEntriesOutOfRange { value })
}
