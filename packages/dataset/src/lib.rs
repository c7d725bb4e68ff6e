#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dataset loading for the blocked bike lane dashboard.
//!
//! Reads the pre-computed 311 request CSV and the community board
//! boundary `GeoJSON` once at startup and holds them in an immutable
//! [`DashboardContext`] that every view is rendered from.

pub mod boundaries;
pub mod paths;
pub mod requests;

use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};

use bike_lane_request_models::{ALL_BOARDS_LABEL, ServiceRequestRecord};
use thiserror::Error;

pub use boundaries::{CommunityBoardBoundaries, load_boundaries};
pub use paths::DatasetPaths;
pub use requests::{load_records, load_records_from_reader};

/// Errors that can occur while loading the dashboard inputs.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// A fixed input file does not exist.
    #[error("Input file not found: {}", path.display())]
    NotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Reading an input file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV is structurally malformed or lacks a required column.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A `dateTime` cell did not match `YYYY-MM-DD`.
    #[error("Invalid date '{value}' on line {line}: expected YYYY-MM-DD")]
    InvalidDate {
        /// 1-based CSV line number.
        line: u64,
        /// The rejected cell.
        value: String,
    },

    /// A numeric cell could not be cast to its column type.
    #[error("Invalid {column} value '{value}' on line {line}")]
    InvalidNumber {
        /// 1-based CSV line number.
        line: u64,
        /// CSV column name.
        column: &'static str,
        /// The rejected cell.
        value: String,
    },

    /// The boundary file is not well-formed `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    Geojson(#[from] geojson::Error),
}

/// Opens an input file, reporting a missing file as
/// [`DatasetError::NotFound`].
pub(crate) fn open_input(path: &Path) -> Result<File, DatasetError> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            DatasetError::Io(e)
        }
    })
}

/// Immutable session state: the loaded requests, the boundary overlay,
/// and the board names derived from them.
///
/// Built once and shared by reference with every render.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    records: Vec<ServiceRequestRecord>,
    boundaries: CommunityBoardBoundaries,
    board_names: Vec<String>,
}

impl DashboardContext {
    /// Builds a context from already-loaded inputs.
    #[must_use]
    pub fn new(records: Vec<ServiceRequestRecord>, boundaries: CommunityBoardBoundaries) -> Self {
        let board_names = records
            .iter()
            .filter_map(|r| r.community_board_name.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            records,
            boundaries,
            board_names,
        }
    }

    /// Loads both input files.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if either file is missing or malformed.
    pub fn load(paths: &DatasetPaths) -> Result<Self, DatasetError> {
        let records = load_records(&paths.requests_csv)?;
        let boundaries = load_boundaries(&paths.boundaries)?;
        let context = Self::new(records, boundaries);

        log::info!(
            "Dashboard context ready: {} requests across {} boards",
            context.records.len(),
            context.board_names.len()
        );

        Ok(context)
    }

    /// All loaded requests, in file order.
    #[must_use]
    pub fn records(&self) -> &[ServiceRequestRecord] {
        &self.records
    }

    /// The community board overlay.
    #[must_use]
    pub const fn boundaries(&self) -> &CommunityBoardBoundaries {
        &self.boundaries
    }

    /// Sorted distinct board names, excluding missing values.
    #[must_use]
    pub fn board_names(&self) -> &[String] {
        &self.board_names
    }

    /// Dropdown options: `"All"` followed by [`Self::board_names`].
    #[must_use]
    pub fn board_options(&self) -> Vec<String> {
        std::iter::once(ALL_BOARDS_LABEL.to_string())
            .chain(self.board_names.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
dateTime,index_,MinutesElapsed,cboard_name,WeekBin,Year,latitude,longitude,incident_address
2023-03-01,5,20.0,Brooklyn 2,8,2023,40.69,-73.98,1 MAIN ST
2023-03-02,2,75.5,,8,2023,40.70,-73.97,2 MAIN ST
2023-03-03,1,10,Bronx 1,8,2023,40.81,-73.92,3 MAIN ST
2023-03-04,4,40,Brooklyn 2,8,2023,40.68,-73.99,4 MAIN ST
";

    fn context() -> DashboardContext {
        let records = load_records_from_reader(CSV.as_bytes()).unwrap();
        DashboardContext::new(records, CommunityBoardBoundaries::empty())
    }

    #[test]
    fn board_names_are_sorted_distinct_and_skip_missing() {
        assert_eq!(context().board_names(), ["Bronx 1", "Brooklyn 2"]);
    }

    #[test]
    fn board_options_lead_with_all() {
        assert_eq!(
            context().board_options(),
            vec!["All".to_string(), "Bronx 1".to_string(), "Brooklyn 2".to_string()]
        );
    }

    #[test]
    fn load_reports_missing_files() {
        let paths = DatasetPaths::new(Path::new("/nonexistent/bike-lane-data"));
        let err = DashboardContext::load(&paths).unwrap_err();
        assert!(
            matches!(&err, DatasetError::NotFound { path } if path.ends_with("dfc_out.csv")),
            "unexpected error: {err}"
        );
    }
}
