//! Input file locations.
//!
//! Paths default to the workspace's `data/` directory and can be
//! overridden with environment variables.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Default file name of the pre-computed request CSV.
pub const DEFAULT_REQUESTS_FILE: &str = "dfc_out.csv";

/// Default file name of the community board boundary `GeoJSON`.
pub const DEFAULT_BOUNDARIES_FILE: &str = "CommunityDistricts.geojson";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the data directory: `BIKE_LANE_DATA_DIR` if set, otherwise
/// `<project root>/data`.
#[must_use]
pub fn data_dir() -> PathBuf {
    data_dir_from(|name| std::env::var_os(name))
}

fn data_dir_from(var: impl Fn(&str) -> Option<OsString>) -> PathBuf {
    var("BIKE_LANE_DATA_DIR").map_or_else(|| project_root().join("data"), PathBuf::from)
}

/// Locations of the two dashboard inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// The request CSV.
    pub requests_csv: PathBuf,
    /// The community board boundary `GeoJSON`.
    pub boundaries: PathBuf,
}

impl DatasetPaths {
    /// Default file names inside `data_dir`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            requests_csv: data_dir.join(DEFAULT_REQUESTS_FILE),
            boundaries: data_dir.join(DEFAULT_BOUNDARIES_FILE),
        }
    }

    /// Resolves paths from the environment.
    ///
    /// `BIKE_LANE_REQUESTS_CSV` and `BIKE_LANE_BOUNDARIES` override the
    /// individual files; otherwise they are looked up in [`data_dir`].
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var_os(name))
    }

    /// Same as [`Self::from_env`], reading variables through `var`.
    #[must_use]
    pub fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Self {
        let defaults = Self::new(&data_dir_from(&var));

        Self {
            requests_csv: var("BIKE_LANE_REQUESTS_CSV")
                .map_or(defaults.requests_csv, PathBuf::from),
            boundaries: var("BIKE_LANE_BOUNDARIES").map_or(defaults.boundaries, PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn default_file_names_inside_data_dir() {
        let paths = DatasetPaths::new(Path::new("/srv/data"));
        assert_eq!(paths.requests_csv, Path::new("/srv/data/dfc_out.csv"));
        assert_eq!(
            paths.boundaries,
            Path::new("/srv/data/CommunityDistricts.geojson")
        );
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), OsString::from(*v)))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn unset_vars_use_project_data_dir() {
        let paths = DatasetPaths::from_vars(vars(&[]));
        assert_eq!(paths, DatasetPaths::new(&project_root().join("data")));
    }

    #[test]
    fn data_dir_var_moves_both_files() {
        let paths = DatasetPaths::from_vars(vars(&[("BIKE_LANE_DATA_DIR", "/srv/bikes")]));
        assert_eq!(paths, DatasetPaths::new(Path::new("/srv/bikes")));
    }

    #[test]
    fn file_vars_override_data_dir() {
        let paths = DatasetPaths::from_vars(vars(&[
            ("BIKE_LANE_DATA_DIR", "/srv/bikes"),
            ("BIKE_LANE_REQUESTS_CSV", "/tmp/requests.csv"),
        ]));
        assert_eq!(paths.requests_csv, Path::new("/tmp/requests.csv"));
        assert_eq!(
            paths.boundaries,
            Path::new("/srv/bikes/CommunityDistricts.geojson")
        );

        let paths = DatasetPaths::from_vars(vars(&[("BIKE_LANE_BOUNDARIES", "/tmp/cd.geojson")]));
        assert_eq!(paths.boundaries, Path::new("/tmp/cd.geojson"));
        assert_eq!(
            paths.requests_csv,
            project_root().join("data").join("dfc_out.csv")
        );
    }

    #[test]
    fn project_root_holds_workspace_manifest() {
        assert!(project_root().join("Cargo.toml").exists());
    }
}
