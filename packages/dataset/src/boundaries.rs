//! Community board boundary overlay.
//!
//! The `GeoJSON` is passed through to the map layer untouched. The loader
//! only checks that it parses and records its extent, which the map falls
//! back to when no requests match the current filters.

use std::io::Read as _;
use std::path::Path;

use geo::{BoundingRect, GeometryCollection, Rect};
use geojson::GeoJson;

use crate::{DatasetError, open_input};

const EMPTY_FEATURE_COLLECTION: &str = r#"{"type":"FeatureCollection","features":[]}"#;

/// A parsed-but-opaque boundary overlay.
#[derive(Debug, Clone)]
pub struct CommunityBoardBoundaries {
    raw: String,
    feature_count: usize,
    bounds: Option<Rect<f64>>,
}

impl CommunityBoardBoundaries {
    /// Validates `raw` as `GeoJSON` and computes its extent.
    ///
    /// Geometry that cannot be converted for the extent calculation is
    /// logged and leaves the extent unset; it does not fail the parse.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Geojson`] if `raw` is not well-formed
    /// `GeoJSON`.
    pub fn parse(raw: String) -> Result<Self, DatasetError> {
        let geojson: GeoJson = raw.parse()?;

        let feature_count = match &geojson {
            GeoJson::FeatureCollection(collection) => collection.features.len(),
            GeoJson::Feature(_) => 1,
            GeoJson::Geometry(_) => 0,
        };

        let bounds = match geojson::quick_collection(&geojson) {
            Ok(collection) => {
                let collection: GeometryCollection<f64> = collection;
                collection.bounding_rect()
            }
            Err(e) => {
                log::warn!("Boundary geometry not usable for extent: {e}");
                None
            }
        };

        Ok(Self {
            raw,
            feature_count,
            bounds,
        })
    }

    /// An overlay with no features.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            raw: EMPTY_FEATURE_COLLECTION.to_string(),
            feature_count: 0,
            bounds: None,
        }
    }

    /// The original `GeoJSON` text.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Number of features in the overlay.
    #[must_use]
    pub const fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Bounding rectangle of every geometry, if there is any.
    #[must_use]
    pub const fn bounds(&self) -> Option<Rect<f64>> {
        self.bounds
    }

    /// Center of [`Self::bounds`] as `(latitude, longitude)`.
    #[must_use]
    pub fn center(&self) -> Option<(f64, f64)> {
        self.bounds.map(|rect| {
            let center = rect.center();
            (center.y, center.x)
        })
    }
}

/// Loads and validates the boundary file at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::NotFound`] if the file is missing,
/// [`DatasetError::Io`] if it cannot be read, or
/// [`DatasetError::Geojson`] if it is not well-formed `GeoJSON`.
pub fn load_boundaries(path: &Path) -> Result<CommunityBoardBoundaries, DatasetError> {
    let mut raw = String::new();
    open_input(path)?.read_to_string(&mut raw)?;

    let boundaries = CommunityBoardBoundaries::parse(raw)?;
    log::info!(
        "Loaded {} community board boundaries from {}",
        boundaries.feature_count(),
        path.display()
    );

    Ok(boundaries)
}
