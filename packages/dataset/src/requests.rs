//! Request CSV loader.
//!
//! Reads every row of the pre-computed request export and normalizes the
//! date, count and elapsed-minutes columns. Any malformed cell fails the
//! whole load: there is no row-level recovery. Blank week bin, year and
//! coordinate cells are kept as missing values. Board and address text is
//! passed through untrimmed.

use std::io::Read;
use std::path::Path;

use bike_lane_request_models::{DATE_FORMAT, ServiceRequestRecord};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{DatasetError, open_input};

/// One CSV row as it appears on disk, before type normalization.
#[derive(Debug, Deserialize)]
struct RawRequestRow {
    #[serde(rename = "dateTime")]
    date_time: String,
    #[serde(rename = "index_")]
    index: String,
    #[serde(rename = "MinutesElapsed")]
    minutes_elapsed: String,
    cboard_name: Option<String>,
    #[serde(rename = "WeekBin")]
    week_bin: String,
    #[serde(rename = "Year")]
    year: String,
    latitude: String,
    longitude: String,
    incident_address: Option<String>,
}

impl RawRequestRow {
    fn normalize(self, line: u64) -> Result<ServiceRequestRecord, DatasetError> {
        let date = NaiveDate::parse_from_str(self.date_time.trim(), DATE_FORMAT).map_err(|_| {
            DatasetError::InvalidDate {
                line,
                value: self.date_time.clone(),
            }
        })?;

        let index = parse_integer(line, "index_", &self.index)?;
        let week_bin = parse_optional_integer(line, "WeekBin", &self.week_bin)?;
        let year = parse_optional_integer(line, "Year", &self.year)?;

        let minutes_elapsed = parse_float(line, "MinutesElapsed", &self.minutes_elapsed)?;
        if !minutes_elapsed.is_finite() || minutes_elapsed < 0.0 {
            return Err(invalid_number(line, "MinutesElapsed", &self.minutes_elapsed));
        }

        Ok(ServiceRequestRecord {
            date,
            index,
            minutes_elapsed,
            community_board_name: self.cboard_name.filter(|s| !s.is_empty()),
            week_bin,
            year,
            latitude: parse_coordinate(line, "latitude", &self.latitude)?,
            longitude: parse_coordinate(line, "longitude", &self.longitude)?,
            incident_address: self.incident_address.unwrap_or_default(),
        })
    }
}

/// Loads every request from the CSV at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::NotFound`] if the file is missing, or any
/// parse error from [`load_records_from_reader`].
pub fn load_records(path: &Path) -> Result<Vec<ServiceRequestRecord>, DatasetError> {
    log::info!("Loading requests from {}", path.display());
    let records = load_records_from_reader(open_input(path)?)?;
    log::info!("Loaded {} requests from {}", records.len(), path.display());
    Ok(records)
}

/// Loads every request from CSV text. Output order equals file order.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] for structural problems (including a
/// missing required column), [`DatasetError::InvalidDate`] for a date not
/// in `YYYY-MM-DD`, and [`DatasetError::InvalidNumber`] for a cell that
/// cannot be cast to its column type.
pub fn load_records_from_reader<R: Read>(
    reader: R,
) -> Result<Vec<ServiceRequestRecord>, DatasetError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, csv::Position::line);
        let raw: RawRequestRow = row.deserialize(Some(&headers))?;
        records.push(raw.normalize(line)?);
    }

    Ok(records)
}

fn invalid_number(line: u64, column: &'static str, value: &str) -> DatasetError {
    DatasetError::InvalidNumber {
        line,
        column,
        value: value.to_string(),
    }
}

/// Casts a cell to an integer type. Integral float text such as `5.0` is
/// accepted; fractional or out-of-range values are not.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn parse_integer<T: TryFrom<i64>>(
    line: u64,
    column: &'static str,
    value: &str,
) -> Result<T, DatasetError> {
    let trimmed = value.trim();
    let whole = trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && v.trunc() == *v)
            .map(|v| v as i64)
    });

    whole
        .and_then(|v| T::try_from(v).ok())
        .ok_or_else(|| invalid_number(line, column, value))
}

/// Blank cells are `None`; anything else must cast like [`parse_integer`].
fn parse_optional_integer<T: TryFrom<i64>>(
    line: u64,
    column: &'static str,
    value: &str,
) -> Result<Option<T>, DatasetError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_integer(line, column, value).map(Some)
}

fn parse_float(line: u64, column: &'static str, value: &str) -> Result<f64, DatasetError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid_number(line, column, value))
}

/// Blank coordinates load as `NaN` and are ignored by the map extent.
fn parse_coordinate(line: u64, column: &'static str, value: &str) -> Result<f64, DatasetError> {
    if value.trim().is_empty() {
        return Ok(f64::NAN);
    }
    parse_float(line, column, value)
}
