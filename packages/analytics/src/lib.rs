#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard engine for the blocked bike lane requests.
//!
//! Every view is a pure function of the loaded [`DashboardContext`] and
//! the user's [`FilterCriteria`]: [`filter::filter_records`] narrows the
//! requests, [`aggregate::aggregate`] pivots them into weekly series per
//! year, and [`markers::project`] turns them into map markers.
//! [`view::render`] runs all three and assembles the [`ViewModel`].
//!
//! [`DashboardContext`]: bike_lane_dataset::DashboardContext
//! [`FilterCriteria`]: bike_lane_request_models::FilterCriteria
//! [`ViewModel`]: bike_lane_analytics_models::ViewModel

pub mod aggregate;
pub mod filter;
pub mod markers;
pub mod view;

pub use view::render;

#[cfg(test)]
pub(crate) mod test_support {
    use bike_lane_request_models::ServiceRequestRecord;
    use chrono::NaiveDate;

    /// A request on `date` (`YYYY-MM-DD`) with the given board, count and
    /// elapsed minutes. Week bin and year derive from the date.
    pub fn record(
        date: &str,
        board: Option<&str>,
        index: u32,
        minutes_elapsed: f64,
    ) -> ServiceRequestRecord {
        use chrono::Datelike as _;

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        ServiceRequestRecord {
            date,
            index,
            minutes_elapsed,
            community_board_name: board.map(str::to_string),
            week_bin: Some(i32::try_from(date.ordinal0() / 7).unwrap()),
            year: Some(date.year()),
            latitude: 40.7,
            longitude: -73.9,
            incident_address: format!("{index} TEST AVENUE"),
        }
    }
}
