//! Date-range and board filtering.

use bike_lane_request_models::{FilterCriteria, ServiceRequestRecord};

/// Whether `record` passes `criteria`: its date lies in the inclusive
/// range and, unless the board selection is `All`, its board name matches
/// exactly.
#[must_use]
pub fn matches(record: &ServiceRequestRecord, criteria: &FilterCriteria) -> bool {
    criteria.contains_date(record.date)
        && criteria
            .board
            .matches(record.community_board_name.as_deref())
}

/// Keeps the records that pass `criteria`, preserving input order.
///
/// Accepts any iterator of record references, so an already-filtered view
/// can be filtered again.
pub fn filter_records<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a ServiceRequestRecord>
where
    I: IntoIterator<Item = &'a ServiceRequestRecord>,
{
    records
        .into_iter()
        .filter(|record| matches(record, criteria))
        .collect()
}
