//! Assembles a complete dashboard view for one set of filter criteria.

use bike_lane_analytics_models::{TablePreview, ViewModel};
use bike_lane_dataset::DashboardContext;
use bike_lane_request_models::FilterCriteria;

use crate::aggregate::build_chart;
use crate::filter::filter_records;
use crate::markers::map_view;

/// Number of filtered rows shown in the summary table.
pub const TABLE_PREVIEW_ROWS: usize = 25;

/// Renders the dashboard for `criteria`.
///
/// Filters once, then derives the chart, table preview and map from the
/// same filtered view. Nothing is cached; call again whenever the
/// criteria change. `criteria.min_entries` is echoed back but does not
/// affect any view.
#[must_use]
pub fn render(context: &DashboardContext, criteria: &FilterCriteria) -> ViewModel {
    let filtered = filter_records(context.records(), criteria);

    log::debug!(
        "Rendering {} of {} requests for {} to {} (board: {}, min entries: {})",
        filtered.len(),
        context.records().len(),
        criteria.start_date,
        criteria.end_date,
        criteria.board,
        criteria.min_entries,
    );

    let table = TablePreview {
        rows: filtered
            .iter()
            .take(TABLE_PREVIEW_ROWS)
            .map(|r| (*r).clone())
            .collect(),
        total_rows: filtered.len(),
    };

    ViewModel {
        criteria: criteria.clone(),
        board_options: context.board_options(),
        chart: build_chart(filtered.iter().copied(), &criteria.board),
        table,
        map: map_view(&filtered, &criteria.board, context.boundaries()),
    }
}
