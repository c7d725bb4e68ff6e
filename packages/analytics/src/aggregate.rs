//! Weekly totals per year for the resolution distribution chart.
//!
//! Requests are grouped by `(week bin, year)` and their counts summed.
//! Week bins a year has no data for are left out of that year's line
//! rather than filled with zero, so they plot as gaps.

use std::collections::{BTreeMap, BTreeSet};

use bike_lane_analytics_models::{
    ChartView, LineStyle, SeriesByYear, SeriesPoint, YearSeries,
};
use bike_lane_request_models::{BoardSelection, ServiceRequestRecord};

/// Line colors, assigned to years in ascending order and cycled past the
/// fifth year.
pub const CHART_PALETTE: [&str; 5] = ["#ff7f0e", "#1f77b4", "#2ca02c", "#d62728", "#9467bd"];

/// X-axis label of the chart.
pub const CHART_X_LABEL: &str = "WeekBin (0=beginning of year)";

/// Legend heading of the chart.
pub const CHART_LEGEND_TITLE: &str = "Year";

/// Groups records by `(week bin, year)` and sums their counts.
///
/// Records missing either key are left out of the chart. The most recent
/// year is drawn solid and all earlier years dashed.
pub fn aggregate<'a, I>(records: I) -> SeriesByYear
where
    I: IntoIterator<Item = &'a ServiceRequestRecord>,
{
    let mut totals: BTreeMap<i32, BTreeMap<i32, u64>> = BTreeMap::new();
    let mut week_bins = BTreeSet::new();

    for record in records {
        let (Some(year), Some(week_bin)) = (record.year, record.week_bin) else {
            continue;
        };
        *totals
            .entry(year)
            .or_default()
            .entry(week_bin)
            .or_default() += u64::from(record.index);
        week_bins.insert(week_bin);
    }

    let latest_year = totals.keys().next_back().copied();

    let series = totals
        .into_iter()
        .enumerate()
        .map(|(i, (year, bins))| YearSeries {
            year,
            color: CHART_PALETTE[i % CHART_PALETTE.len()].to_string(),
            line_style: if Some(year) == latest_year {
                LineStyle::Solid
            } else {
                LineStyle::Dashed
            },
            points: bins
                .into_iter()
                .map(|(week_bin, total)| SeriesPoint { week_bin, total })
                .collect(),
        })
        .collect();

    SeriesByYear {
        week_bins: week_bins.into_iter().collect(),
        series,
    }
}

/// Builds the titled chart for the current board selection.
pub fn build_chart<'a, I>(records: I, board: &BoardSelection) -> ChartView
where
    I: IntoIterator<Item = &'a ServiceRequestRecord>,
{
    ChartView {
        title: format!("Resolution Distribution for {board}"),
        x_label: CHART_X_LABEL.to_string(),
        legend_title: CHART_LEGEND_TITLE.to_string(),
        data: aggregate(records),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn with_bin(date: &str, week_bin: i32, index: u32) -> ServiceRequestRecord {
        ServiceRequestRecord {
            week_bin: Some(week_bin),
            ..record(date, Some("B1"), index, 15.0)
        }
    }

    #[test]
    fn sums_index_per_week_and_year() {
        let records = vec![
            with_bin("2023-01-02", 0, 3),
            with_bin("2023-01-03", 0, 4),
            with_bin("2023-01-10", 1, 5),
            with_bin("2022-01-04", 0, 7),
        ];
        let by_year = aggregate(&records);

        let y2023 = by_year.year(2023).unwrap();
        assert_eq!(
            y2023.points,
            vec![
                SeriesPoint {
                    week_bin: 0,
                    total: 7
                },
                SeriesPoint {
                    week_bin: 1,
                    total: 5
                },
            ]
        );
        let y2022 = by_year.year(2022).unwrap();
        assert_eq!(y2022.points, vec![SeriesPoint { week_bin: 0, total: 7 }]);
    }

    #[test]
    fn total_per_year_matches_record_sum() {
        let records = vec![
            with_bin("2021-03-01", 8, 11),
            with_bin("2022-03-01", 8, 2),
            with_bin("2022-05-01", 17, 9),
            with_bin("2023-03-01", 8, 1),
            with_bin("2023-03-02", 8, 0),
            with_bin("2023-11-01", 43, 30),
        ];
        let by_year = aggregate(&records);

        for year in [2021, 2022, 2023] {
            let expected: u64 = records
                .iter()
                .filter(|r| r.year == Some(year))
                .map(|r| u64::from(r.index))
                .sum();
            assert_eq!(by_year.year(year).unwrap().total(), expected);
        }
    }

    #[test]
    fn domain_is_sorted_union_with_gaps() {
        let records = vec![
            with_bin("2023-05-01", 17, 1),
            with_bin("2022-01-01", 0, 1),
            with_bin("2023-01-01", 0, 1),
            with_bin("2022-03-01", 8, 1),
        ];
        let by_year = aggregate(&records);
        assert_eq!(by_year.week_bins, vec![0, 8, 17]);

        let y2022 = by_year.year(2022).unwrap();
        assert_eq!(y2022.values_on(&by_year.week_bins), vec![Some(1), Some(1), None]);
        let y2023 = by_year.year(2023).unwrap();
        assert_eq!(y2023.values_on(&by_year.week_bins), vec![Some(1), None, Some(1)]);
    }

    #[test]
    fn latest_year_is_solid() {
        let records = vec![
            with_bin("2023-01-01", 0, 1),
            with_bin("2021-01-01", 0, 1),
            with_bin("2022-01-01", 0, 1),
        ];
        let styles: Vec<(i32, LineStyle)> = aggregate(&records)
            .series
            .iter()
            .map(|s| (s.year, s.line_style))
            .collect();
        assert_eq!(
            styles,
            vec![
                (2021, LineStyle::Dashed),
                (2022, LineStyle::Dashed),
                (2023, LineStyle::Solid),
            ]
        );
    }

    #[test]
    fn palette_follows_year_order_and_cycles() {
        let records: Vec<ServiceRequestRecord> = (2017..=2023)
            .map(|year| with_bin(&format!("{year}-01-01"), 0, 1))
            .collect();
        let colors: Vec<String> = aggregate(&records)
            .series
            .into_iter()
            .map(|s| s.color)
            .collect();
        assert_eq!(
            colors,
            vec![
                "#ff7f0e", "#1f77b4", "#2ca02c", "#d62728", "#9467bd", "#ff7f0e", "#1f77b4",
            ]
        );
    }

    #[test]
    fn records_without_bin_or_year_are_skipped() {
        let records = vec![
            with_bin("2023-01-02", 0, 3),
            ServiceRequestRecord {
                week_bin: None,
                ..record("2023-01-03", Some("B1"), 4, 15.0)
            },
            ServiceRequestRecord {
                year: None,
                ..with_bin("2023-01-10", 1, 5)
            },
        ];
        let by_year = aggregate(&records);

        assert_eq!(by_year.week_bins, vec![0]);
        assert_eq!(by_year.series.len(), 1);
        assert_eq!(by_year.year(2023).unwrap().total(), 3);
    }

    #[test]
    fn empty_input_has_no_series() {
        let by_year = aggregate(std::iter::empty());
        assert!(by_year.is_empty());
        assert!(by_year.week_bins.is_empty());
    }

    #[test]
    fn chart_title_names_board() {
        let records = vec![with_bin("2023-01-01", 0, 1)];
        let chart = build_chart(&records, &BoardSelection::All);
        assert_eq!(chart.title, "Resolution Distribution for All");
        assert_eq!(chart.x_label, "WeekBin (0=beginning of year)");

        let chart = build_chart(&records, &BoardSelection::Board("Queens 7".to_string()));
        assert_eq!(chart.title, "Resolution Distribution for Queens 7");
    }
}
