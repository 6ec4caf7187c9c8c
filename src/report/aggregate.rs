//! Weekly per-row aggregation of flat daily records.

use crate::report::error::ReportError;
use crate::report::records::{row_code, FlatRecord, RowAggregate};
use std::collections::BTreeMap;

/// Rounds to two decimal places, ties away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds the numeric fields of daily records in place.
///
/// Applied after flattening, never before aggregation input is consumed:
/// weekly means are computed from the unrounded values and rounded on their
/// own at the end of [`aggregate`].
pub fn round_records(records: &mut [FlatRecord]) {
    for record in records {
        record.average = round2(record.average);
        record.maximum = round2(record.maximum);
        record.minimum = round2(record.minimum);
        record.last = round2(record.last);
    }
}

/// Aggregates one metric's flat records into per-row weekly means.
///
/// Every record's row is the last two characters of its rack name. The
/// start/end dates are the global minimum/maximum date across all records,
/// so every row shares the same observed window. Within each row, `average`,
/// `maximum` and `minimum` are arithmetic means of the daily values (`last`
/// is excluded), rounded to two decimals post-aggregation. Rows come out in
/// ascending row-code order, each exactly once. No records, no aggregates.
///
/// # Errors
///
/// [`ReportError::RackNameTooShort`] if any record's rack name cannot carry
/// a two-character row code.
pub fn aggregate(records: &[FlatRecord]) -> Result<Vec<RowAggregate>, ReportError> {
    let Some(first) = records.first() else {
        return Ok(Vec::new());
    };

    let mut start_date = first.date;
    let mut end_date = first.date;
    for record in records {
        start_date = start_date.min(record.date);
        end_date = end_date.max(record.date);
    }

    #[derive(Default)]
    struct RowSums {
        count: usize,
        average: f64,
        maximum: f64,
        minimum: f64,
    }

    let mut groups: BTreeMap<String, RowSums> = BTreeMap::new();
    for record in records {
        let row = row_code(&record.rack)?;
        let sums = groups.entry(row).or_default();
        sums.count += 1;
        sums.average += record.average;
        sums.maximum += record.maximum;
        sums.minimum += record.minimum;
    }

    Ok(groups
        .into_iter()
        .map(|(row, sums)| {
            let n = sums.count as f64;
            RowAggregate {
                row,
                start_date,
                end_date,
                average: round2(sums.average / n),
                maximum: round2(sums.maximum / n),
                minimum: round2(sums.minimum / n),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(rack: &str, day: u32, average: f64) -> FlatRecord {
        FlatRecord {
            rack: rack.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            average,
            maximum: average + 2.0,
            minimum: average - 2.0,
            last: average + 0.5,
        }
    }

    #[test]
    fn rounds_to_two_decimals_away_from_zero() {
        assert_eq!(round2(21.4567), 21.46);
        assert_eq!(round2(21.454), 21.45);
        assert_eq!(round2(2.005), 2.01);
        assert_eq!(round2(-2.005), -2.01);
        assert_eq!(round2(20.0), 20.0);
    }

    #[test]
    fn round_records_touches_all_numeric_fields() {
        let mut records = vec![record("A01", 1, 21.4567)];
        records[0].last = 9.8765;
        round_records(&mut records);
        assert_eq!(records[0].average, 21.46);
        assert_eq!(records[0].maximum, 23.46);
        assert_eq!(records[0].minimum, 19.46);
        assert_eq!(records[0].last, 9.88);
    }

    #[test]
    fn single_record_rows_aggregate_to_their_own_values() {
        // One record per row code: the weekly mean must equal the record.
        let records: Vec<FlatRecord> = (1..=99)
            .map(|i| record(&format!("A{i:02}"), 1, 20.0 + i as f64 / 100.0))
            .collect();
        let aggregates = aggregate(&records).unwrap();
        assert_eq!(aggregates.len(), 99);
        for (i, agg) in aggregates.iter().enumerate() {
            let expected = round2(20.0 + (i + 1) as f64 / 100.0);
            assert_eq!(agg.row, format!("{:02}", i + 1));
            assert_eq!(agg.average, expected);
        }
    }

    #[test]
    fn date_window_is_global_across_rows() {
        // Two rows with disjoint date ranges share one overall window.
        let records = vec![
            record("A01", 1, 20.0),
            record("A01", 2, 20.0),
            record("B09", 6, 24.0),
            record("B09", 7, 24.0),
        ];
        let aggregates = aggregate(&records).unwrap();
        assert_eq!(aggregates.len(), 2);
        for agg in &aggregates {
            assert_eq!(agg.start_date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
            assert_eq!(agg.end_date, NaiveDate::from_ymd_opt(2024, 5, 7).unwrap());
        }
    }

    #[test]
    fn racks_sharing_a_row_code_merge() {
        // "A01" and "B01" both end in "01" and so land in the same row.
        let records = vec![record("A01", 1, 20.111), record("B01", 1, 24.0)];
        let aggregates = aggregate(&records).unwrap();
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].row, "01");
        assert_eq!(aggregates[0].average, 22.06);
    }

    #[test]
    fn distinct_row_codes_do_not_merge() {
        let records = vec![record("A01", 1, 20.0), record("A02", 1, 24.0)];
        let aggregates = aggregate(&records).unwrap();
        let rows: Vec<&str> = aggregates.iter().map(|a| a.row.as_str()).collect();
        assert_eq!(rows, ["01", "02"]);
        assert_eq!(aggregates[0].average, 20.0);
        assert_eq!(aggregates[1].average, 24.0);
    }

    #[test]
    fn mean_excludes_the_last_value() {
        let mut a = record("A01", 1, 20.0);
        let mut b = record("A01", 2, 22.0);
        a.last = 1000.0;
        b.last = -1000.0;
        let aggregates = aggregate(&[a, b]).unwrap();
        assert_eq!(aggregates[0].average, 21.0);
        assert_eq!(aggregates[0].maximum, 23.0);
        assert_eq!(aggregates[0].minimum, 19.0);
    }

    #[test]
    fn empty_input_produces_no_aggregates() {
        assert!(aggregate(&[]).unwrap().is_empty());
    }

    #[test]
    fn short_rack_name_is_an_error() {
        let records = vec![record("7", 1, 20.0)];
        assert_eq!(
            aggregate(&records),
            Err(ReportError::RackNameTooShort("7".to_string()))
        );
    }
}
