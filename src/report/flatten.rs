//! Flattens nested per-rack summaries into per-metric record tables.

use crate::hyperview::summary::DailySummaryPoint;
use crate::report::records::{FlatRecord, RackSummaries};

/// Converts per-rack summaries into flat (temperature, humidity) tables.
///
/// Pure reshape: one [`FlatRecord`] per (rack, day) summary point, in rack
/// order then point order. Duplicate dates coming back from the summary API
/// stay duplicated; no values are rounded here.
pub fn flatten(summaries: &[RackSummaries]) -> (Vec<FlatRecord>, Vec<FlatRecord>) {
    let temperature = flatten_metric(summaries, |rack| &rack.temperature);
    let humidity = flatten_metric(summaries, |rack| &rack.humidity);
    (temperature, humidity)
}

fn flatten_metric<'a>(
    summaries: &'a [RackSummaries],
    points_of: impl Fn(&'a RackSummaries) -> &'a Vec<DailySummaryPoint>,
) -> Vec<FlatRecord> {
    let mut records = Vec::new();
    for rack in summaries {
        for point in points_of(rack) {
            records.push(FlatRecord {
                rack: rack.rack.clone(),
                date: point.date,
                average: point.average,
                maximum: point.maximum,
                minimum: point.minimum,
                last: point.last,
            });
        }
    }
    records
}
