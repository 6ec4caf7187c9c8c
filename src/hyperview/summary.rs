//! Daily summary wire types and the timestamp-to-date extraction.

use crate::hyperview::error::HyperviewError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

/// One container from the last-7-days numeric summary endpoint.
///
/// The endpoint answers with a list of these; each holds the daily data
/// points for one sensor. Since the job queries one sensor id at a time the
/// list usually has a single element, but nothing here relies on that.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryContainer {
    #[serde(default)]
    pub sensor_data_points: Vec<SummaryDataPoint>,
}

/// One pre-aggregated daily statistic as it appears on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryDataPoint {
    /// ISO timestamp marking the day this point summarizes.
    #[serde(rename = "r")]
    pub timestamp: String,
    #[serde(rename = "avg")]
    pub average: f64,
    #[serde(rename = "max")]
    pub maximum: f64,
    #[serde(rename = "min")]
    pub minimum: f64,
    #[serde(rename = "lst")]
    pub last: f64,
}

/// A daily summary statistic with the timestamp resolved to a calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummaryPoint {
    pub date: NaiveDate,
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
    pub last: f64,
}

/// Extracts the calendar date from an ISO timestamp.
///
/// The date is the timestamp's own local date component; an offset, if
/// present, is kept rather than converted away. Accepts RFC 3339 timestamps
/// (with or without fractional seconds), naive timestamps, and bare dates.
pub fn extract_date(timestamp: &str) -> Result<NaiveDate, HyperviewError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }
    NaiveDate::parse_from_str(timestamp, "%Y-%m-%d").map_err(|e| HyperviewError::Timestamp {
        value: timestamp.to_string(),
        source: e,
    })
}

/// Flattens summary containers into one sequence of daily points.
///
/// Point order follows container order, then point order within a container.
pub(crate) fn into_points(
    containers: Vec<SummaryContainer>,
) -> Result<Vec<DailySummaryPoint>, HyperviewError> {
    let mut points = Vec::new();
    for container in containers {
        for point in container.sensor_data_points {
            points.push(DailySummaryPoint {
                date: extract_date(&point.timestamp)?,
                average: point.average,
                maximum: point.maximum,
                minimum: point.minimum,
                last: point.last,
            });
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_date_handles_utc_offsets_and_fractions() {
        let cases = [
            ("2024-05-01T13:45:00Z", (2024, 5, 1)),
            ("2024-05-01T13:45:00+02:00", (2024, 5, 1)),
            // Local date component is kept; no conversion to UTC.
            ("2024-05-01T22:30:00-05:00", (2024, 5, 1)),
            ("2024-05-01T00:00:00.1234567Z", (2024, 5, 1)),
            ("2024-05-01T13:45:00", (2024, 5, 1)),
            ("2024-05-01T13:45:00.25", (2024, 5, 1)),
            ("2024-05-01", (2024, 5, 1)),
        ];
        for (input, (y, m, d)) in cases {
            let expected = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(extract_date(input).unwrap(), expected, "input {input}");
        }
    }

    #[test]
    fn extract_date_is_idempotent_under_reparsing() {
        for input in [
            "2024-12-31T23:59:59Z",
            "2024-12-31T23:59:59.999+11:00",
            "2024-02-29T08:00:00",
        ] {
            let date = extract_date(input).unwrap();
            let formatted = date.format("%Y-%m-%d").to_string();
            assert_eq!(extract_date(&formatted).unwrap(), date);
        }
    }

    #[test]
    fn extract_date_rejects_garbage() {
        assert!(extract_date("not a timestamp").is_err());
        assert!(extract_date("").is_err());
    }

    #[test]
    fn decodes_summary_json_and_flattens_containers() {
        let body = r#"[
            {
                "sensorId": "4f1c2b1e-0001-0001-0001-000000000001",
                "sensorDataPoints": [
                    {"r": "2024-05-01T00:00:00Z", "avg": 21.5, "max": 23.0, "min": 20.25, "lst": 22.0},
                    {"r": "2024-05-02T00:00:00Z", "avg": 21.9, "max": 23.5, "min": 20.5, "lst": 21.75}
                ]
            },
            {
                "sensorDataPoints": [
                    {"r": "2024-05-03T00:00:00Z", "avg": 22.0, "max": 24.0, "min": 21.0, "lst": 23.0}
                ]
            }
        ]"#;
        let containers: Vec<SummaryContainer> = serde_json::from_str(body).unwrap();
        let points = into_points(containers).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(points[0].average, 21.5);
        assert_eq!(points[2].last, 23.0);
    }

    #[test]
    fn container_without_points_field_decodes_to_empty() {
        let containers: Vec<SummaryContainer> =
            serde_json::from_str(r#"[{"sensorId": "abc"}]"#).unwrap();
        assert!(into_points(containers).unwrap().is_empty());
    }

    #[test]
    fn bad_timestamp_in_point_is_an_error() {
        let containers: Vec<SummaryContainer> = serde_json::from_str(
            r#"[{"sensorDataPoints": [{"r": "yesterday", "avg": 1.0, "max": 1.0, "min": 1.0, "lst": 1.0}]}]"#,
        )
        .unwrap();
        assert!(matches!(
            into_points(containers),
            Err(HyperviewError::Timestamp { .. })
        ));
    }
}
