//! The record shapes the reshaping pipeline works on, and the two naming
//! contracts (rack segment, row code) derived from PDU display names.

use crate::hyperview::summary::DailySummaryPoint;
use crate::report::error::ReportError;
use chrono::NaiveDate;
use std::fmt;

/// Which of the two reported metrics a table belongs to.
///
/// The kind owns its spreadsheet sheet names, so callers never assemble
/// sheet titles by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Temperature,
    Humidity,
}

impl MetricKind {
    /// Sheet name for the per-rack daily table.
    pub fn data_sheet_name(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "Temperature Data",
            MetricKind::Humidity => "Humidity Data",
        }
    }

    /// Sheet name for the per-row weekly aggregate table.
    pub fn weekly_sheet_name(&self) -> &'static str {
        match self {
            MetricKind::Temperature => "Temperature Row Weekly Averages",
            MetricKind::Humidity => "Humidity Row Weekly Averages",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricKind::Temperature => write!(f, "temperature"),
            MetricKind::Humidity => write!(f, "humidity"),
        }
    }
}

/// One rack's fetched summaries for both metrics.
///
/// `rack` is the already-extracted rack name (the second hyphen-separated
/// segment of the PDU display name), not the raw PDU name.
#[derive(Debug, Clone, PartialEq)]
pub struct RackSummaries {
    pub rack: String,
    pub temperature: Vec<DailySummaryPoint>,
    pub humidity: Vec<DailySummaryPoint>,
}

/// One (rack, day) daily record in a per-metric flat table.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRecord {
    pub rack: String,
    pub date: NaiveDate,
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
    pub last: f64,
}

/// One row's weekly aggregate for one metric.
///
/// `start_date`/`end_date` are the global observed window across all of the
/// metric's flat records, shared by every row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowAggregate {
    pub row: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub average: f64,
    pub maximum: f64,
    pub minimum: f64,
}

/// Extracts the rack name from a PDU display name.
///
/// PDU names follow a positional hyphen format; the rack name is the second
/// segment: `"DC-A01-L"` → `"A01"`. A name without a non-empty second
/// segment violates the naming contract and is an error, never a guess.
pub fn extract_rack_name(pdu_name: &str) -> Result<String, ReportError> {
    let mut segments = pdu_name.split('-');
    segments.next();
    match segments.next() {
        Some(rack) if !rack.is_empty() => Ok(rack.to_string()),
        _ => Err(ReportError::PduNameFormat(pdu_name.to_string())),
    }
}

/// Derives the two-character row code from a rack name.
///
/// Rack names end in a two-character row code by naming convention
/// (`"A01"` → `"01"`). Shorter names violate that contract and are an
/// error rather than a silent truncation.
pub fn row_code(rack: &str) -> Result<String, ReportError> {
    let chars: Vec<char> = rack.chars().collect();
    if chars.len() < 2 {
        return Err(ReportError::RackNameTooShort(rack.to_string()));
    }
    Ok(chars[chars.len() - 2..].iter().collect())
}
