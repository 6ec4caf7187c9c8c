//! Weekly data-center rack sensor reporting.
//!
//! One batch run fetches each configured rack's sensor catalog from a
//! Hyperview-style monitoring API, pulls the last-7-days daily temperature
//! and humidity summaries for the rack's two sensors, reshapes them into
//! flat daily tables plus per-row weekly averages, writes a four-sheet xlsx
//! workbook, and emails it to the configured recipient.
//!
//! The usual entry point is [`ReportPipeline::run`]; the individual stages
//! (catalog extraction, flattening, aggregation, export) are exposed for
//! reuse and testing.

mod config;
mod error;
mod export;
mod hyperview;
mod notify;
mod pipeline;
mod report;

pub use error::RackReportError;

pub use config::{
    load_config, ApiConfig, ConfigError, EmailConfig, FailurePolicy, ReportConfig, ReportOptions,
    CLIENT_ID_ENV, CLIENT_SECRET_ENV,
};

pub use hyperview::catalog::{
    extract_sensor_pair, SensorDescriptor, SensorPair, SensorTypeIds, HUMIDITY_SENSOR_TYPE_ID,
    TEMPERATURE_SENSOR_TYPE_ID,
};
pub use hyperview::summary::{extract_date, DailySummaryPoint};
pub use hyperview::{HyperviewClient, HyperviewError};

pub use report::aggregate::{aggregate, round2, round_records};
pub use report::flatten::flatten;
pub use report::records::{
    extract_rack_name, row_code, FlatRecord, MetricKind, RackSummaries, RowAggregate,
};
pub use report::ReportError;

pub use export::{write_workbook, ExportError, ReportTables};
pub use notify::{report_subject, send_report, NotifyError};
pub use pipeline::{ReportOutcome, ReportPipeline};
