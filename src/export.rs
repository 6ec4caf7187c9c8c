//! Spreadsheet export: four sheets, daily and weekly per metric.

use crate::report::records::{FlatRecord, MetricKind, RowAggregate};
use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to lay out sheet '{sheet}'")]
    Sheet {
        sheet: &'static str,
        #[source]
        source: XlsxError,
    },

    #[error("failed to write workbook '{0}'")]
    Workbook(PathBuf, #[source] XlsxError),
}

/// The four tables that make up one report workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTables {
    pub temperature_daily: Vec<FlatRecord>,
    pub temperature_weekly: Vec<RowAggregate>,
    pub humidity_daily: Vec<FlatRecord>,
    pub humidity_weekly: Vec<RowAggregate>,
}

/// Writes the report workbook to `path`.
///
/// Sheet order matches the original report: temperature daily, temperature
/// weekly, humidity daily, humidity weekly. Dates are rendered as
/// `YYYY-MM-DD` strings; numeric cells are written as-is (the pipeline
/// rounds them before export).
pub fn write_workbook(path: &Path, tables: &ReportTables) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    for kind in [MetricKind::Temperature, MetricKind::Humidity] {
        let (daily, weekly) = match kind {
            MetricKind::Temperature => (&tables.temperature_daily, &tables.temperature_weekly),
            MetricKind::Humidity => (&tables.humidity_daily, &tables.humidity_weekly),
        };

        let sheet = workbook.add_worksheet();
        write_daily_sheet(sheet, kind, daily, &header).map_err(|e| ExportError::Sheet {
            sheet: kind.data_sheet_name(),
            source: e,
        })?;

        let sheet = workbook.add_worksheet();
        write_weekly_sheet(sheet, kind, weekly, &header).map_err(|e| ExportError::Sheet {
            sheet: kind.weekly_sheet_name(),
            source: e,
        })?;
    }

    workbook
        .save(path)
        .map_err(|e| ExportError::Workbook(path.to_path_buf(), e))?;
    Ok(())
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn write_daily_sheet(
    sheet: &mut Worksheet,
    kind: MetricKind,
    records: &[FlatRecord],
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(kind.data_sheet_name())?;
    for (col, title) in ["Rack", "Date", "Average", "Maximum", "Minimum", "Last"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    for (i, record) in records.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, record.rack.as_str())?;
        sheet.write_string(row, 1, format_date(record.date))?;
        sheet.write_number(row, 2, record.average)?;
        sheet.write_number(row, 3, record.maximum)?;
        sheet.write_number(row, 4, record.minimum)?;
        sheet.write_number(row, 5, record.last)?;
    }
    Ok(())
}

fn write_weekly_sheet(
    sheet: &mut Worksheet,
    kind: MetricKind,
    aggregates: &[RowAggregate],
    header: &Format,
) -> Result<(), XlsxError> {
    sheet.set_name(kind.weekly_sheet_name())?;
    for (col, title) in ["Row", "Start Date", "End Date", "Average", "Maximum", "Minimum"]
        .iter()
        .enumerate()
    {
        sheet.write_string_with_format(0, col as u16, *title, header)?;
    }
    for (i, aggregate) in aggregates.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, aggregate.row.as_str())?;
        sheet.write_string(row, 1, format_date(aggregate.start_date))?;
        sheet.write_string(row, 2, format_date(aggregate.end_date))?;
        sheet.write_number(row, 3, aggregate.average)?;
        sheet.write_number(row, 4, aggregate.maximum)?;
        sheet.write_number(row, 5, aggregate.minimum)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample_tables() -> ReportTables {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = FlatRecord {
            rack: "A01".to_string(),
            date,
            average: 21.46,
            maximum: 23.0,
            minimum: 20.25,
            last: 22.0,
        };
        let aggregate = RowAggregate {
            row: "01".to_string(),
            start_date: date,
            end_date: NaiveDate::from_ymd_opt(2024, 5, 7).unwrap(),
            average: 21.46,
            maximum: 23.0,
            minimum: 20.25,
        };
        ReportTables {
            temperature_daily: vec![record.clone()],
            temperature_weekly: vec![aggregate.clone()],
            humidity_daily: vec![record],
            humidity_weekly: vec![aggregate],
        }
    }

    #[test]
    fn dates_render_iso_formatted() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(format_date(date), "2024-05-01");
    }

    #[test]
    fn writes_a_workbook_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        write_workbook(&path, &sample_tables()).unwrap();
        let metadata = std::fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0);
    }

    #[test]
    fn empty_tables_still_produce_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let tables = ReportTables {
            temperature_daily: Vec::new(),
            temperature_weekly: Vec::new(),
            humidity_daily: Vec::new(),
            humidity_weekly: Vec::new(),
        };
        write_workbook(&path, &tables).unwrap();
        assert!(path.exists());
    }
}
