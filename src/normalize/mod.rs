// src/normalize/mod.rs

//! CSV normalization for station exports.
//!
//! The portal's exports differ in delimiter, decimal format, date format and
//! column names. This module infers the layout of a table and turns its rows
//! into [`Record`]s:
//!
//! - `delimiter`: `;` vs `,` detection from the header line
//! - `columns`: date/value column resolution by header name
//! - `number`: decimal-comma aware value parsing
//! - `date`: day-first timestamp parsing
//!
//! Malformed input never produces an error. Rows without a readable date are
//! dropped, unreadable values become `null`.

mod columns;
mod date;
mod delimiter;
mod number;

use serde_json::Value;

use crate::models::{RawRow, Record};

pub use columns::ColumnMapping;
pub use date::parse_date;
pub use delimiter::Delimiter;
pub use number::parse_number;

/// Normalize a raw export into records sorted ascending by time.
///
/// Rows sharing a timestamp keep their order from the export.
pub fn normalize_table(text: &str) -> Vec<Record> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some(first_line) = lines.first() else {
        return Vec::new();
    };
    let delimiter = Delimiter::detect(first_line);

    let table = lines.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .from_reader(table.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(headers) => headers.iter().map(str::to_string).collect(),
        Err(e) => {
            log::debug!("Unreadable header line: {}", e);
            return Vec::new();
        }
    };

    let columns = ColumnMapping::resolve(&headers);
    if !columns.is_resolved() {
        return Vec::new();
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                log::debug!("Skipping unreadable row: {}", e);
                dropped += 1;
                continue;
            }
        };

        let raw_row = build_raw_row(&headers, &row);
        let raw_date = cell_text(&raw_row, columns.date.as_deref());
        let Some(time) = parse_date(&raw_date) else {
            dropped += 1;
            continue;
        };

        let raw_value = cell_text(&raw_row, columns.value.as_deref());
        records.push(Record {
            time,
            value: parse_number(&raw_value),
            raw_value,
            raw_row,
        });
    }

    if dropped > 0 {
        log::debug!(
            "Dropped {} of {} rows without a readable date",
            dropped,
            dropped + records.len()
        );
    }

    // `sort_by_key` is stable, equal timestamps keep export order.
    records.sort_by_key(|record| record.time);
    records
}

/// Map header names to the row's cells; missing trailing cells become `null`.
///
/// A repeated header name keeps its first position and its last cell.
fn build_raw_row(headers: &[String], row: &csv::StringRecord) -> RawRow {
    let mut raw_row = RawRow::new();
    for (index, header) in headers.iter().enumerate() {
        let cell = row
            .get(index)
            .map_or(Value::Null, |cell| Value::String(cell.to_string()));
        raw_row.insert(header.clone(), cell);
    }
    raw_row
}

/// Trimmed text of a resolved column, empty when absent.
fn cell_text(raw_row: &RawRow, column: Option<&str>) -> String {
    column
        .and_then(|name| raw_row.get(name))
        .and_then(Value::as_str)
        .map(|cell| cell.trim().to_string())
        .unwrap_or_default()
}
