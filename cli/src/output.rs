//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use db::{Record, Value};
use serde::Serialize;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

/// Message shown when a listing is empty.
pub const NO_RECORDS: &str = "No records found.";

/// Table cell for a field value. Lists are bracketed.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::List(items) => {
            let parts: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", parts.join(", "))
        }
        scalar => scalar.to_string(),
    }
}

/// One `field: value` line per field, indented by two spaces.
pub fn format_record(record: &Record) -> Vec<String> {
    record
        .iter()
        .map(|(field, value)| format!("  {}: {}", field, format_value(value)))
        .collect()
}

/// Column-aligned table of records.
///
/// Columns are the union of fields in first-seen order; missing values are
/// blank. Lines carry no trailing whitespace.
pub fn format_records(records: &[Record]) -> Vec<String> {
    if records.is_empty() {
        return vec![NO_RECORDS.to_string()];
    }

    let mut columns: Vec<&str> = Vec::new();
    for record in records {
        for field in record.keys() {
            if !columns.contains(&field.as_str()) {
                columns.push(field);
            }
        }
    }

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(*column).map(format_value).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain([column.chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(columns.clone())];
    for row in &rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use db::test_utils::load_store;
    use rstest::rstest;

    fn records(json: &str) -> Vec<Record> {
        let store = load_store(&format!(r#"{{"items": {json}}}"#));
        store.collection("items").unwrap().to_vec()
    }

    #[rstest]
    fn test_format_records_aligns_columns() {
        let lines = format_records(&records(
            r#"[{"id": 1, "title": "Lorem Ipsum", "views": 254}, {"id": 22, "title": "Sic"}]"#,
        ));
        assert_eq!(
            lines,
            vec![
                "id  title        views",
                "1   Lorem Ipsum  254",
                "22  Sic",
            ]
        );
    }

    #[rstest]
    fn test_format_records_empty() {
        assert_eq!(format_records(&[]), vec![NO_RECORDS]);
    }

    #[rstest]
    #[case(Value::List(vec![Value::Int(1), Value::from("a")]), "[1, a]")]
    #[case(Value::Float(1.5), "1.5")]
    #[case(Value::Bool(true), "true")]
    fn test_format_value(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(format_value(&value), expected);
    }

    #[rstest]
    fn test_format_record() {
        let record = &records(r#"[{"id": 1, "tags": ["a", "b"]}]"#)[0];
        assert_eq!(format_record(record), vec!["  id: 1", "  tags: [a, b]"]);
    }
}
