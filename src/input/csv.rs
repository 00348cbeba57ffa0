//! CSV batch input
//!
//! Header-mapped CSV decoding into raw records. Column names are matched
//! case-insensitively; `gross` and `sale_channel` are optional. Record
//! positions are 1-based over data rows, matching what operators see in
//! their spreadsheet after the header.

use crate::domain::{RawReceiptRecord, RecordSource, RelayError, Result};
use std::collections::HashMap;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 6] = [
    "receipt_no",
    "receipt_date",
    "shift_day",
    "total",
    "tax",
    "type",
];

/// Reads a CSV batch file into raw records.
///
/// # Errors
///
/// Returns [`RelayError::Io`] when the file cannot be opened and
/// [`RelayError::Serialization`] for format problems; a missing required
/// column is reported up front rather than per row.
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<RawReceiptRecord>> {
    let mut reader = csv::Reader::from_path(path.as_ref())
        .map_err(|e| RelayError::Io(format!("failed to open CSV: {e}")))?;

    let headers = reader
        .headers()
        .map_err(|e| RelayError::Serialization(format!("failed to read CSV header: {e}")))?
        .clone();

    let column_index: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.trim().to_lowercase(), i))
        .collect();

    for column in REQUIRED_COLUMNS {
        if !column_index.contains_key(column) {
            return Err(RelayError::Serialization(format!(
                "CSV is missing required column `{column}`"
            )));
        }
    }

    let field = |row: &csv::StringRecord, name: &str| -> Option<String> {
        column_index
            .get(name)
            .and_then(|&i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row =
            row.map_err(|e| RelayError::Serialization(format!("bad CSV row {}: {e}", i + 1)))?;

        records.push(RawReceiptRecord {
            source: Some(RecordSource::Csv),
            position: i + 1,
            receipt_no: field(&row, "receipt_no"),
            receipt_date: field(&row, "receipt_date"),
            shift_day: field(&row, "shift_day"),
            total: field(&row, "total"),
            tax: field(&row, "tax"),
            gross: field(&row, "gross"),
            receipt_type: field(&row, "type"),
            sale_channel: field(&row, "sale_channel"),
        });
    }

    tracing::debug!(records = records.len(), "Read CSV batch");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_reads_header_mapped_rows() {
        let file = write_csv(
            "receipt_no,receipt_date,shift_day,total,tax,gross,type,sale_channel\n\
             R-1,20 Oct 2025 02:30 PM,20 Oct 2025 09:00 AM,100.00,5.00,,0,\n\
             R-2,21 Oct 2025 11:00 AM,21 Oct 2025 09:00 AM,\"1,250.75\",62.50,1313.25,1,Online\n",
        );

        let records = read_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, 1);
        assert_eq!(records[0].receipt_no.as_deref(), Some("R-1"));
        assert_eq!(records[0].gross, None);
        assert_eq!(records[1].total.as_deref(), Some("1,250.75"));
        assert_eq!(records[1].sale_channel.as_deref(), Some("Online"));
        assert_eq!(records[1].source, Some(RecordSource::Csv));
    }

    #[test]
    fn test_header_case_insensitive() {
        let file = write_csv(
            "Receipt_No,RECEIPT_DATE,Shift_Day,Total,Tax,Type\n\
             R-1,20 Oct 2025 02:30 PM,20 Oct 2025 09:00 AM,10,0.5,0\n",
        );
        let records = read_records(file.path()).unwrap();
        assert_eq!(records[0].receipt_no.as_deref(), Some("R-1"));
    }

    #[test]
    fn test_missing_column_reported_up_front() {
        let file = write_csv("receipt_no,total,tax,type\nR-1,10,0.5,0\n");
        let err = read_records(file.path()).unwrap_err();
        assert!(err.to_string().contains("receipt_date"));
    }

    #[test]
    fn test_blank_cells_become_none() {
        let file = write_csv(
            "receipt_no,receipt_date,shift_day,total,tax,type\n\
             ,20 Oct 2025 02:30 PM,20 Oct 2025 09:00 AM,10,0.5,0\n",
        );
        let records = read_records(file.path()).unwrap();
        assert_eq!(records[0].receipt_no, None);
    }
}
