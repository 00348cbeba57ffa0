//! Pasted grid input
//!
//! Spreadsheet paste arrives as tab-separated lines in fixed column order:
//! `receipt_no, receipt_date, shift_day, total, tax, gross, type,
//! sale_channel` (trailing columns may be omitted). Blank lines are
//! skipped; a leading header row is detected and skipped.

use crate::domain::{RawReceiptRecord, RecordSource};

/// Parses pasted tab-separated text into raw records.
pub fn parse_grid(text: &str) -> Vec<RawReceiptRecord> {
    let mut records = Vec::new();
    let mut position = 0usize;

    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split('\t').map(str::trim).collect();

        // Header pasted along with the data
        if line_no == 0 && cells.first().map(|c| c.eq_ignore_ascii_case("receipt_no")) == Some(true)
        {
            continue;
        }

        let cell = |i: usize| -> Option<String> {
            cells
                .get(i)
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        };

        position += 1;
        records.push(RawReceiptRecord {
            source: Some(RecordSource::Pasted),
            position,
            receipt_no: cell(0),
            receipt_date: cell(1),
            shift_day: cell(2),
            total: cell(3),
            tax: cell(4),
            gross: cell(5),
            receipt_type: cell(6),
            sale_channel: cell(7),
        });
    }

    tracing::debug!(records = records.len(), "Parsed pasted grid");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_rows_in_order() {
        let text = "R-1\t20 Oct 2025 02:30 PM\t20 Oct 2025 09:00 AM\t100.00\t5.00\t\t0\n\
                    R-2\t21 Oct 2025 11:00 AM\t21 Oct 2025 09:00 AM\t50.00\t2.50\t52.50\t1\tOnline";

        let records = parse_grid(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].position, 1);
        assert_eq!(records[0].gross, None);
        assert_eq!(records[1].position, 2);
        assert_eq!(records[1].gross.as_deref(), Some("52.50"));
        assert_eq!(records[1].sale_channel.as_deref(), Some("Online"));
        assert_eq!(records[0].source, Some(RecordSource::Pasted));
    }

    #[test]
    fn test_skips_blank_lines() {
        let text = "\nR-1\ta\tb\t10\t0.5\t\t0\n\n";
        let records = parse_grid(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].position, 1);
    }

    #[test]
    fn test_skips_pasted_header_row() {
        let text = "receipt_no\treceipt_date\tshift_day\ttotal\ttax\tgross\ttype\n\
                    R-1\ta\tb\t10\t0.5\t\t0";
        let records = parse_grid(text);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].receipt_no.as_deref(), Some("R-1"));
    }

    #[test]
    fn test_short_rows_fill_none() {
        let records = parse_grid("R-1\tdate");
        assert_eq!(records[0].shift_day, None);
        assert_eq!(records[0].receipt_type, None);
    }
}
