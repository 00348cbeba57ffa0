//! Receipt normalization
//!
//! Converts heterogeneous raw input records into [`CanonicalReceipt`] values.
//! Dates are serialized to the wire encoding here and never reparsed
//! downstream; amounts are cleaned of grouping separators and validated.
//! This stage is strict: the first malformed record rejects the batch before
//! any vendor call.

use crate::domain::{
    CanonicalReceipt, RawReceiptRecord, ReceiptType, Result, ValidationError, WireDate,
};
use chrono::{FixedOffset, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

/// Pattern for the human-readable input form, e.g. `20 Oct 2025 02:30 PM`.
const HUMAN_DATE_FORMAT: &str = "%d %b %Y %I:%M %p";

/// Sale channel used when the input leaves it blank.
pub const DEFAULT_SALE_CHANNEL: &str = "Instore";

/// Receipt normalizer.
///
/// Human-readable dates are interpreted in the portal's business timezone
/// (a fixed offset from configuration); wire-format dates pass through
/// verbatim.
pub struct Normalizer {
    timezone: FixedOffset,
}

impl Normalizer {
    /// Creates a normalizer for a business timezone.
    pub fn new(timezone: FixedOffset) -> Self {
        Self { timezone }
    }

    /// Normalizes one raw record into a canonical receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field and the
    /// record's 1-based batch position.
    pub fn normalize(&self, record: &RawReceiptRecord) -> Result<CanonicalReceipt> {
        let position = record.position;

        let receipt_no = required(record.receipt_no.as_deref(), position, "receipt_no")?;
        let receipt_date_raw = required(record.receipt_date.as_deref(), position, "receipt_date")?;
        let shift_day_raw = required(record.shift_day.as_deref(), position, "shift_day")?;
        let total_raw = required(record.total.as_deref(), position, "total")?;
        let tax_raw = required(record.tax.as_deref(), position, "tax")?;
        let type_raw = required(record.receipt_type.as_deref(), position, "type")?;

        let total = parse_amount(total_raw)
            .map_err(|e| ValidationError::new(position, "total", e))?;
        if total <= 0.0 {
            return Err(ValidationError::new(
                position,
                "total",
                format!("must be greater than zero, got {total}"),
            )
            .into());
        }

        let tax =
            parse_amount(tax_raw).map_err(|e| ValidationError::new(position, "tax", e))?;
        if tax < 0.0 {
            return Err(ValidationError::new(
                position,
                "tax",
                format!("must not be negative, got {tax}"),
            )
            .into());
        }

        let gross = match record.gross.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(raw) => {
                let gross =
                    parse_amount(raw).map_err(|e| ValidationError::new(position, "gross", e))?;
                if gross < 0.0 {
                    return Err(ValidationError::new(
                        position,
                        "gross",
                        format!("must not be negative, got {gross}"),
                    )
                    .into());
                }
                gross
            }
            // Derived gross is clamped at zero: negative gross is never emitted
            None => (total + tax).max(0.0),
        };

        let receipt_type = ReceiptType::from_input(type_raw)
            .map_err(|e| ValidationError::new(position, "type", e))?;

        let receipt_date = self
            .to_wire_date(receipt_date_raw)
            .map_err(|e| ValidationError::new(position, "receipt_date", e))?;
        let shift_day = self
            .to_wire_date(shift_day_raw)
            .map_err(|e| ValidationError::new(position, "shift_day", e))?;

        let sale_channel = record
            .sale_channel
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SALE_CHANNEL)
            .to_string();

        Ok(CanonicalReceipt {
            id: Uuid::new_v4(),
            receipt_no: receipt_no.trim().to_string(),
            receipt_date,
            shift_day,
            total,
            tax,
            gross,
            receipt_type,
            sale_channel,
        })
    }

    /// Normalizes a whole batch in order, failing on the first bad record.
    pub fn normalize_batch(&self, records: &[RawReceiptRecord]) -> Result<Vec<CanonicalReceipt>> {
        records.iter().map(|r| self.normalize(r)).collect()
    }

    /// Date conversion with wire passthrough.
    ///
    /// Wire-format values are detected first and passed through unchanged;
    /// feeding a wire string to the human-readable parser is undefined and
    /// must never happen. Human-readable values are interpreted in the
    /// business timezone and serialized to canonical wire form, which
    /// discards sub-minute precision (the format has none to begin with).
    fn to_wire_date(&self, raw: &str) -> std::result::Result<WireDate, String> {
        let raw = raw.trim();

        if WireDate::is_wire_format(raw) {
            return WireDate::parse(raw);
        }

        let naive = NaiveDateTime::parse_from_str(raw, HUMAN_DATE_FORMAT).map_err(|_| {
            format!("expected wire date or `{HUMAN_DATE_FORMAT}` (e.g. 20 Oct 2025 02:30 PM), got {raw:?}")
        })?;

        let local = self
            .timezone
            .from_local_datetime(&naive)
            .single()
            .ok_or_else(|| format!("ambiguous local datetime: {raw:?}"))?;

        Ok(WireDate::from_datetime(local.with_timezone(&Utc)))
    }
}

fn required<'a>(
    value: Option<&'a str>,
    position: usize,
    field: &str,
) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::new(position, field, "required field is missing").into()),
    }
}

/// Parses a decimal amount, stripping grouping separators first.
///
/// Keeps digits, the decimal point, and a leading minus; everything else
/// (thousands commas, spaces, currency marks) is formatting noise.
fn parse_amount(raw: &str) -> std::result::Result<f64, String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return Err(format!("not a number: {raw:?}"));
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| format!("not a number: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RecordSource, RelayError};
    use test_case::test_case;

    fn gulf() -> FixedOffset {
        FixedOffset::east_opt(4 * 3600).unwrap()
    }

    fn raw(position: usize) -> RawReceiptRecord {
        RawReceiptRecord {
            source: Some(RecordSource::Csv),
            position,
            receipt_no: Some("R-100".to_string()),
            receipt_date: Some("20 Oct 2025 02:30 PM".to_string()),
            shift_day: Some("20 Oct 2025 09:00 AM".to_string()),
            total: Some("100.00".to_string()),
            tax: Some("5.00".to_string()),
            gross: None,
            receipt_type: Some("0".to_string()),
            sale_channel: None,
        }
    }

    #[test]
    fn test_normalize_happy_path() {
        let receipt = Normalizer::new(gulf()).normalize(&raw(1)).unwrap();

        assert_eq!(receipt.receipt_no, "R-100");
        assert_eq!(receipt.total, 100.0);
        assert_eq!(receipt.tax, 5.0);
        assert_eq!(receipt.gross, 105.0);
        assert_eq!(receipt.receipt_type, ReceiptType::Sale);
        assert_eq!(receipt.sale_channel, DEFAULT_SALE_CHANNEL);
        assert!(receipt.receipt_date.is_valid());
        assert!(receipt.shift_day.is_valid());
    }

    #[test]
    fn test_human_date_interpreted_in_business_timezone() {
        // 20 Oct 2025 09:00 AM at +04:00 is 05:00 UTC
        let receipt = Normalizer::new(gulf()).normalize(&raw(1)).unwrap();
        let instant = receipt.shift_day.to_datetime().unwrap();
        assert_eq!(instant.to_rfc3339(), "2025-10-20T05:00:00+00:00");
    }

    #[test]
    fn test_wire_date_passes_through_verbatim() {
        let mut record = raw(1);
        record.receipt_date = Some("/Date(1760950800000+0400)/".to_string());
        record.shift_day = Some("/Date(1760904000000)/".to_string());

        let receipt = Normalizer::new(gulf()).normalize(&record).unwrap();
        assert_eq!(receipt.receipt_date.as_str(), "/Date(1760950800000+0400)/");
        assert_eq!(receipt.shift_day.as_str(), "/Date(1760904000000)/");
    }

    #[test]
    fn test_roundtrip_loses_only_subminute_precision() {
        let normalizer = Normalizer::new(gulf());
        let record = raw(1);
        let receipt = normalizer.normalize(&record).unwrap();

        // Render the recovered instant back into the human format in the
        // business timezone; it must match the input exactly.
        let recovered = receipt
            .receipt_date
            .to_datetime()
            .unwrap()
            .with_timezone(&gulf())
            .format(HUMAN_DATE_FORMAT)
            .to_string();
        assert_eq!(recovered, "20 Oct 2025 02:30 PM");
    }

    #[test_case("1,250.75", 1250.75 ; "thousands comma")]
    #[test_case("100.00", 100.0 ; "plain")]
    #[test_case(" 42 ", 42.0 ; "whitespace")]
    #[test_case("AED 99.50", 99.5 ; "currency prefix")]
    fn test_parse_amount_strips_formatting(input: &str, expected: f64) {
        assert_eq!(parse_amount(input).unwrap(), expected);
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("1.2.3").is_err());
    }

    fn assert_validation_field(err: RelayError, record: usize, field: &str) {
        match err {
            RelayError::Validation(v) => {
                assert_eq!(v.record, record);
                assert_eq!(v.field, field);
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn test_negative_total_names_field_and_record() {
        let mut record = raw(3);
        record.total = Some("-5.00".to_string());
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 3, "total");
    }

    #[test]
    fn test_zero_total_rejected() {
        let mut record = raw(1);
        record.total = Some("0".to_string());
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 1, "total");
    }

    #[test]
    fn test_negative_tax_rejected() {
        let mut record = raw(2);
        record.tax = Some("-1".to_string());
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 2, "tax");
    }

    #[test]
    fn test_negative_supplied_gross_rejected() {
        let mut record = raw(1);
        record.gross = Some("-10".to_string());
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 1, "gross");
    }

    #[test]
    fn test_supplied_gross_kept_verbatim() {
        let mut record = raw(1);
        record.gross = Some("200.00".to_string());
        let receipt = Normalizer::new(gulf()).normalize(&record).unwrap();
        assert_eq!(receipt.gross, 200.0);
    }

    #[test]
    fn test_missing_required_field() {
        let mut record = raw(7);
        record.shift_day = None;
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 7, "shift_day");
    }

    #[test]
    fn test_blank_required_field() {
        let mut record = raw(4);
        record.receipt_no = Some("   ".to_string());
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 4, "receipt_no");
    }

    #[test]
    fn test_invalid_type() {
        let mut record = raw(5);
        record.receipt_type = Some("2".to_string());
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 5, "type");
    }

    #[test]
    fn test_unparseable_date() {
        let mut record = raw(6);
        record.receipt_date = Some("2025-10-20".to_string());
        let err = Normalizer::new(gulf()).normalize(&record).unwrap_err();
        assert_validation_field(err, 6, "receipt_date");
    }

    #[test]
    fn test_sale_channel_override() {
        let mut record = raw(1);
        record.sale_channel = Some("Online".to_string());
        let receipt = Normalizer::new(gulf()).normalize(&record).unwrap();
        assert_eq!(receipt.sale_channel, "Online");
    }

    #[test]
    fn test_normalize_batch_fails_on_first_bad_record() {
        let mut bad = raw(2);
        bad.total = Some("-5.00".to_string());
        let records = vec![raw(1), bad, raw(3)];

        let err = Normalizer::new(gulf())
            .normalize_batch(&records)
            .unwrap_err();
        assert_validation_field(err, 2, "total");
    }
}
