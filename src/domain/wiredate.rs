//! Vendor wire date encoding
//!
//! The vendor API exchanges timestamps as strings of the exact shape
//! `/Date(<integer-milliseconds-since-epoch>)/`, optionally carrying a signed
//! four-digit timezone suffix before the closing `)/` (a leftover from the
//! vendor's serializer). The suffix is tolerated on parse but never emitted
//! on write, and it never shifts the instant: the millisecond value is always
//! UTC epoch milliseconds.
//!
//! This is the canonical on-the-wire and at-rest representation for every
//! date in the pipeline. Components that do not need the instant re-emit the
//! stored string byte-for-byte; only the normalizer (envelope detection) and
//! reporting code ever look inside.

use chrono::{DateTime, TimeZone, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

fn envelope_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/Date\((-?\d+)([+-]\d{4})?\)/$").expect("valid regex"))
}

/// A timestamp in the vendor wire encoding, stored verbatim.
///
/// Serde treats this as a plain string and does not validate, so values
/// round-tripped through the store can carry a malformed envelope back into
/// the pipeline. The grouper re-checks the envelope and drops such rows with
/// a diagnostic instead of failing the batch.
///
/// Equality is string equality: two wire dates naming the same instant with
/// different suffixes are distinct values and are never merged.
///
/// # Examples
///
/// ```
/// use receipt_relay::domain::WireDate;
///
/// let wire = WireDate::parse("/Date(1760950800000+0400)/").unwrap();
/// assert_eq!(wire.as_str(), "/Date(1760950800000+0400)/");
/// assert_eq!(wire.timestamp_millis().unwrap(), 1760950800000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WireDate(String);

impl WireDate {
    /// Parses a wire date string, keeping it verbatim.
    ///
    /// Returns an error if the string does not match the wire envelope.
    pub fn parse(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if !Self::is_wire_format(&s) {
            return Err(format!("not a wire date: {s}"));
        }
        Ok(Self(s))
    }

    /// Wraps a string without validating the envelope.
    ///
    /// Used when rehydrating stored data; the grouper re-validates before
    /// submission.
    pub fn verbatim(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Serializes an instant to the canonical wire form (no suffix).
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(format!("/Date({})/", dt.timestamp_millis()))
    }

    /// Checks whether a string matches the wire envelope.
    pub fn is_wire_format(s: &str) -> bool {
        envelope_regex().is_match(s)
    }

    /// Whether this value (possibly constructed via [`WireDate::verbatim`])
    /// carries a valid envelope.
    pub fn is_valid(&self) -> bool {
        Self::is_wire_format(&self.0)
    }

    /// Extracts the millisecond value, ignoring any timezone suffix.
    pub fn timestamp_millis(&self) -> Result<i64, String> {
        let caps = envelope_regex()
            .captures(&self.0)
            .ok_or_else(|| format!("not a wire date: {}", self.0))?;
        caps[1]
            .parse::<i64>()
            .map_err(|e| format!("wire date millis out of range: {e}"))
    }

    /// Interprets the wire date as a UTC instant.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, String> {
        let millis = self.timestamp_millis()?;
        Utc.timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| format!("wire date millis out of range: {millis}"))
    }

    /// Returns the verbatim wire string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for WireDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WireDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_plain_envelope() {
        let wire = WireDate::parse("/Date(1760950800000)/").unwrap();
        assert_eq!(wire.timestamp_millis().unwrap(), 1760950800000);
    }

    #[test]
    fn test_parse_with_offset_suffix() {
        let wire = WireDate::parse("/Date(1760950800000+0400)/").unwrap();
        // Suffix is tolerated but never shifts the instant
        assert_eq!(wire.timestamp_millis().unwrap(), 1760950800000);
        // ...and is preserved verbatim
        assert_eq!(wire.as_str(), "/Date(1760950800000+0400)/");
    }

    #[test]
    fn test_parse_negative_offset_suffix() {
        let wire = WireDate::parse("/Date(1000-0500)/").unwrap();
        assert_eq!(wire.timestamp_millis().unwrap(), 1000);
    }

    #[test]
    fn test_parse_pre_epoch_millis() {
        let wire = WireDate::parse("/Date(-86400000)/").unwrap();
        assert_eq!(wire.timestamp_millis().unwrap(), -86_400_000);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(WireDate::parse("20 Oct 2025 02:30 PM").is_err());
        assert!(WireDate::parse("/Date()/").is_err());
        assert!(WireDate::parse("/Date(abc)/").is_err());
        assert!(WireDate::parse("/Date(123)").is_err());
        assert!(WireDate::parse(" /Date(123)/").is_err());
    }

    #[test]
    fn test_from_datetime_emits_no_suffix() {
        let dt = Utc.with_ymd_and_hms(2025, 10, 20, 5, 0, 0).unwrap();
        let wire = WireDate::from_datetime(dt);
        assert_eq!(wire.as_str(), format!("/Date({})/", dt.timestamp_millis()));
        assert!(!wire.as_str().contains('+'));
    }

    #[test]
    fn test_roundtrip_instant() {
        let dt = Utc.with_ymd_and_hms(2025, 10, 20, 10, 30, 0).unwrap();
        let wire = WireDate::from_datetime(dt);
        assert_eq!(wire.to_datetime().unwrap(), dt);
    }

    #[test]
    fn test_verbatim_skips_validation() {
        let wire = WireDate::verbatim("not-a-date");
        assert!(!wire.is_valid());
        assert!(wire.timestamp_millis().is_err());
    }

    #[test]
    fn test_string_equality_not_instant_equality() {
        let a = WireDate::parse("/Date(1000)/").unwrap();
        let b = WireDate::parse("/Date(1000+0400)/").unwrap();
        assert_eq!(a.timestamp_millis().unwrap(), b.timestamp_millis().unwrap());
        assert_ne!(a, b);
    }

    #[test]
    fn test_serde_transparent() {
        let wire = WireDate::parse("/Date(42)/").unwrap();
        let json = serde_json::to_string(&wire).unwrap();
        assert_eq!(json, "\"/Date(42)/\"");
        let back: WireDate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wire);
    }
}
