//! Receipt domain models
//!
//! Raw input records arrive from three sources (CSV rows, the manual entry
//! form, pasted grid rows) as loosely-typed string fields. The normalizer
//! turns them into [`CanonicalReceipt`] values carrying wire-format dates;
//! reconciliation turns accepted ones into [`PersistedReceipt`] documents.

use super::wiredate::WireDate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Where a raw record came from. Used in diagnostics only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    /// A row from an uploaded CSV batch
    Csv,
    /// A single record entered manually
    Manual,
    /// A row from a pasted tab-separated grid
    Pasted,
}

impl fmt::Display for RecordSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordSource::Csv => write!(f, "csv"),
            RecordSource::Manual => write!(f, "manual"),
            RecordSource::Pasted => write!(f, "pasted"),
        }
    }
}

/// A receipt as it arrives from an input surface, before validation.
///
/// All business fields are optional strings; `position` is the 1-based record
/// number within its batch, used to point error messages at the right row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawReceiptRecord {
    pub source: Option<RecordSource>,
    pub position: usize,
    pub receipt_no: Option<String>,
    pub receipt_date: Option<String>,
    pub shift_day: Option<String>,
    pub total: Option<String>,
    pub tax: Option<String>,
    pub gross: Option<String>,
    pub receipt_type: Option<String>,
    pub sale_channel: Option<String>,
}

/// Sale or return, encoded as `0`/`1` on the wire and at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ReceiptType {
    Sale,
    Return,
}

impl ReceiptType {
    /// Parses the raw input encoding (`"0"` sale, `"1"` return).
    pub fn from_input(s: &str) -> Result<Self, String> {
        match s.trim() {
            "0" => Ok(ReceiptType::Sale),
            "1" => Ok(ReceiptType::Return),
            other => Err(format!("expected \"0\" (sale) or \"1\" (return), got {other:?}")),
        }
    }

    /// The numeric wire code.
    pub fn wire_code(self) -> u8 {
        match self {
            ReceiptType::Sale => 0,
            ReceiptType::Return => 1,
        }
    }
}

impl From<ReceiptType> for u8 {
    fn from(t: ReceiptType) -> u8 {
        t.wire_code()
    }
}

impl TryFrom<u8> for ReceiptType {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(ReceiptType::Sale),
            1 => Ok(ReceiptType::Return),
            other => Err(format!("invalid receipt type code: {other}")),
        }
    }
}

impl fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptType::Sale => write!(f, "sale"),
            ReceiptType::Return => write!(f, "return"),
        }
    }
}

/// The canonical receipt representation produced by the normalizer.
///
/// Both dates are already in wire format; downstream components re-emit them
/// verbatim. `gross` is always present (derived as `max(0, total + tax)` when
/// the input omitted it) and never negative. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalReceipt {
    /// Process-generated id, carried into the wire payload for traceability
    pub id: Uuid,
    pub receipt_no: String,
    pub receipt_date: WireDate,
    pub shift_day: WireDate,
    pub total: f64,
    pub tax: f64,
    pub gross: f64,
    pub receipt_type: ReceiptType,
    pub sale_channel: String,
}

/// Opaque identifier assigned by the store when a receipt is persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Creates a new DocumentId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("document id cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random id (used by store backends at write time).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A receipt as it lives in a retailer's collection after reconciliation.
///
/// Wire date strings are carried verbatim from the canonical receipt;
/// `created_at` is assigned by the store at write time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedReceipt {
    pub document_id: DocumentId,
    pub receipt_id: Uuid,
    pub receipt_no: String,
    pub receipt_date: WireDate,
    pub shift_day: WireDate,
    pub total: f64,
    pub tax: f64,
    pub gross: f64,
    pub receipt_type: ReceiptType,
    pub sale_channel: String,
    pub created_at: DateTime<Utc>,
}

impl PersistedReceipt {
    /// Builds the stored document for a canonical receipt.
    pub fn from_canonical(receipt: &CanonicalReceipt, document_id: DocumentId) -> Self {
        Self {
            document_id,
            receipt_id: receipt.id,
            receipt_no: receipt.receipt_no.clone(),
            receipt_date: receipt.receipt_date.clone(),
            shift_day: receipt.shift_day.clone(),
            total: receipt.total,
            tax: receipt.tax,
            gross: receipt.gross,
            receipt_type: receipt.receipt_type,
            sale_channel: receipt.sale_channel.clone(),
            created_at: Utc::now(),
        }
    }
}
