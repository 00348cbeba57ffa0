//! Domain error types
//!
//! The error taxonomy mirrors the failure semantics of the submission
//! pipeline: configuration problems fail closed before any network call,
//! validation problems name the offending record and field, vendor problems
//! are fatal for the whole batch, and store problems after a vendor
//! acknowledgment are logged rather than escalated. Third-party error types
//! are never exposed.

use thiserror::Error;

/// Main error type used throughout the crate.
#[derive(Debug, Error)]
pub enum RelayError {
    /// Missing or malformed static configuration, registry, or secrets.
    /// Surfaced to end users as a generic internal configuration issue;
    /// the detail belongs in logs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A user-supplied retailer key that is not in the registry. Kept
    /// distinct from [`RelayError::Configuration`] so operators can tell
    /// misconfiguration from a bad key.
    #[error("Retailer not found: {0}")]
    RetailerNotFound(String),

    /// A malformed input record. The batch is rejected before any vendor
    /// call is made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Vendor API errors
    #[error("Vendor API error: {0}")]
    Vendor(#[from] VendorError),

    /// Receipt store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// A malformed individual input record.
///
/// `record` is the 1-based position within the batch so the message points
/// at the row the operator sees in their file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {record}, field `{field}`: {message}")]
pub struct ValidationError {
    pub record: usize,
    pub field: String,
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error for a record position and field
    pub fn new(record: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            record,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors from the external vendor push API.
///
/// All of these are fatal for the batch: no partial reconciliation is
/// attempted, and there is no automatic retry by design.
#[derive(Debug, Error)]
pub enum VendorError {
    /// Failed to reach the vendor endpoint
    #[error("failed to reach vendor API: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("vendor API request timed out: {0}")]
    Timeout(String),

    /// The response body was not JSON, or JSON of the wrong shape,
    /// regardless of HTTP status
    #[error("invalid vendor response: {0}")]
    InvalidResponse(String),

    /// A JSON response indicating overall failure without the acceptable
    /// partial-failure sentinel
    #[error("vendor rejected submission (code {code}): {message}")]
    Rejected { code: String, message: String },
}

/// Errors from the receipt store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to write a document
    #[error("failed to write document: {0}")]
    WriteFailed(String),

    /// Failed to query a collection
    #[error("failed to query collection: {0}")]
    QueryFailed(String),

    /// Document not found for a delete
    #[error("document not found: {0}")]
    DocumentNotFound(String),

    /// Underlying I/O failure (file-backed store)
    #[error("store I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        RelayError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RelayError {
    fn from(err: toml::de::Error) -> Self {
        RelayError::Configuration(format!("TOML parse error: {err}"))
    }
}
