//! Domain models and types.
//!
//! The domain layer provides:
//! - **Wire encoding** ([`WireDate`]) — the vendor's `/Date(ms)/` timestamp
//!   format, preserved byte-for-byte through the pipeline
//! - **Receipt models** ([`RawReceiptRecord`], [`CanonicalReceipt`],
//!   [`PersistedReceipt`], [`ReceiptType`])
//! - **Retailer types** ([`RetailerKey`], [`RetailerConfig`],
//!   [`RetailerSummary`])
//! - **Error types** ([`RelayError`], [`ValidationError`], [`VendorError`],
//!   [`StoreError`]) and the [`Result`] alias
//!
//! Identifiers use the newtype pattern so retailer keys and document ids
//! cannot be mixed up, and all fallible operations return
//! [`Result<T, RelayError>`](Result).

pub mod errors;
pub mod receipt;
pub mod result;
pub mod retailer;
pub mod wiredate;

// Re-export commonly used types for convenience
pub use errors::{RelayError, StoreError, ValidationError, VendorError};
pub use receipt::{
    CanonicalReceipt, DocumentId, PersistedReceipt, RawReceiptRecord, ReceiptType, RecordSource,
};
pub use result::Result;
pub use retailer::{CredentialRef, RetailerConfig, RetailerKey, RetailerSummary};
pub use wiredate::WireDate;
