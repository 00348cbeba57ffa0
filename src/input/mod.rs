//! Input surfaces
//!
//! Decoding for the three ways receipts enter the portal: CSV batch files,
//! pasted tab-separated grids, and manual single entry (built directly by
//! the CLI from flags). All three produce the same [`RawReceiptRecord`]
//! shape the normalizer consumes.
//!
//! [`RawReceiptRecord`]: crate::domain::RawReceiptRecord

pub mod csv;
pub mod paste;
