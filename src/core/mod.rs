//! Business logic: the submission pipeline
//!
//! Normalization, shift-day grouping, reconciliation, and the coordinator
//! that wires them to the vendor client and the store.

pub mod group;
pub mod normalize;
pub mod pipeline;
pub mod reconcile;
pub mod summary;

pub use group::group_by_shift;
pub use normalize::Normalizer;
pub use pipeline::SubmissionPipeline;
pub use reconcile::{reconcile, ReconcileOutcome};
pub use summary::{ShiftOutcome, SubmissionSummary};
