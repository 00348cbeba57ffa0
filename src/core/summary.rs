//! Submission summary and reporting
//!
//! A batch submission ends in a summary, not an exception: mixed per-shift
//! outcomes are data the caller's UI renders, with the vendor's echoed
//! messages attached to the shifts that failed.

use serde::Serialize;
use std::time::Duration;

/// Outcome of one submitted shift after reconciliation.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftOutcome {
    /// The shift-day wire string of the submitted unit
    pub shift_day: String,

    /// Vendor per-shift return code ("200" means accepted); `None` when the
    /// vendor returned fewer results than units sent
    pub return_code: Option<String>,

    /// Vendor error message for rejected shifts
    pub message: Option<String>,

    /// Receipts submitted in this unit
    pub receipts: usize,

    /// Receipts actually written to the store for this unit
    pub persisted: usize,
}

impl ShiftOutcome {
    /// Whether the vendor accepted this shift.
    pub fn accepted(&self) -> bool {
        self.return_code.as_deref() == Some(crate::adapters::vendor::SHIFT_ACCEPTED_RETURN_CODE)
    }
}

/// Summary of one batch submission.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionSummary {
    /// Retailer the batch was submitted for
    pub retailer: String,

    /// Raw records accepted into the batch
    pub receipts_in: usize,

    /// Receipts dropped at grouping (malformed wire dates)
    pub receipts_dropped: usize,

    /// Submission units sent to the vendor
    pub units_sent: usize,

    /// Overall vendor result code (absent for dry runs)
    pub result_code: Option<String>,

    /// Overall vendor message, when present
    pub return_message: Option<String>,

    /// Per-shift outcomes in submission order
    pub shifts: Vec<ShiftOutcome>,

    /// Total receipts persisted across accepted shifts
    pub persisted_count: usize,

    /// Whether this was a dry run (no vendor call, no writes)
    pub dry_run: bool,

    /// Wall-clock duration of the submission
    #[serde(skip)]
    pub duration: Duration,
}

impl SubmissionSummary {
    /// Starts an empty summary for a retailer.
    pub fn new(retailer: impl Into<String>) -> Self {
        Self {
            retailer: retailer.into(),
            receipts_in: 0,
            receipts_dropped: 0,
            units_sent: 0,
            result_code: None,
            return_message: None,
            shifts: Vec::new(),
            persisted_count: 0,
            dry_run: false,
            duration: Duration::from_secs(0),
        }
    }

    /// Sets the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Number of shifts the vendor accepted.
    pub fn shifts_accepted(&self) -> usize {
        self.shifts.iter().filter(|s| s.accepted()).count()
    }

    /// Number of shifts the vendor rejected or left unreconciled.
    pub fn shifts_rejected(&self) -> usize {
        self.shifts.len() - self.shifts_accepted()
    }
}
