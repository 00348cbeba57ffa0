//! Reconciliation & persistence
//!
//! Matches the vendor's per-shift result codes back to the units that were
//! sent and persists receipts from accepted shifts. The correspondence is
//! positional — the vendor offers no correlation id — so a cardinality
//! mismatch is logged loudly but honored: extra results are ignored,
//! missing results leave trailing units unreconciled.
//!
//! By the time this runs the vendor submission is irreversibly committed,
//! so store failures are isolated per write and logged, never escalated;
//! the vendor's acknowledgment is the source of truth for "did this
//! happen".

use crate::adapters::store::ReceiptStore;
use crate::adapters::vendor::{SubmissionResult, SubmissionUnit};
use crate::core::summary::ShiftOutcome;
use crate::domain::RetailerKey;
use futures::future::join_all;

/// Result of a reconciliation pass.
#[derive(Debug)]
pub struct ReconcileOutcome {
    /// Per-unit outcomes, in submission order
    pub shifts: Vec<ShiftOutcome>,
    /// Total receipts persisted
    pub persisted_count: usize,
}

/// Reconciles per-shift results against the units sent and persists
/// receipts from accepted shifts into the retailer's collection.
pub async fn reconcile(
    units: &[SubmissionUnit],
    result: &SubmissionResult,
    store: &dyn ReceiptStore,
    retailer: &RetailerKey,
) -> ReconcileOutcome {
    if result.shift_results.len() != units.len() {
        tracing::warn!(
            retailer = %retailer,
            units_sent = units.len(),
            results_returned = result.shift_results.len(),
            "Vendor returned a different number of shift results than units sent"
        );
    }

    let mut shifts = Vec::with_capacity(units.len());
    let mut persisted_count = 0usize;

    for (i, unit) in units.iter().enumerate() {
        let shift_result = result.shift_results.get(i);

        let mut outcome = ShiftOutcome {
            shift_day: unit.shift_day.as_str().to_string(),
            return_code: shift_result.map(|r| r.return_code.clone()),
            message: shift_result.and_then(|r| {
                r.error_message
                    .clone()
                    .or_else(|| r.error_details.clone())
                    .filter(|m| !m.is_empty())
            }),
            receipts: unit.source_receipts.len(),
            persisted: 0,
        };

        match shift_result {
            Some(r) if r.is_accepted() => {
                outcome.persisted = persist_unit(unit, store, retailer).await;
                persisted_count += outcome.persisted;
            }
            Some(r) => {
                tracing::info!(
                    retailer = %retailer,
                    shift_day = %unit.shift_day,
                    return_code = %r.return_code,
                    message = outcome.message.as_deref().unwrap_or(""),
                    "Shift rejected by vendor; nothing persisted for it"
                );
            }
            None => {
                tracing::warn!(
                    retailer = %retailer,
                    shift_day = %unit.shift_day,
                    position = i,
                    "No vendor result for this unit; leaving it unreconciled"
                );
            }
        }

        shifts.push(outcome);
    }

    for extra in result.shift_results.iter().skip(units.len()) {
        tracing::warn!(
            retailer = %retailer,
            return_code = %extra.return_code,
            "Ignoring extra vendor shift result beyond the units sent"
        );
    }

    ReconcileOutcome {
        shifts,
        persisted_count,
    }
}

/// Persists every receipt of an accepted unit, dispatching the writes
/// concurrently and isolating failures per write.
async fn persist_unit(
    unit: &SubmissionUnit,
    store: &dyn ReceiptStore,
    retailer: &RetailerKey,
) -> usize {
    let writes = unit
        .source_receipts
        .iter()
        .map(|receipt| async move {
            match store.add(retailer, receipt).await {
                Ok(_) => true,
                Err(e) => {
                    // Vendor already accepted the shift; local copy is
                    // best-effort
                    tracing::warn!(
                        retailer = %retailer,
                        receipt_no = %receipt.receipt_no,
                        error = %e,
                        "Failed to persist accepted receipt"
                    );
                    false
                }
            }
        });

    let persisted = join_all(writes).await.into_iter().filter(|ok| *ok).count();

    tracing::info!(
        retailer = %retailer,
        shift_day = %unit.shift_day,
        persisted = persisted,
        of = unit.source_receipts.len(),
        "Persisted receipts for accepted shift"
    );

    persisted
}
