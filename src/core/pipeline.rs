//! Submission pipeline coordinator
//!
//! Wires the stages together for one batch: normalize → group → push →
//! reconcile. Constructed once at process start with the registry, store
//! and vendor client injected; each submission is handled statelessly.

use crate::adapters::store::ReceiptStore;
use crate::adapters::vendor::VendorClient;
use crate::core::group::group_by_shift;
use crate::core::normalize::Normalizer;
use crate::core::reconcile::reconcile;
use crate::core::summary::{ShiftOutcome, SubmissionSummary};
use crate::domain::{RawReceiptRecord, Result, RetailerKey};
use crate::registry::RetailerRegistry;
use chrono::FixedOffset;
use std::sync::Arc;
use std::time::Instant;

/// The receipt submission pipeline.
pub struct SubmissionPipeline {
    registry: Arc<RetailerRegistry>,
    store: Arc<dyn ReceiptStore>,
    vendor: VendorClient,
    normalizer: Normalizer,
}

impl SubmissionPipeline {
    /// Creates a pipeline over the shared registry, store and vendor client.
    pub fn new(
        registry: Arc<RetailerRegistry>,
        store: Arc<dyn ReceiptStore>,
        vendor: VendorClient,
        timezone: FixedOffset,
    ) -> Self {
        Self {
            registry,
            store,
            vendor,
            normalizer: Normalizer::new(timezone),
        }
    }

    /// Submits a batch of raw records for a retailer.
    ///
    /// Validation is strict up front: the first malformed record rejects
    /// the batch with no vendor call made. With `dry_run` the pipeline
    /// stops after grouping — no network, no writes — and the summary
    /// reports what would have been sent.
    ///
    /// Mixed per-shift outcomes are a normal summary; only configuration,
    /// validation, transport and overall-rejection problems surface as
    /// errors.
    pub async fn submit_batch(
        &self,
        retailer_key: &RetailerKey,
        records: &[RawReceiptRecord],
        dry_run: bool,
    ) -> Result<SubmissionSummary> {
        let start = Instant::now();
        let retailer = self.registry.resolve(retailer_key)?;

        tracing::info!(
            retailer = %retailer.key,
            records = records.len(),
            dry_run = dry_run,
            "Starting batch submission"
        );

        let receipts = self.normalizer.normalize_batch(records)?;

        let mut summary = SubmissionSummary::new(retailer.key.as_str());
        summary.receipts_in = receipts.len();
        summary.dry_run = dry_run;

        let (units, dropped) = group_by_shift(receipts, retailer);
        summary.receipts_dropped = dropped;
        summary.units_sent = units.len();

        if units.is_empty() {
            tracing::warn!(retailer = %retailer.key, "No submittable units in batch");
            return Ok(summary.with_duration(start.elapsed()));
        }

        if dry_run {
            summary.shifts = units
                .iter()
                .map(|u| ShiftOutcome {
                    shift_day: u.shift_day.as_str().to_string(),
                    return_code: None,
                    message: None,
                    receipts: u.source_receipts.len(),
                    persisted: 0,
                })
                .collect();
            return Ok(summary.with_duration(start.elapsed()));
        }

        let result = self.vendor.push_shifts(&units, retailer).await?;
        summary.result_code = Some(result.result_code.clone());
        summary.return_message = result.return_message.clone();

        let outcome = reconcile(&units, &result, self.store.as_ref(), retailer_key).await;
        summary.shifts = outcome.shifts;
        summary.persisted_count = outcome.persisted_count;

        tracing::info!(
            retailer = %retailer.key,
            units = summary.units_sent,
            accepted = summary.shifts_accepted(),
            rejected = summary.shifts_rejected(),
            persisted = summary.persisted_count,
            "Batch submission finished"
        );

        Ok(summary.with_duration(start.elapsed()))
    }
}
