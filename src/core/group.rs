//! Shift-day grouping
//!
//! Partitions a batch of canonical receipts into one submission unit per
//! distinct shift-day. The grouping key is the shift-day **wire string**,
//! compared byte-for-byte; two receipts naming the same instant through
//! different wire strings land in different units. Output order is the
//! first-occurrence order of shift-days in the input, never sorted.

use crate::adapters::vendor::SubmissionUnit;
use crate::domain::{CanonicalReceipt, RetailerConfig};
use std::collections::HashMap;

/// Groups receipts into submission units for one retailer.
///
/// Receipts whose dates lack the wire envelope (possible after a round trip
/// through stored data, since rehydration does not validate) are dropped
/// with a warning rather than failing the otherwise valid batch. Returns
/// the units plus the number of dropped receipts.
pub fn group_by_shift(
    receipts: Vec<CanonicalReceipt>,
    retailer: &RetailerConfig,
) -> (Vec<SubmissionUnit>, usize) {
    let mut units: Vec<SubmissionUnit> = Vec::new();
    let mut index_by_shift: HashMap<String, usize> = HashMap::new();
    let mut dropped = 0usize;

    for receipt in receipts {
        if !receipt.receipt_date.is_valid() || !receipt.shift_day.is_valid() {
            tracing::warn!(
                retailer = %retailer.key,
                receipt_no = %receipt.receipt_no,
                receipt_date = %receipt.receipt_date,
                shift_day = %receipt.shift_day,
                "Dropping receipt without wire-format dates"
            );
            dropped += 1;
            continue;
        }

        let shift_key = receipt.shift_day.as_str().to_string();
        let unit_index = match index_by_shift.get(&shift_key) {
            Some(&i) => i,
            None => {
                units.push(SubmissionUnit::new(retailer, receipt.shift_day.clone()));
                index_by_shift.insert(shift_key, units.len() - 1);
                units.len() - 1
            }
        };

        units[unit_index].push_receipt(receipt);
    }

    tracing::debug!(
        retailer = %retailer.key,
        units = units.len(),
        dropped = dropped,
        "Grouped receipts by shift-day"
    );

    (units, dropped)
}
