// Receipt Relay - Retail POS Receipt Collection Portal
// Copyright (c) 2025 Receipt Relay Contributors
// Licensed under the MIT License

//! # Receipt Relay - Retail POS Receipt Collection Portal
//!
//! Receipt Relay collects point-of-sale receipt data from tenant retailers,
//! normalizes it into a canonical wire form, submits it to the mall
//! operator's receipt API grouped by shift day, and persists every accepted
//! receipt in a per-retailer datastore.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Normalizing** raw receipt records (CSV rows, pasted grids, or manual
//!   entry) into canonical receipts with wire-encoded dates
//! - **Grouping** receipts into one submission unit per shift day
//! - **Submitting** units to the vendor REST API with partial-failure
//!   tolerance
//! - **Reconciling** per-shift results positionally and persisting receipts
//!   from accepted shifts only
//!
//! ## Architecture
//!
//! Receipt Relay follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (normalize, group, submit, reconcile)
//! - [`adapters`] - External integrations (vendor API, receipt store)
//! - [`domain`] - Core domain types and models
//! - [`input`] - CSV and pasted-grid record readers
//! - [`registry`] - Retailer registry and lookup
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use receipt_relay::adapters::store::create_store;
//! use receipt_relay::adapters::vendor::VendorClient;
//! use receipt_relay::config::load_config;
//! use receipt_relay::core::SubmissionPipeline;
//! use receipt_relay::domain::RetailerKey;
//! use receipt_relay::input::csv::read_records;
//! use receipt_relay::registry::RetailerRegistry;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("relay.toml")?;
//!     let registry = Arc::new(RetailerRegistry::load(&config.registry.path)?);
//!     let store = create_store(&config.store).await?;
//!     let vendor = VendorClient::new(&config.vendor)?;
//!
//!     let pipeline = SubmissionPipeline::new(
//!         registry,
//!         store,
//!         vendor,
//!         config.application.timezone()?,
//!     );
//!
//!     let records = read_records("batch.csv")?;
//!     let retailer = RetailerKey::new("acme-cafe")?;
//!     let summary = pipeline.submit_batch(&retailer, &records, false).await?;
//!
//!     println!("Accepted {} shift(s)", summary.shifts_accepted());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Receipt Relay uses the [`domain::RelayError`] type for all errors:
//!
//! ```rust,no_run
//! use receipt_relay::domain::RelayError;
//!
//! fn example() -> Result<(), RelayError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = receipt_relay::config::load_config("relay.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Receipt Relay uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(retailer = "acme-cafe", receipts = 12, "Submitting batch");
//! warn!(expected = 2, received = 1, "Vendor returned fewer shift results than sent");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod input;
pub mod logging;
pub mod registry;
