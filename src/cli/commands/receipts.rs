//! Receipts commands
//!
//! Query surface over the per-retailer collections: list newest-first,
//! export to CSV, delete one document by id.

use crate::config::load_config;
use crate::domain::{DocumentId, PersistedReceipt, RelayError, RetailerKey};
use clap::{Args, Subcommand};
use std::str::FromStr;

/// Receipts subcommands
#[derive(Subcommand, Debug)]
pub enum ReceiptsCommand {
    /// List persisted receipts for a retailer, newest first
    List(ListArgs),

    /// Export persisted receipts for a retailer to CSV
    Export(ExportArgs),

    /// Delete one persisted receipt by document id
    Delete(DeleteArgs),
}

impl ReceiptsCommand {
    /// Execute the selected receipts subcommand
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        match self {
            ReceiptsCommand::List(args) => args.execute(config_path).await,
            ReceiptsCommand::Export(args) => args.execute(config_path).await,
            ReceiptsCommand::Delete(args) => args.execute(config_path).await,
        }
    }
}

/// Arguments for receipts list
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Retailer key
    #[arg(short, long)]
    pub retailer: String,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let store = super::build_store(&config).await?;
        let retailer = retailer_key(&self.retailer)?;

        let receipts = store.list(&retailer).await?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&receipts)?);
            return Ok(0);
        }

        println!("{} receipt(s) for {}:", receipts.len(), retailer);
        for r in &receipts {
            println!(
                "  {}  {:<12} {:>10.2} {:>8.2} {:>10.2}  {}  {}",
                r.document_id, r.receipt_no, r.total, r.tax, r.gross, r.receipt_type, r.shift_day
            );
        }
        Ok(0)
    }
}

/// Arguments for receipts export
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Retailer key
    #[arg(short, long)]
    pub retailer: String,

    /// Output CSV path
    #[arg(short, long)]
    pub output: String,
}

impl ExportArgs {
    async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let store = super::build_store(&config).await?;
        let retailer = retailer_key(&self.retailer)?;

        let receipts = store.list(&retailer).await?;
        write_csv(&self.output, &receipts)?;

        println!("Exported {} receipt(s) to {}", receipts.len(), self.output);
        Ok(0)
    }
}

fn write_csv(path: &str, receipts: &[PersistedReceipt]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "document_id",
        "receipt_no",
        "receipt_date",
        "shift_day",
        "total",
        "tax",
        "gross",
        "type",
        "sale_channel",
        "created_at",
    ])?;
    for r in receipts {
        writer.write_record([
            r.document_id.as_str(),
            &r.receipt_no,
            r.receipt_date.as_str(),
            r.shift_day.as_str(),
            &r.total.to_string(),
            &r.tax.to_string(),
            &r.gross.to_string(),
            &r.receipt_type.wire_code().to_string(),
            &r.sale_channel,
            &r.created_at.to_rfc3339(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Arguments for receipts delete
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Retailer key (selects the collection)
    #[arg(short, long)]
    pub retailer: String,

    /// Document id to delete
    #[arg(long)]
    pub id: String,
}

impl DeleteArgs {
    async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let store = super::build_store(&config).await?;
        let retailer = retailer_key(&self.retailer)?;

        let id = DocumentId::new(&self.id)
            .map_err(|e| RelayError::Store(crate::domain::StoreError::DocumentNotFound(e)))?;
        store.delete(&retailer, &id).await?;

        println!("Deleted receipt {} for {}", id, retailer);
        Ok(0)
    }
}

fn retailer_key(raw: &str) -> Result<RetailerKey, RelayError> {
    RetailerKey::from_str(raw).map_err(RelayError::RetailerNotFound)
}
