//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the portal using
//! clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Receipt Relay - retail POS receipt collection portal
#[derive(Parser, Debug)]
#[command(name = "receipt-relay")]
#[command(version, about, long_about = None)]
#[command(author = "Receipt Relay Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "relay.toml", env = "RELAY_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RELAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit a batch of receipts (CSV file or pasted grid) for a retailer
    Submit(commands::submit::SubmitArgs),

    /// Submit a single manually-entered receipt for a retailer
    SubmitOne(commands::submit::SubmitOneArgs),

    /// List registered retailers
    Retailers(commands::retailers::RetailersArgs),

    /// Query, export or delete persisted receipts
    #[command(subcommand)]
    Receipts(commands::receipts::ReceiptsCommand),

    /// Validate configuration and registry files
    ValidateConfig(commands::validate::ValidateArgs),
}
