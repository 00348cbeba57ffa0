//! Retailers command
//!
//! Read-only listing of `{key, display_name}` pairs from the registry.
//! Credential references are never printed.

use crate::config::load_config;
use clap::Args;

/// Arguments for the retailers command
#[derive(Args, Debug)]
pub struct RetailersArgs {
    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl RetailersArgs {
    /// Execute the retailers command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config(config_path)?;
        let registry = super::load_registry(&config)?;
        let retailers = registry.list_public();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&retailers)?);
        } else {
            println!("{} registered retailer(s):", retailers.len());
            for retailer in &retailers {
                println!("  {:<20} {}", retailer.key.as_str(), retailer.display_name);
            }
        }

        Ok(0)
    }
}
