//! Validate-config command
//!
//! Loads and validates the TOML configuration and the retailer registry it
//! points at, without touching the vendor API or the store.

use crate::config::load_config;
use crate::registry::RetailerRegistry;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(config) => {
                println!("✓ Configuration is valid: {config_path}");
                config
            }
            Err(e) => {
                eprintln!("✗ Configuration is invalid: {e}");
                return Ok(3);
            }
        };

        match RetailerRegistry::load(&config.registry.path) {
            Ok(registry) => {
                println!(
                    "✓ Retailer registry is valid: {} ({} retailer(s))",
                    config.registry.path,
                    registry.len()
                );
                Ok(0)
            }
            Err(e) => {
                eprintln!("✗ Retailer registry is invalid: {e}");
                Ok(3)
            }
        }
    }
}
