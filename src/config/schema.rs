//! Configuration schema
//!
//! The portal is configured from a single TOML file with sections for the
//! application, the retailer registry, the vendor push API, the receipt
//! store, and logging. Secrets never live here: the registry JSON names the
//! environment variables credentials are resolved from at submission time.

use crate::domain::{RelayError, Result};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub application: ApplicationConfig,
    pub registry: RegistryConfig,
    pub vendor: VendorConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Fixed offset in which human-readable receipt dates are interpreted,
    /// e.g. "+04:00" for the Gulf business day
    pub timezone_offset: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: "receipt-relay".to_string(),
            log_level: "info".to_string(),
            timezone_offset: "+04:00".to_string(),
        }
    }
}

impl ApplicationConfig {
    /// Parses `timezone_offset` into a chrono offset.
    pub fn timezone(&self) -> Result<FixedOffset> {
        parse_offset(&self.timezone_offset).ok_or_else(|| {
            RelayError::Configuration(format!(
                "invalid application.timezone_offset: {:?} (expected e.g. \"+04:00\")",
                self.timezone_offset
            ))
        })
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Retailer registry location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Path to the retailers JSON file
    pub path: String,
}

/// Vendor push API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    /// Base URL of the vendor API, e.g. "https://push.example.com"
    pub base_url: String,
    /// Path of the shift push endpoint
    #[serde(default = "default_push_path")]
    pub push_path: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_push_path() -> String {
    "/api/pushreceiptshift".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

/// Receipt store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// In-memory store: per-process only, used for tests and dry runs
    Memory,
    /// One JSON file per retailer collection under `store.path`
    Json,
}

/// Receipt store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Directory for the json backend
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Json,
            path: "./data".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Whether to also write logs to a rolling file
    pub local_enabled: bool,
    /// Directory for log files
    pub local_path: String,
    /// Rotation: "daily", "hourly" or "never"
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: "./logs".to_string(),
            local_rotation: "daily".to_string(),
        }
    }
}

impl RelayConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Configuration`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.registry.path.trim().is_empty() {
            return Err(RelayError::Configuration(
                "registry.path must not be empty".to_string(),
            ));
        }

        if self.vendor.base_url.trim().is_empty() {
            return Err(RelayError::Configuration(
                "vendor.base_url must not be empty".to_string(),
            ));
        }
        if !self.vendor.base_url.starts_with("http://") && !self.vendor.base_url.starts_with("https://")
        {
            return Err(RelayError::Configuration(format!(
                "vendor.base_url must be an http(s) URL, got {:?}",
                self.vendor.base_url
            )));
        }
        if !self.vendor.push_path.starts_with('/') {
            return Err(RelayError::Configuration(format!(
                "vendor.push_path must start with '/', got {:?}",
                self.vendor.push_path
            )));
        }
        if self.vendor.timeout_seconds == 0 {
            return Err(RelayError::Configuration(
                "vendor.timeout_seconds must be greater than zero".to_string(),
            ));
        }

        if self.store.backend == StoreBackend::Json && self.store.path.trim().is_empty() {
            return Err(RelayError::Configuration(
                "store.path must not be empty for the json backend".to_string(),
            ));
        }

        match self.logging.local_rotation.as_str() {
            "daily" | "hourly" | "never" => {}
            other => {
                return Err(RelayError::Configuration(format!(
                    "logging.local_rotation must be daily, hourly or never, got {other:?}"
                )))
            }
        }

        // Fails early on a bad offset instead of at normalization time
        self.application.timezone()?;

        Ok(())
    }
}
