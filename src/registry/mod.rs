//! Retailer Registry
//!
//! The registry is loaded once from a static JSON file at process start and
//! shared immutably; every other component resolves retailers through it.
//! A missing or malformed file is a configuration error, kept distinct from
//! the not-found error a bad user-supplied key produces.

use crate::domain::{RelayError, Result, RetailerConfig, RetailerKey, RetailerSummary};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Immutable snapshot of the retailer configuration.
#[derive(Debug)]
pub struct RetailerRegistry {
    /// Entries in registry-file order
    retailers: Vec<RetailerConfig>,
    /// Key -> index into `retailers`
    index: HashMap<String, usize>,
}

impl RetailerRegistry {
    /// Loads the registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Configuration`] if the file is absent, is not
    /// valid JSON, is empty, or contains duplicate keys.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path).map_err(|e| {
            RelayError::Configuration(format!(
                "failed to read retailer registry {}: {e}",
                path.display()
            ))
        })?;

        let retailers: Vec<RetailerConfig> = serde_json::from_str(&contents).map_err(|e| {
            RelayError::Configuration(format!(
                "malformed retailer registry {}: {e}",
                path.display()
            ))
        })?;

        let registry = Self::from_entries(retailers)?;

        tracing::info!(
            path = %path.display(),
            retailers = registry.retailers.len(),
            "Loaded retailer registry"
        );

        Ok(registry)
    }

    /// Builds a registry from already-parsed entries.
    pub fn from_entries(retailers: Vec<RetailerConfig>) -> Result<Self> {
        if retailers.is_empty() {
            return Err(RelayError::Configuration(
                "retailer registry is empty".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(retailers.len());
        for (i, retailer) in retailers.iter().enumerate() {
            if index.insert(retailer.key.as_str().to_string(), i).is_some() {
                return Err(RelayError::Configuration(format!(
                    "duplicate retailer key in registry: {}",
                    retailer.key
                )));
            }
        }

        Ok(Self { retailers, index })
    }

    /// Resolves a retailer key to its full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::RetailerNotFound`] for an unknown key.
    pub fn resolve(&self, key: &RetailerKey) -> Result<&RetailerConfig> {
        self.index
            .get(key.as_str())
            .map(|&i| &self.retailers[i])
            .ok_or_else(|| RelayError::RetailerNotFound(key.to_string()))
    }

    /// Lists `{key, display_name}` pairs in registry-file order.
    /// Never exposes credential references.
    pub fn list_public(&self) -> Vec<RetailerSummary> {
        self.retailers.iter().map(RetailerSummary::from).collect()
    }

    /// Number of registered retailers.
    pub fn len(&self) -> usize {
        self.retailers.len()
    }

    /// Whether the registry is empty (never true after a successful load).
    pub fn is_empty(&self) -> bool {
        self.retailers.is_empty()
    }
}
