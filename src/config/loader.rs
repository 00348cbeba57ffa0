//! Configuration loader with TOML parsing and environment overrides
//!
//! Loading goes through four stages: read the file, substitute `${VAR}`
//! placeholders (comment lines are skipped, all missing variables are
//! collected into a single error), parse the TOML, then apply `RELAY_*`
//! environment overrides and validate.

use super::schema::{RelayConfig, StoreBackend};
use crate::domain::{RelayError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads and validates configuration from a TOML file.
///
/// # Errors
///
/// Returns [`RelayError::Configuration`] if the file is missing, a
/// referenced environment variable is unset, the TOML does not parse, or
/// validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<RelayConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RelayError::Configuration(format!(
            "configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RelayError::Configuration(format!(
            "failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: RelayConfig = toml::from_str(&contents)
        .map_err(|e| RelayError::Configuration(format!("failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate()?;

    Ok(config)
}

/// Substitutes `${VAR_NAME}` placeholders from the environment.
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid regex");
    let mut result = String::with_capacity(input.len());
    let mut missing: Vec<String> = Vec::new();

    for line in input.lines() {
        // Placeholders inside comments are left alone
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed = processed.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing.contains(&var_name.to_string()) {
                        missing.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing.is_empty() {
        return Err(RelayError::Configuration(format!(
            "missing required environment variables: {}",
            missing.join(", ")
        )));
    }

    Ok(result)
}

/// Applies `RELAY_<SECTION>_<KEY>` environment overrides.
fn apply_env_overrides(config: &mut RelayConfig) {
    if let Ok(val) = std::env::var("RELAY_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("RELAY_APPLICATION_TIMEZONE_OFFSET") {
        config.application.timezone_offset = val;
    }

    if let Ok(val) = std::env::var("RELAY_REGISTRY_PATH") {
        config.registry.path = val;
    }

    if let Ok(val) = std::env::var("RELAY_VENDOR_BASE_URL") {
        config.vendor.base_url = val;
    }
    if let Ok(val) = std::env::var("RELAY_VENDOR_PUSH_PATH") {
        config.vendor.push_path = val;
    }
    if let Ok(val) = std::env::var("RELAY_VENDOR_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.vendor.timeout_seconds = secs;
        }
    }

    if let Ok(val) = std::env::var("RELAY_STORE_BACKEND") {
        match val.to_lowercase().as_str() {
            "memory" => config.store.backend = StoreBackend::Memory,
            "json" => config.store.backend = StoreBackend::Json,
            _ => {}
        }
    }
    if let Ok(val) = std::env::var("RELAY_STORE_PATH") {
        config.store.path = val;
    }

    if let Ok(val) = std::env::var("RELAY_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("RELAY_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
