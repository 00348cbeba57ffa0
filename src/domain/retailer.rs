//! Retailer domain types
//!
//! Retailers are declared once in a static JSON registry file. Each entry
//! carries the identifiers the vendor API requires (mall, brand, unit) and a
//! pair of environment variable names from which submission credentials are
//! resolved at push time. Secrets never live in the registry itself.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Retailer key newtype wrapper
///
/// Identifies a retailer across the registry and scopes its collection in
/// the store.
///
/// # Examples
///
/// ```
/// use receipt_relay::domain::RetailerKey;
/// use std::str::FromStr;
///
/// let key = RetailerKey::from_str("acme-dxb").unwrap();
/// assert_eq!(key.as_str(), "acme-dxb");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetailerKey(String);

impl RetailerKey {
    /// Creates a new RetailerKey from a string
    pub fn new(key: impl Into<String>) -> Result<Self, String> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err("retailer key cannot be empty".to_string());
        }
        Ok(Self(key))
    }

    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RetailerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RetailerKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for RetailerKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Names of the environment variables holding a retailer's vendor
/// credentials. Values are resolved only at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRef {
    pub username_env: String,
    pub password_env: String,
}

/// One retailer's registry entry. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetailerConfig {
    pub key: RetailerKey,
    pub display_name: String,
    /// Mall identifier required by the vendor API
    pub mall: String,
    /// Brand identifier required by the vendor API
    pub brand: String,
    /// Unit (shop location) identifier required by the vendor API
    pub unit: String,
    pub credentials: CredentialRef,
}

/// The public projection of a retailer entry: never exposes credentials.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetailerSummary {
    pub key: RetailerKey,
    pub display_name: String,
}

impl From<&RetailerConfig> for RetailerSummary {
    fn from(config: &RetailerConfig) -> Self {
        Self {
            key: config.key.clone(),
            display_name: config.display_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retailer_key_rejects_empty() {
        assert!(RetailerKey::new("").is_err());
        assert!(RetailerKey::new("   ").is_err());
        assert!(RetailerKey::new("acme-dxb").is_ok());
    }

    #[test]
    fn test_retailer_config_json_shape() {
        let json = r#"{
            "key": "acme-dxb",
            "display_name": "Acme Dubai",
            "mall": "MALL01",
            "brand": "ACME",
            "unit": "U-104",
            "credentials": {
                "username_env": "ACME_VENDOR_USER",
                "password_env": "ACME_VENDOR_PASS"
            }
        }"#;

        let config: RetailerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.key.as_str(), "acme-dxb");
        assert_eq!(config.credentials.username_env, "ACME_VENDOR_USER");
    }

    #[test]
    fn test_summary_never_carries_credentials() {
        let config = RetailerConfig {
            key: RetailerKey::new("acme").unwrap(),
            display_name: "Acme".to_string(),
            mall: "M".to_string(),
            brand: "B".to_string(),
            unit: "U".to_string(),
            credentials: CredentialRef {
                username_env: "U_ENV".to_string(),
                password_env: "P_ENV".to_string(),
            },
        };

        let summary = RetailerSummary::from(&config);
        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("U_ENV"));
        assert!(!json.contains("credentials"));
    }
}
