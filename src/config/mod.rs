//! Configuration management
//!
//! TOML-based configuration with `${VAR}` substitution, `RELAY_*`
//! environment overrides, and secrecy-wrapped credential values.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, LoggingConfig, RegistryConfig, RelayConfig, StoreBackend, StoreConfig,
    VendorConfig,
};
pub use secret::{secret_from_env, secret_string, SecretString, SecretValue};
