//! # Configuration System
//!
//! Settings management for the gitbroker repository broker.
//!
//! This crate provides:
//! - The dotted setting keys and their defaults
//! - A string-keyed settings store implementing `SettingsProvider`
//! - Configuration file loading (TOML/YAML)
//! - Environment variable loading (12-factor app principles)
//! - Settings precedence (CLI > env > file > defaults)
//! - A typed, validated view of the broker settings
//!
//! # Best Practices
//!
//! - Uses `validator` crate for input validation
//! - Follows 12-factor app configuration principles
//! - Provides clear error messages for invalid configuration

pub mod config;
pub mod file_loader;
pub mod keys;
pub mod loader;
pub mod precedence;
pub mod settings;
pub mod validation;

pub use config::BrokerConfig;
pub use file_loader::{ConfigFileError, load_from_file, load_from_toml, load_from_yaml};
pub use loader::load_from_env;
pub use precedence::{load_layered, merge_settings};
pub use settings::StoredSettings;
pub use validation::validate;
