//! # Configuration Precedence
//!
//! Merges settings from multiple sources with precedence rules.
//!
//! # Precedence Order
//! 1. CLI arguments (highest priority)
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values (lowest priority)

use crate::config::BrokerConfig;
use crate::file_loader::{ConfigFileError, load_from_file};
use crate::loader::load_from_env;
use crate::settings::StoredSettings;
use gb_core::SettingsProvider;
use std::path::Path;

/// Merge multiple settings sources with precedence.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Merges settings following precedence rules:
/// CLI arguments > environment variables > config file > defaults.
///
/// ## Usage
/// ```rust,no_run
/// use config::{BrokerConfig, StoredSettings, load_from_env, merge_settings};
///
/// let defaults = BrokerConfig::default().to_settings("defaults");
/// let merged = merge_settings(defaults, None, load_from_env(), None);
/// println!("{merged}");
/// ```
///
/// ## Merge Semantics
/// Keys are overridden individually; a source that does not mention a key
/// leaves the lower-precedence value in place.
pub fn merge_settings(
    defaults: StoredSettings,
    file: Option<StoredSettings>,
    env: StoredSettings,
    cli: Option<StoredSettings>
) -> StoredSettings {
    let mut sources = vec![defaults.source()];
    let mut merged = defaults;

    for layer in file.into_iter().chain(Some(env)).chain(cli) {
        if layer.is_empty() {
            continue;
        }
        sources.push(layer.source());
        merged = merge_with_logging(merged, &layer);
    }

    merged.set_source(sources.join("+"));
    merged
}

fn merge_with_logging(mut base: StoredSettings, layer: &StoredSettings) -> StoredSettings {
    let mut changes = Vec::new();

    for (key, value) in layer.iter() {
        if base.get(key) != Some(value) {
            changes.push(format!("{key} = {value}"));
        }
        base.set(key, value);
    }

    if !changes.is_empty() {
        tracing::debug!("Configuration from {}: {:?}", layer.source(), changes);
    }

    base
}

/// Loads defaults, the optional settings file, the environment and CLI
/// overrides, in precedence order.
///
/// ## Error Handling
/// Returns `ConfigFileError` when `file` is given but cannot be loaded. A
/// missing file is an error here: the caller asked for it explicitly.
pub fn load_layered(
    file: Option<&Path>,
    cli: Option<StoredSettings>
) -> Result<StoredSettings, ConfigFileError> {
    let defaults = BrokerConfig::default().to_settings("defaults");
    let from_file = file.map(load_from_file).transpose()?;
    Ok(merge_settings(defaults, from_file, load_from_env(), cli))
}
