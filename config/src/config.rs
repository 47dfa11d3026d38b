//! # Configuration Structures
//!
//! Typed view of the broker settings.
//!
//! The broker itself talks to a `SettingsProvider`; `BrokerConfig` is the
//! snapshot taken from it at setup time, after defaults are applied.

use crate::keys;
use crate::settings::StoredSettings;
use gb_core::SettingsProvider;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Broker configuration.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Holds the five settings the broker consumes, with defaults applied.
///
/// ## Usage
/// ```rust,no_run
/// use config::{BrokerConfig, StoredSettings};
///
/// let settings = StoredSettings::new("inline").with("git.exportAll", "false");
/// let config = BrokerConfig::from_settings(&settings);
/// assert!(!config.export_all);
/// ```
///
/// ## Fields
/// - `repositories_folder`: directory scanned for repositories (default: "repos")
/// - `export_all`: serve repositories without an export marker (default: true)
/// - `nested_repositories`: scan subdirectories (default: true)
/// - `clone_url`: clone URL prefix (default: "https://localhost/git/")
/// - `debug_mode`: diagnostic mode for the web front end (default: false)
///
/// ## Validation
/// - `repositories_folder`: 1+ characters
/// - `clone_url`: 1+ characters
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BrokerConfig {
    #[validate(length(min = 1))]
    pub repositories_folder: String,

    pub export_all: bool,

    pub nested_repositories: bool,

    #[validate(length(min = 1))]
    pub clone_url: String,

    pub debug_mode: bool
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            repositories_folder: keys::git::DEFAULT_REPOSITORIES_FOLDER.to_string(),
            export_all: keys::git::DEFAULT_EXPORT_ALL,
            nested_repositories: keys::git::DEFAULT_NESTED_REPOSITORIES,
            clone_url: keys::git::DEFAULT_CLONE_URL.to_string(),
            debug_mode: keys::web::DEFAULT_DEBUG_MODE
        }
    }
}

impl BrokerConfig {
    /// Reads every broker key from `settings`, falling back to defaults for
    /// absent keys.
    ///
    /// A path or URL key that is present but blank is kept blank so that
    /// [`crate::validate`] rejects it instead of silently using the default.
    pub fn from_settings(settings: &dyn SettingsProvider) -> Self {
        Self {
            repositories_folder: present_or_default(
                settings,
                keys::git::REPOSITORIES_FOLDER,
                keys::git::DEFAULT_REPOSITORIES_FOLDER
            ),
            export_all: settings.get_bool(keys::git::EXPORT_ALL, keys::git::DEFAULT_EXPORT_ALL),
            nested_repositories: settings.get_bool(
                keys::git::NESTED_REPOSITORIES,
                keys::git::DEFAULT_NESTED_REPOSITORIES
            ),
            // Used verbatim as a prefix; only surrounding blanks are dropped.
            clone_url: present_or_default(
                settings,
                keys::git::CLONE_URL,
                keys::git::DEFAULT_CLONE_URL
            ),
            debug_mode: settings.get_bool(keys::web::DEBUG_MODE, keys::web::DEFAULT_DEBUG_MODE)
        }
    }

    pub fn repositories_path(&self) -> PathBuf {
        PathBuf::from(&self.repositories_folder)
    }

    /// Renders this configuration back into settings form.
    pub fn to_settings(&self, source: &str) -> StoredSettings {
        StoredSettings::new(source)
            .with(keys::git::REPOSITORIES_FOLDER, self.repositories_folder.clone())
            .with(keys::git::EXPORT_ALL, self.export_all.to_string())
            .with(keys::git::NESTED_REPOSITORIES, self.nested_repositories.to_string())
            .with(keys::git::CLONE_URL, self.clone_url.clone())
            .with(keys::web::DEBUG_MODE, self.debug_mode.to_string())
    }
}

fn present_or_default(settings: &dyn SettingsProvider, key: &str, default: &str) -> String {
    settings
        .get_raw(key)
        .map_or_else(|| default.to_string(), |v| v.trim().to_string())
}
