//! # Environment Variable Loader
//!
//! Loads settings from environment variables following 12-factor app
//! principles.
//!
//! # Naming Convention
//! - `GITBROKER_*`: one variable per broker key, upper snake case of the key
//!   name without its section

use crate::keys;
use crate::settings::StoredSettings;
use std::env;

/// Environment variable prefix for gitbroker settings.
pub const ENV_PREFIX: &str = "GITBROKER_";

/// Variable name / setting key pairs.
pub const ENV_KEYS: [(&str, &str); 5] = [
    ("GITBROKER_REPOSITORIES_FOLDER", keys::git::REPOSITORIES_FOLDER),
    ("GITBROKER_EXPORT_ALL", keys::git::EXPORT_ALL),
    ("GITBROKER_NESTED_REPOSITORIES", keys::git::NESTED_REPOSITORIES),
    ("GITBROKER_CLONE_URL", keys::git::CLONE_URL),
    ("GITBROKER_DEBUG_MODE", keys::web::DEBUG_MODE)
];

/// Load settings from environment variables.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Collects the broker settings present in the environment. Unset variables
/// are simply absent from the result so lower-precedence sources still apply.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_env;
///
/// let settings = load_from_env();
/// println!("{} settings from the environment", settings.len());
/// ```
///
/// ## Environment Variables
/// - `GITBROKER_REPOSITORIES_FOLDER`: repositories folder (default: "repos")
/// - `GITBROKER_EXPORT_ALL`: serve unmarked repositories (default: true)
/// - `GITBROKER_NESTED_REPOSITORIES`: scan subdirectories (default: true)
/// - `GITBROKER_CLONE_URL`: clone URL prefix (default: "https://localhost/git/")
/// - `GITBROKER_DEBUG_MODE`: debug mode (default: false)
pub fn load_from_env() -> StoredSettings {
    load_with(|name| env::var(name).ok())
}

/// Same as [`load_from_env`] with an injectable lookup.
pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> StoredSettings {
    let mut settings = StoredSettings::new("env");
    for (var, key) in ENV_KEYS {
        if let Some(value) = lookup(var).filter(|v| !v.trim().is_empty()) {
            tracing::trace!(var, key, "setting read from environment");
            settings.set(key, value);
        }
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn clear_env() {
        unsafe {
            for (var, _) in ENV_KEYS {
                env::remove_var(var);
            }
        }
    }

    #[test]
    #[serial]
    fn test_load_from_env_empty() {
        clear_env();
        let settings = load_from_env();
        assert!(settings.is_empty());
    }

    #[test]
    #[serial]
    fn test_load_from_env_overrides() {
        clear_env();
        unsafe {
            env::set_var("GITBROKER_REPOSITORIES_FOLDER", "/srv/git");
            env::set_var("GITBROKER_EXPORT_ALL", "false");
        }

        let settings = load_from_env();
        assert_eq!(settings.get(keys::git::REPOSITORIES_FOLDER), Some("/srv/git"));
        assert_eq!(settings.get(keys::git::EXPORT_ALL), Some("false"));
        assert!(!settings.contains(keys::web::DEBUG_MODE));

        clear_env();
    }

    #[test]
    fn test_load_with_skips_blank_values() {
        let vars = HashMap::from([
            ("GITBROKER_CLONE_URL", "  "),
            ("GITBROKER_DEBUG_MODE", "1")
        ]);
        let settings = load_with(|name| vars.get(name).map(|v| (*v).to_string()));

        assert!(!settings.contains(keys::git::CLONE_URL));
        assert_eq!(settings.get(keys::web::DEBUG_MODE), Some("1"));
    }

    #[test]
    fn test_env_names_share_prefix() {
        for (var, _) in ENV_KEYS {
            assert!(var.starts_with(ENV_PREFIX));
        }
    }
}
