//! Collaborator traits for the repository broker

use crate::types::Identity;

/// String-keyed configuration source.
///
/// Implementations only need to answer raw lookups; typed accessors with
/// defaults are provided on top.
pub trait SettingsProvider: Send + Sync {
    /// Raw value for `key`, if configured.
    fn get_raw(&self, key: &str) -> Option<String>;

    /// Human readable origin of these settings, used in log lines.
    fn source(&self) -> String;

    fn get_string(&self, key: &str, default: &str) -> String {
        self.get_raw(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    }

    /// Booleans accept `true/false`, `yes/no`, `on/off` and `1/0`.
    /// Anything else falls back to `default`.
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get_raw(key) {
            Some(v) => parse_bool(&v).unwrap_or(default),
            None => default
        }
    }
}

/// Parses the boolean spellings accepted in settings files and environment
/// variables.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None
    }
}

/// Credential verification service.
///
/// A rejected credential is `None`; a wrong password is not an error.
pub trait LoginService: Send + Sync {
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity>;

    /// Redeems a cookie token previously issued in [`Identity::cookie`].
    fn authenticate_token(&self, token: &str) -> Option<Identity>;
}
