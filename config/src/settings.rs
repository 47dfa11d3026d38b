//! # Stored Settings
//!
//! Ordered string map of dotted keys, the common currency between the file,
//! environment and CLI loaders.

use gb_core::SettingsProvider;
use std::collections::BTreeMap;
use std::fmt;

/// Settings loaded from one or more sources.
///
/// `source` names where the values came from and shows up in log lines,
/// e.g. `"file:/etc/gitbroker.toml"` or `"defaults+env"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredSettings {
    source: String,
    values: BTreeMap<String, String>
}

impl StoredSettings {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            values: BTreeMap::new()
        }
    }

    pub fn from_pairs<K, V>(
        source: impl Into<String>,
        pairs: impl IntoIterator<Item = (K, V)>
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>
    {
        let mut settings = Self::new(source);
        for (key, value) in pairs {
            settings.set(key, value);
        }
        settings
    }

    /// Builder-style [`StoredSettings::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }
}

impl SettingsProvider for StoredSettings {
    fn get_raw(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn source(&self) -> String {
        self.source.clone()
    }
}

impl fmt::Display for StoredSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} keys)", self.source, self.values.len())
    }
}
