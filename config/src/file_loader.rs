//! # Configuration File Loading
//!
//! Loads settings from TOML or YAML files.
//!
//! Supports automatic format detection based on file extension. Nested tables
//! are flattened into dotted keys, so
//!
//! ```toml
//! [git]
//! exportAll = false
//! ```
//!
//! becomes `git.exportAll = "false"`.

use crate::settings::StoredSettings;
use std::path::Path;

/// Configuration file loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlParse(String),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(String),

    #[error("Config file has no extension")]
    NoExtension,

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported value for key {0}: only scalars and tables are allowed")]
    UnsupportedValue(String)
}

/// Load settings from TOML file.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Loads broker settings from a TOML format file.
///
/// ## Usage
/// ```rust,no_run
/// use config::load_from_toml;
/// use gb_core::SettingsProvider;
/// use std::path::Path;
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let settings = load_from_toml(Path::new("gitbroker.toml"))?;
///     println!("Repositories: {}", settings.get_string("git.repositoriesFolder", "repos"));
///     Ok(())
/// }
/// ```
///
/// ## Error Handling
/// Returns `ConfigFileError` for:
/// - File not found
/// - Other read failures (`Io`)
/// - Invalid TOML syntax
/// - Array values
pub fn load_from_toml(path: &Path) -> Result<StoredSettings, ConfigFileError> {
    let contents = read_config(path)?;

    let table: toml::Table =
        toml::from_str(&contents).map_err(|e| ConfigFileError::TomlParse(e.to_string()))?;

    let mut settings = StoredSettings::new(format!("file:{}", path.display()));
    flatten_toml("", &table, &mut settings)?;
    Ok(settings)
}

/// Load settings from YAML file.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Loads broker settings from a YAML format file.
///
/// ## Error Handling
/// Returns `ConfigFileError` for:
/// - File not found
/// - Invalid YAML syntax
/// - Sequence or tagged values
pub fn load_from_yaml(path: &Path) -> Result<StoredSettings, ConfigFileError> {
    let contents = read_config(path)?;

    let value: serde_yaml::Value =
        serde_yaml::from_str(&contents).map_err(|e| ConfigFileError::YamlParse(e.to_string()))?;

    let mut settings = StoredSettings::new(format!("file:{}", path.display()));
    flatten_yaml("", &value, &mut settings)?;
    Ok(settings)
}

/// Load settings from file with auto-detection.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Loads settings from file, automatically detecting format from extension.
///
/// ## Supported Formats
/// - `.toml`: TOML format
/// - `.yaml`: YAML format
/// - `.yml`: YAML format
///
/// ## Error Handling
/// Returns `ConfigFileError` for:
/// - File not found
/// - Invalid file extension
/// - Parse errors for detected format
pub fn load_from_file(path: &Path) -> Result<StoredSettings, ConfigFileError> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or(ConfigFileError::NoExtension)?;

    match extension.to_lowercase().as_str() {
        "toml" => load_from_toml(path),
        "yaml" | "yml" => load_from_yaml(path),
        other => Err(ConfigFileError::UnsupportedFormat(other.to_string()))
    }
}

fn read_config(path: &Path) -> Result<String, ConfigFileError> {
    match std::fs::read_to_string(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ConfigFileError::FileNotFound(path.display().to_string()))
        }
        other => Ok(other?)
    }
}

fn join_key(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn flatten_toml(
    prefix: &str,
    table: &toml::Table,
    out: &mut StoredSettings
) -> Result<(), ConfigFileError> {
    for (key, value) in table {
        let full_key = join_key(prefix, key);
        match value {
            toml::Value::Table(nested) => flatten_toml(&full_key, nested, out)?,
            toml::Value::String(s) => {
                out.set(full_key, s.clone());
            }
            toml::Value::Integer(i) => {
                out.set(full_key, i.to_string());
            }
            toml::Value::Float(f) => {
                out.set(full_key, f.to_string());
            }
            toml::Value::Boolean(b) => {
                out.set(full_key, b.to_string());
            }
            toml::Value::Datetime(d) => {
                out.set(full_key, d.to_string());
            }
            toml::Value::Array(_) => return Err(ConfigFileError::UnsupportedValue(full_key))
        }
    }
    Ok(())
}

fn flatten_yaml(
    prefix: &str,
    value: &serde_yaml::Value,
    out: &mut StoredSettings
) -> Result<(), ConfigFileError> {
    use serde_yaml::Value;

    match value {
        Value::Mapping(map) => {
            for (key, nested) in map {
                let key = match key {
                    Value::String(s) => s.clone(),
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    _ => return Err(ConfigFileError::UnsupportedValue(prefix.to_string()))
                };
                flatten_yaml(&join_key(prefix, &key), nested, out)?;
            }
        }
        // An empty document or a bare `key:` carries no setting.
        Value::Null => {}
        Value::String(s) => {
            out.set(prefix, s.clone());
        }
        Value::Bool(b) => {
            out.set(prefix, b.to_string());
        }
        Value::Number(n) => {
            out.set(prefix, n.to_string());
        }
        Value::Sequence(_) | Value::Tagged(_) => {
            return Err(ConfigFileError::UnsupportedValue(prefix.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;
    use gb_core::SettingsProvider;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.toml");

        let toml_content = r#"
[git]
repositoriesFolder = "/srv/git"
exportAll = false
nestedRepositories = true
cloneUrl = "https://git.example.com/r/"

[web]
debugMode = true
"#;
        fs::write(&path, toml_content).unwrap();

        let settings = load_from_toml(&path).unwrap();
        assert_eq!(settings.get(keys::git::REPOSITORIES_FOLDER), Some("/srv/git"));
        assert_eq!(settings.get(keys::git::EXPORT_ALL), Some("false"));
        assert_eq!(settings.get(keys::git::NESTED_REPOSITORIES), Some("true"));
        assert_eq!(
            settings.get(keys::git::CLONE_URL),
            Some("https://git.example.com/r/")
        );
        assert!(settings.get_bool(keys::web::DEBUG_MODE, false));
        assert!(settings.source().starts_with("file:"));
    }

    #[test]
    fn test_load_from_toml_dotted_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.toml");
        fs::write(&path, "\"git.exportAll\" = false\nweb.debugMode = true\n").unwrap();

        let settings = load_from_toml(&path).unwrap();
        assert_eq!(settings.get(keys::git::EXPORT_ALL), Some("false"));
        assert_eq!(settings.get(keys::web::DEBUG_MODE), Some("true"));
    }

    #[test]
    fn test_load_from_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.yaml");

        let yaml_content = r#"
git:
  repositoriesFolder: /srv/git
  exportAll: false
  cloneUrl: ssh://git@example.com/
web:
  debugMode: true
"#;
        fs::write(&path, yaml_content).unwrap();

        let settings = load_from_yaml(&path).unwrap();
        assert_eq!(settings.get(keys::git::REPOSITORIES_FOLDER), Some("/srv/git"));
        assert_eq!(settings.get(keys::git::EXPORT_ALL), Some("false"));
        assert_eq!(settings.get(keys::git::CLONE_URL), Some("ssh://git@example.com/"));
        assert_eq!(settings.get(keys::web::DEBUG_MODE), Some("true"));
        assert!(!settings.contains(keys::git::NESTED_REPOSITORIES));
    }

    #[test]
    fn test_load_from_yaml_empty_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.yml");
        fs::write(&path, "").unwrap();

        let settings = load_from_file(&path).unwrap();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_load_from_file_unsupported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.json");
        fs::write(&path, "{}").unwrap();

        let result = load_from_file(&path);
        assert!(matches!(result, Err(ConfigFileError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_from_file_no_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker");
        fs::write(&path, "").unwrap();

        let result = load_from_file(&path);
        assert!(matches!(result, Err(ConfigFileError::NoExtension)));
    }

    #[test]
    fn test_load_from_toml_rejects_arrays() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.toml");
        fs::write(&path, "[git]\nrepositoriesFolder = [\"a\", \"b\"]\n").unwrap();

        match load_from_toml(&path) {
            Err(ConfigFileError::UnsupportedValue(key)) => {
                assert_eq!(key, keys::git::REPOSITORIES_FOLDER);
            }
            other => panic!("unexpected result: {other:?}")
        }
    }

    #[test]
    fn test_load_from_toml_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.toml");
        fs::write(&path, "[invalid\n").unwrap();

        let result = load_from_toml(&path);
        assert!(matches!(result, Err(ConfigFileError::TomlParse(_))));
    }

    #[test]
    fn test_load_from_yaml_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.yaml");
        fs::write(&path, "invalid: [unmatched\n").unwrap();

        let result = load_from_yaml(&path);
        assert!(matches!(result, Err(ConfigFileError::YamlParse(_))));
    }

    #[test]
    fn test_load_from_toml_not_found() {
        let path = Path::new("/nonexistent/path/gitbroker.toml");
        let result = load_from_toml(path);
        assert!(matches!(result, Err(ConfigFileError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_toml_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gitbroker.toml");
        fs::create_dir(&path).unwrap();

        let result = load_from_toml(&path);
        assert!(matches!(result, Err(ConfigFileError::Io(_))));
    }
}
