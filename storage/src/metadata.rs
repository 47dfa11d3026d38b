//! Repository metadata stored in the repository's local git config.
//!
//! Keys:
//! - `gitweb.description`, `gitweb.owner` (shared with gitweb-style tools)
//! - `gitbroker.useTickets`, `gitbroker.useDocs`, `gitbroker.useNamedUsers`
//!
//! The description falls back to the standard `description` file when the
//! config key is unset.

use crate::io_error;
use errors::RepositoryError;
use gb_core::{FeatureFlags, RepositoryModel};
use git2::{Config, ConfigLevel, ErrorCode, Repository};
use std::path::Path;
use tracing::debug;

pub const DESCRIPTION_KEY: &str = "gitweb.description";
pub const OWNER_KEY: &str = "gitweb.owner";
pub const USE_TICKETS_KEY: &str = "gitbroker.useTickets";
pub const USE_DOCS_KEY: &str = "gitbroker.useDocs";
pub const USE_NAMED_USERS_KEY: &str = "gitbroker.useNamedUsers";

const DESCRIPTION_FILE: &str = "description";

/// Text `git init` writes into a fresh `description` file.
const DESCRIPTION_PLACEHOLDER: &str = "Unnamed repository;";

/// One metadata batch: every field is written, or none is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetadataUpdate {
    pub description: String,
    pub owner: String,
    pub features: FeatureFlags
}

impl MetadataUpdate {
    pub fn from_model(model: &RepositoryModel) -> Self {
        Self {
            description: model.description.clone(),
            owner: model.owner.clone(),
            features: model.features
        }
    }
}

/// Local config of `repo`, or `None` when the repository has none yet.
fn local_config(repo: &Repository) -> Result<Option<Config>, git2::Error> {
    match repo.config()?.open_level(ConfigLevel::Local) {
        Ok(config) => Ok(Some(config)),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e)
    }
}

pub(crate) fn read_string(repo: &Repository, key: &str) -> Result<Option<String>, git2::Error> {
    let Some(config) = local_config(repo)? else {
        return Ok(None);
    };
    match config.get_string(key) {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
        Err(e) => Err(e)
    }
}

pub(crate) fn read_bool(repo: &Repository, key: &str) -> Result<bool, git2::Error> {
    let Some(config) = local_config(repo)? else {
        return Ok(false);
    };
    match config.get_bool(key) {
        Ok(value) => Ok(value),
        Err(e) if e.code() == ErrorCode::NotFound => Ok(false),
        Err(e) => Err(e)
    }
}

pub(crate) fn read_features(repo: &Repository) -> Result<FeatureFlags, git2::Error> {
    Ok(FeatureFlags {
        use_tickets: read_bool(repo, USE_TICKETS_KEY)?,
        use_docs: read_bool(repo, USE_DOCS_KEY)?,
        use_named_users: read_bool(repo, USE_NAMED_USERS_KEY)?
    })
}

/// Contents of the `description` file, ignoring the `git init` placeholder.
pub(crate) fn read_description_file(git_dir: &Path) -> String {
    std::fs::read_to_string(git_dir.join(DESCRIPTION_FILE))
        .map(|s| s.trim().to_string())
        .ok()
        .filter(|s| !s.starts_with(DESCRIPTION_PLACEHOLDER))
        .unwrap_or_default()
}

/// Writes `update` into the local config of the repository at `git_dir`.
///
/// The current config is copied to a staging file next to it, the batch is
/// written there, and the staging file is renamed over the config. A failure
/// at any step leaves the original config untouched.
pub(crate) fn write_batch(
    name: &str,
    git_dir: &Path,
    update: &MetadataUpdate
) -> Result<(), RepositoryError> {
    let failed = |reason: String| RepositoryError::MetadataWriteFailed {
        name: name.to_string(),
        reason
    };

    let config_path = git_dir.join("config");
    let staged = tempfile::Builder::new()
        .prefix("config.")
        .suffix(".staged")
        .tempfile_in(git_dir)
        .map_err(|e| io_error(git_dir, &e))?
        .into_temp_path();

    if config_path.exists() {
        std::fs::copy(&config_path, &staged).map_err(|e| failed(e.to_string()))?;
    }

    {
        let mut config = Config::open(&staged).map_err(|e| failed(e.message().to_string()))?;
        let mut write = || -> Result<(), git2::Error> {
            config.set_str(DESCRIPTION_KEY, &update.description)?;
            config.set_str(OWNER_KEY, &update.owner)?;
            config.set_bool(USE_TICKETS_KEY, update.features.use_tickets)?;
            config.set_bool(USE_DOCS_KEY, update.features.use_docs)?;
            config.set_bool(USE_NAMED_USERS_KEY, update.features.use_named_users)
        };
        write().map_err(|e| failed(e.message().to_string()))?;
    }

    staged
        .persist(&config_path)
        .map_err(|e| failed(e.error.to_string()))?;

    debug!(repository = name, "Metadata batch committed");
    Ok(())
}
