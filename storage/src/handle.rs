use crate::metadata::{self, MetadataUpdate};
use crate::{git_error, io_error};
use chrono::{DateTime, Utc};
use errors::RepositoryError;
use gb_core::{FeatureFlags, RepositoryModel};
use git2::Repository;
use std::fmt;
use std::path::Path;

/// Open repository, owned by a single call.
///
/// The underlying `git2::Repository` is released when the handle is dropped,
/// on every exit path of the caller.
pub struct RepositoryHandle {
    name: String,
    repo: Repository
}

impl RepositoryHandle {
    pub(crate) fn new(name: impl Into<String>, repo: Repository) -> Self {
        Self {
            name: name.into(),
            repo
        }
    }

    /// Name the handle was resolved or created under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Raw access for callers that render repository content.
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    pub fn description(&self) -> Result<String, RepositoryError> {
        let configured = metadata::read_string(&self.repo, metadata::DESCRIPTION_KEY)
            .map_err(|e| git_error("read description", &self.name, &e))?
            .filter(|d| !d.trim().is_empty());

        Ok(configured.unwrap_or_else(|| metadata::read_description_file(self.git_dir())))
    }

    pub fn owner(&self) -> Result<String, RepositoryError> {
        Ok(metadata::read_string(&self.repo, metadata::OWNER_KEY)
            .map_err(|e| git_error("read owner", &self.name, &e))?
            .unwrap_or_default())
    }

    pub fn features(&self) -> Result<FeatureFlags, RepositoryError> {
        metadata::read_features(&self.repo).map_err(|e| git_error("read features", &self.name, &e))
    }

    /// Newest commit time over all references.
    ///
    /// A repository without commits reports the modification time of its git
    /// directory instead.
    pub fn last_change(&self) -> Result<DateTime<Utc>, RepositoryError> {
        let references = self
            .repo
            .references()
            .map_err(|e| git_error("list references", &self.name, &e))?;

        let newest = references
            .flatten()
            .filter_map(|reference| reference.peel_to_commit().ok())
            .map(|commit| commit.time().seconds())
            .max();

        if let Some(seconds) = newest {
            if let Some(when) = DateTime::from_timestamp(seconds, 0) {
                return Ok(when);
            }
        }

        let modified = std::fs::metadata(self.git_dir())
            .and_then(|m| m.modified())
            .map_err(|e| io_error(self.git_dir(), &e))?;
        Ok(DateTime::<Utc>::from(modified))
    }

    /// Snapshot of this repository's metadata.
    pub fn to_model(&self) -> Result<RepositoryModel, RepositoryError> {
        Ok(RepositoryModel {
            name: self.name.clone(),
            description: self.description()?,
            owner: self.owner()?,
            last_change: self.last_change()?,
            features: self.features()?
        })
    }

    /// Writes description, owner and feature flags as one batch.
    pub fn apply_metadata(&self, update: &MetadataUpdate) -> Result<(), RepositoryError> {
        metadata::write_batch(&self.name, self.git_dir(), update)
    }
}

impl fmt::Debug for RepositoryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepositoryHandle")
            .field("name", &self.name)
            .field("git_dir", &self.git_dir())
            .finish()
    }
}
