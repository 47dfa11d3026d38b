//! Name → repository resolution under one root folder.

use crate::discovery::{self, git_dir, is_exported};
use crate::handle::RepositoryHandle;
use crate::{git_error, io_error};
use errors::RepositoryError;
use git2::{ErrorCode, Repository, RepositoryInitOptions};
use std::fmt;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, trace};

/// Outcome of resolving a repository name.
///
/// "Does not exist" and "exists but is not served" are kept apart so callers
/// can offer to create the former and refuse the latter.
pub enum Resolution {
    Found(RepositoryHandle),
    NotFound,
    NotEnabled
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn found(self) -> Option<RepositoryHandle> {
        match self {
            Self::Found(handle) => Some(handle),
            Self::NotFound | Self::NotEnabled => None
        }
    }
}

impl fmt::Debug for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Found(handle) => f.debug_tuple("Found").field(&handle.name()).finish(),
            Self::NotFound => write!(f, "NotFound"),
            Self::NotEnabled => write!(f, "NotEnabled")
        }
    }
}

/// Resolves repositories stored as directories under `root`.
///
/// A name maps to `root/<name>` or, failing that, `root/<name>.git`. With
/// `export_all` off, only repositories carrying the export marker are
/// served; others resolve to [`Resolution::NotEnabled`].
#[derive(Debug, Clone)]
pub struct FileResolver {
    root: PathBuf,
    export_all: bool
}

impl FileResolver {
    /// Binds a resolver to `root`.
    ///
    /// A missing root is accepted: it lists as empty and is created by the
    /// first `create_repository`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Io` if `root` exists but is not a directory.
    pub fn new(root: impl Into<PathBuf>, export_all: bool) -> Result<Self, RepositoryError> {
        let root = root.into();
        if root.exists() && !root.is_dir() {
            let err = std::io::Error::other("not a directory");
            return Err(io_error(&root, &err));
        }
        if !root.exists() {
            info!(root = %root.display(), "Repositories folder does not exist yet");
        }

        Ok(Self { root, export_all })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn export_all(&self) -> bool {
        self.export_all
    }

    /// Opens the repository called `name`.
    ///
    /// Unsafe names (absolute, `..`, empty segments) resolve to
    /// [`Resolution::NotFound`] rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::GitError` when the directory looks like a
    /// repository but git cannot open it.
    pub fn open(&self, name: &str) -> Result<Resolution, RepositoryError> {
        if let Err(reason) = validate_name(name) {
            trace!(repository = name, reason, "Rejected repository name");
            return Ok(Resolution::NotFound);
        }

        let Some((path, git_dir)) = self.locate(name) else {
            return Ok(Resolution::NotFound);
        };

        if !self.export_all && !is_exported(&git_dir) {
            return Ok(Resolution::NotEnabled);
        }

        match Repository::open(&path) {
            Ok(repo) => Ok(Resolution::Found(RepositoryHandle::new(name, repo))),
            // Deleted between the directory check and the open.
            Err(e) if e.code() == ErrorCode::NotFound => Ok(Resolution::NotFound),
            Err(e) => Err(git_error("open", name, &e))
        }
    }

    fn locate(&self, name: &str) -> Option<(PathBuf, PathBuf)> {
        let exact = self.root.join(name);
        if let Some(dir) = git_dir(&exact) {
            return Some((exact, dir));
        }
        if name.ends_with(".git") {
            return None;
        }
        let suffixed = self.root.join(format!("{name}.git"));
        git_dir(&suffixed).map(|dir| (suffixed, dir))
    }

    /// Initialises a repository at `root/<name>`.
    ///
    /// An existing repository at that path is re-initialised by git, which
    /// leaves its content in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidName` for unsafe names and
    /// `RepositoryError::GitError` when git fails to initialise.
    pub fn create_repository(
        &self,
        name: &str,
        bare: bool
    ) -> Result<RepositoryHandle, RepositoryError> {
        validate_name(name).map_err(|reason| RepositoryError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string()
        })?;

        let path = self.root.join(name);
        let mut opts = RepositoryInitOptions::new();
        opts.bare(bare).mkpath(true);

        let repo = Repository::init_opts(&path, &opts).map_err(|e| git_error("init", name, &e))?;
        debug!(repository = name, bare, path = %path.display(), "Initialised repository");
        Ok(RepositoryHandle::new(name, repo))
    }

    /// Names of all served repositories, see
    /// [`discovery::list_repository_names`].
    pub fn list_names(&self, nested: bool) -> Result<Vec<String>, RepositoryError> {
        discovery::list_repository_names(&self.root, self.export_all, nested)
    }
}

fn validate_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("name is empty");
    }
    if name.contains('\\') || name.contains('\0') {
        return Err("name contains a forbidden character");
    }
    if name.split('/').any(str::is_empty) {
        return Err("name has an empty path segment");
    }
    if name.split('/').any(|segment| segment == "." || segment == "..") {
        return Err("name must be a relative path without . or .. segments");
    }
    let all_normal = Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if !all_normal {
        return Err("name must be a relative path without . or .. segments");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("demo").is_ok());
        assert!(validate_name("team/demo.git").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("/etc/passwd").is_err());
        assert!(validate_name("../outside").is_err());
        assert!(validate_name("team/../demo").is_err());
        assert!(validate_name("team//demo").is_err());
        assert!(validate_name("./demo").is_err());
        assert!(validate_name("team/./demo").is_err());
        assert!(validate_name("team/.").is_err());
        assert!(validate_name("team/.hidden.git").is_ok());
        assert!(validate_name("team\\demo").is_err());
    }

    #[test]
    fn test_resolution_helpers() {
        assert!(!Resolution::NotFound.is_found());
        assert!(Resolution::NotEnabled.found().is_none());
        assert_eq!(format!("{:?}", Resolution::NotEnabled), "NotEnabled");
    }
}
