//! # Repository Storage
//!
//! Git-backed repository resolver for the broker.
//!
//! This crate provides:
//! - `FileResolver`: name → repository resolution under one root folder,
//!   honoring the export policy
//! - Repository discovery (flat or nested) for listings
//! - `RepositoryHandle`: an owned, scoped handle with metadata accessors
//! - Atomic metadata updates stored in the repository's local config
//!
//! All operations are synchronous and use `git2` directly.

pub mod discovery;
pub mod handle;
pub mod metadata;
pub mod resolver;

pub use discovery::{EXPORT_MARKER, list_repository_names};
pub use handle::RepositoryHandle;
pub use metadata::MetadataUpdate;
pub use resolver::{FileResolver, Resolution};

use errors::RepositoryError;

pub(crate) fn git_error(operation: &str, name: &str, err: &git2::Error) -> RepositoryError {
    RepositoryError::GitError {
        operation: operation.to_string(),
        name: name.to_string(),
        reason: err.message().to_string()
    }
}

pub(crate) fn io_error(path: &std::path::Path, err: &std::io::Error) -> RepositoryError {
    RepositoryError::Io {
        path: path.display().to_string(),
        reason: err.to_string()
    }
}
