//! Repository discovery under a root folder.

use crate::io_error;
use errors::RepositoryError;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

/// Marker file that exports a single repository when export-all is off.
pub const EXPORT_MARKER: &str = "git-daemon-export-ok";

/// Returns the git directory of the repository at `path`, if any.
///
/// Bare repositories are their own git directory; working copies carry a
/// `.git` directory.
pub fn git_dir(path: &Path) -> Option<PathBuf> {
    if looks_like_git_dir(path) {
        return Some(path.to_path_buf());
    }
    let dot_git = path.join(".git");
    looks_like_git_dir(&dot_git).then_some(dot_git)
}

fn looks_like_git_dir(path: &Path) -> bool {
    path.join("HEAD").is_file() && path.join("objects").is_dir() && path.join("refs").is_dir()
}

pub fn is_exported(git_dir: &Path) -> bool {
    git_dir.join(EXPORT_MARKER).exists()
}

/// Lists repository names under `root`.
///
/// Names are relative to `root`, `/` separated, in traversal order (sorted by
/// file name within each directory). A repository directory is never
/// descended into, so repositories inside repositories are not reported.
/// Symlinked repositories are listed under the link's name; link cycles are
/// skipped with a warning. A missing root yields an empty list.
pub fn list_repository_names(
    root: &Path,
    export_all: bool,
    nested: bool
) -> Result<Vec<String>, RepositoryError> {
    if !root.is_dir() {
        debug!(root = %root.display(), "Repositories folder missing, nothing to list");
        return Ok(Vec::new());
    }

    let max_depth = if nested { usize::MAX } else { 1 };
    let mut names = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if e.depth() == 0 {
                    let io = std::io::Error::other(e.to_string());
                    return Err(io_error(root, &io));
                }
                warn!(error = %e, "Skipping unreadable entry while listing repositories");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(git_dir) = git_dir(entry.path()) else {
            continue;
        };
        walker.skip_current_dir();

        let Some(name) = relative_name(root, entry.path()) else {
            warn!(path = %entry.path().display(), "Skipping repository with non UTF-8 path");
            continue;
        };

        if export_all || is_exported(&git_dir) {
            names.push(name);
        } else {
            trace!(repository = %name, "Repository not exported, skipping");
        }
    }

    debug!(root = %root.display(), count = names.len(), nested, "Listed repositories");
    Ok(names)
}

fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Option<Vec<&str>> = relative
        .components()
        .map(|c| c.as_os_str().to_str())
        .collect();
    Some(parts?.join("/"))
}
