//! # Setting Keys
//!
//! Dotted keys understood by the broker, grouped by section, with the
//! defaults applied when a key is absent.

/// Repository storage settings (`[git]` section in files).
pub mod git {
    /// Directory scanned for repositories.
    pub const REPOSITORIES_FOLDER: &str = "git.repositoriesFolder";
    /// Serve every repository, even without a `git-daemon-export-ok` marker.
    pub const EXPORT_ALL: &str = "git.exportAll";
    /// Scan subdirectories of the repositories folder for nested repositories.
    pub const NESTED_REPOSITORIES: &str = "git.nestedRepositories";
    /// Prefix used to build clone URLs.
    pub const CLONE_URL: &str = "git.cloneUrl";

    pub const DEFAULT_REPOSITORIES_FOLDER: &str = "repos";
    pub const DEFAULT_EXPORT_ALL: bool = true;
    pub const DEFAULT_NESTED_REPOSITORIES: bool = true;
    pub const DEFAULT_CLONE_URL: &str = "https://localhost/git/";
}

/// Web front end settings (`[web]` section in files).
pub mod web {
    pub const DEBUG_MODE: &str = "web.debugMode";

    pub const DEFAULT_DEBUG_MODE: bool = false;
}

/// Every key the broker reads, in documentation order.
pub const ALL: [&str; 5] = [
    git::REPOSITORIES_FOLDER,
    git::EXPORT_ALL,
    git::NESTED_REPOSITORIES,
    git::CLONE_URL,
    web::DEBUG_MODE
];
