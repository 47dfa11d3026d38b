//! # gitbroker Errors
//!
//! Error taxonomy shared by the storage layer and the context broker.
//!
//! - Uses `thiserror` for structured error definitions
//! - Named fields throughout so log lines carry the repository name
//!
//! A missing or unexported repository is not an error: the resolver reports
//! it as an outcome.

use thiserror::Error;

/// Repository storage errors
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Invalid repository name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    #[error("Git operation: {operation} on {name} failed: {reason}")]
    GitError {
        operation: String,
        name: String,
        reason: String
    },

    #[error("IO error on {path}: {reason}")]
    Io { path: String, reason: String },

    // Raised when the staged metadata batch could not be committed. Nothing
    // from the batch is visible in that case.
    #[error("Metadata update of {name} failed, no fields were applied: {reason}")]
    MetadataWriteFailed { name: String, reason: String }
}

/// Broker initialization faults
///
/// These must abort process startup rather than leave a half-built context.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to construct repository resolver at {root}: {reason}")]
    ResolverConstruction { root: String, reason: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to load settings: {reason}")]
    SettingsUnavailable { reason: String }
}
