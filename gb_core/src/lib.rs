//! # gitbroker Core
//!
//! Shared types and traits for the gitbroker repository broker.
//!
//! This crate provides:
//! - Repository descriptors and feature flags
//! - Authenticated identities and the persistent login cookie
//! - The collaborator seams: settings lookup and login verification
//!
//! # Best Practices
//!
//! - Uses Rust Edition 2024
//! - Collaborators are synchronous trait objects (`Send + Sync`) so one
//!   broker can be shared across request threads

pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use traits::{LoginService, SettingsProvider, parse_bool};
pub use types::{
    AUTH_COOKIE_MAX_AGE, AUTH_COOKIE_NAME, AUTH_COOKIE_PATH, Cookie, FeatureFlags, Identity,
    RepositoryModel
};
