//! Shared test fixtures for the gitbroker workspace.
//!
//! - `RepositoryRootFixture`: a temporary repositories folder with helpers to
//!   create bare, working-copy, nested and exported repositories and commits
//! - `InMemoryLoginService`: a `LoginService` with a fixed user table that
//!   issues random cookie tokens
//!
//! Fixtures panic on setup failures; they are only meant for tests.

mod login;
mod repositories;

pub use login::InMemoryLoginService;
pub use repositories::RepositoryRootFixture;
