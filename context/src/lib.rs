//! Context broker for gitbroker.
//!
//! One [`ContextBroker`] per process sits between the web front end and the
//! repositories folder. It:
//!
//! 1. Is set up once from a settings provider (later setups are no-ops)
//! 2. Resolves, lists, creates and edits repositories through a
//!    [`storage::FileResolver`]
//! 3. Authenticates users by password or persistent cookie through a
//!    pluggable [`gb_core::LoginService`]
//!
//! The broker is an explicit object: construct it at startup, wrap it in an
//! `Arc` and hand it to request handlers.
//!
//! # Example
//!
//! ```rust,ignore
//! use context::ContextBroker;
//! use std::sync::Arc;
//!
//! let broker = Arc::new(ContextBroker::new());
//! broker.setup(Arc::new(settings))?;
//! broker.set_login_service(Arc::new(my_login_service));
//!
//! for repo in broker.list_repositories()? {
//!     println!("{} ({})", repo.name, broker.clone_url_for(&repo.name));
//! }
//! ```

mod auth;
mod broker;
mod error;
mod repositories;

pub use auth::cookies_from_headers;
pub use broker::ContextBroker;
pub use error::BrokerError;
pub use repositories::EditOutcome;
pub use storage::{RepositoryHandle, Resolution};
