use errors::{RepositoryError, SetupError};
use thiserror::Error;

/// Context broker error types.
#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("Context broker used before setup")]
    NotInitialized,

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error("Cookie token issued for {username} is not a valid header value")]
    InvalidCookieValue { username: String }
}
