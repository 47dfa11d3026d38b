use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Name of the persistent login cookie.
pub const AUTH_COOKIE_NAME: &str = "gitbroker";

/// Path the login cookie is scoped to.
pub const AUTH_COOKIE_PATH: &str = "/";

/// Max-Age of the login cookie, in seconds. Effectively unbounded.
pub const AUTH_COOKIE_MAX_AGE: i64 = i32::MAX as i64;

/// Per-repository feature switches stored alongside the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub use_tickets: bool,
    pub use_docs: bool,
    pub use_named_users: bool
}

/// Point-in-time snapshot of a repository's metadata.
///
/// A model is never a live handle: the repository may change or disappear
/// right after it was produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryModel {
    /// Path relative to the repositories folder, `/` separated when nested.
    pub name: String,
    pub description: String,
    pub owner: String,
    pub last_change: DateTime<Utc>,
    #[serde(default)]
    pub features: FeatureFlags
}

impl RepositoryModel {
    /// Model used as input to create or edit calls, where `last_change` is
    /// ignored by the storage layer.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        owner: impl Into<String>
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            owner: owner.into(),
            last_change: DateTime::<Utc>::UNIX_EPOCH,
            features: FeatureFlags::default()
        }
    }

    #[must_use]
    pub fn with_features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }
}

/// Principal produced by a successful credential or token check.
///
/// `cookie` is opaque to the broker; only the login service that issued it
/// can redeem it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub cookie: String
}

impl Identity {
    pub fn new(username: impl Into<String>, cookie: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            cookie: cookie.into()
        }
    }
}

/// A request cookie as presented by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into()
        }
    }

    /// Builds the persistent login cookie for an identity.
    pub fn for_identity(identity: &Identity) -> Self {
        Self::new(AUTH_COOKIE_NAME, identity.cookie.clone())
    }

    /// Renders the `Set-Cookie` header value for the persistent login cookie.
    pub fn to_set_cookie_header(&self) -> String {
        format!(
            "{}={}; Path={}; Max-Age={}",
            self.name, self.value, AUTH_COOKIE_PATH, AUTH_COOKIE_MAX_AGE
        )
    }
}
