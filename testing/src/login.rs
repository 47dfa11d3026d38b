use gb_core::{Identity, LoginService};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Login service backed by a fixed username → password table.
///
/// Every successful password check issues a fresh random token that
/// `authenticate_token` redeems for the same user.
#[derive(Default)]
pub struct InMemoryLoginService {
    passwords: HashMap<String, String>,
    tokens: RwLock<HashMap<String, String>>,
    calls: AtomicUsize
}

impl InMemoryLoginService {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(mut self, username: &str, password: &str) -> Self {
        self.passwords
            .insert(username.to_string(), password.to_string());
        self
    }

    /// Registers `token` for `username` without a password check.
    pub fn grant_token(&self, username: &str, token: &str) {
        self.tokens
            .write()
            .insert(token.to_string(), username.to_string());
    }

    /// Number of `authenticate` and `authenticate_token` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LoginService for InMemoryLoginService {
    fn authenticate(&self, username: &str, password: &str) -> Option<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.passwords.get(username).map(String::as_str) != Some(password) {
            return None;
        }

        let token = uuid::Uuid::new_v4().simple().to_string();
        self.grant_token(username, &token);
        Some(Identity::new(username, token))
    }

    fn authenticate_token(&self, token: &str) -> Option<Identity> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tokens
            .read()
            .get(token)
            .map(|username| Identity::new(username.clone(), token))
    }
}
