use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, Response};
use gb_core::{AUTH_COOKIE_NAME, Cookie, Identity};
use tracing::{debug, info};

use crate::broker::ContextBroker;
use crate::error::BrokerError;

impl ContextBroker {
    /// Checks `username`/`password` against the login service.
    ///
    /// Returns `None` when the credentials are rejected or no login service
    /// is installed.
    pub fn authenticate_by_credential(&self, username: &str, password: &str) -> Option<Identity> {
        let Some(service) = self.login_service() else {
            debug!(username, "No login service installed, rejecting credentials");
            return None;
        };

        let identity = service.authenticate(username, password);
        match &identity {
            Some(_) => info!(username, "Authenticated by credentials"),
            None => debug!(username, "Credentials rejected")
        }
        identity
    }

    /// Authenticates from the first `gitbroker` cookie among `cookies`.
    ///
    /// Other cookies are ignored. Returns `None` without consulting the
    /// login service when no such cookie is present.
    pub fn authenticate_by_cookies(&self, cookies: &[Cookie]) -> Option<Identity> {
        let cookie = cookies.iter().find(|c| c.name == AUTH_COOKIE_NAME)?;
        let Some(service) = self.login_service() else {
            debug!("No login service installed, ignoring auth cookie");
            return None;
        };

        let identity = service.authenticate_token(&cookie.value);
        match &identity {
            Some(identity) => debug!(username = %identity.username, "Authenticated by cookie"),
            None => debug!("Auth cookie rejected")
        }
        identity
    }

    /// [`ContextBroker::authenticate_by_cookies`] over the `Cookie` headers
    /// of a request.
    pub fn authenticate_request(&self, headers: &HeaderMap) -> Option<Identity> {
        self.authenticate_by_cookies(&cookies_from_headers(headers))
    }

    /// Attaches the persistent auth cookie for `identity` to `response`.
    ///
    /// The cookie lives at path `/` for the maximum 32-bit age. Other headers
    /// on the response are left alone.
    ///
    /// # Errors
    ///
    /// `BrokerError::InvalidCookieValue` if the login service issued a token
    /// that cannot appear in a header.
    pub fn issue_cookie<B>(
        &self,
        response: &mut Response<B>,
        identity: &Identity
    ) -> Result<(), BrokerError> {
        let header = Cookie::for_identity(identity).to_set_cookie_header();
        let value =
            HeaderValue::from_str(&header).map_err(|_| BrokerError::InvalidCookieValue {
                username: identity.username.clone()
            })?;

        response.headers_mut().append(SET_COOKIE, value);
        debug!(username = %identity.username, "Issued auth cookie");
        Ok(())
    }
}

/// Parses every `Cookie` header into name/value pairs, in header order.
///
/// Malformed pairs without `=` are skipped. Surrounding double quotes on a
/// value are removed.
pub fn cookies_from_headers(headers: &HeaderMap) -> Vec<Cookie> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|line| line.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            Some(Cookie::new(name, value))
        })
        .collect()
}
