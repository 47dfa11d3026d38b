use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use config::{BrokerConfig, keys};
use errors::SetupError;
use gb_core::{LoginService, SettingsProvider};
use parking_lot::RwLock;
use storage::FileResolver;
use tracing::{info, warn};

use crate::error::BrokerError;

/// State fixed by `setup`. Read without locking afterwards.
pub(crate) struct ContextState {
    pub(crate) settings: Arc<dyn SettingsProvider>,
    pub(crate) config: BrokerConfig,
    pub(crate) resolver: FileResolver
}

/// Process-wide broker between the web layer, the repositories folder and
/// the login service.
///
/// # Lifecycle
///
/// 1. `ContextBroker::new()`: empty, every repository operation returns
///    [`BrokerError::NotInitialized`]
/// 2. `setup(settings)`: builds the resolver; later calls are logged no-ops
/// 3. `set_login_service(service)`: any time, last write wins
/// 4. `shutdown()`: logs the teardown
pub struct ContextBroker {
    state: OnceLock<ContextState>,
    login_service: RwLock<Option<Arc<dyn LoginService>>>
}

impl Default for ContextBroker {
    fn default() -> Self {
        Self::new()
    }
}

impl ContextBroker {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: OnceLock::new(),
            login_service: RwLock::new(None)
        }
    }

    /// Sets the broker up from `settings`.
    ///
    /// Reads the repositories folder, export policy, nesting, clone URL and
    /// debug flag, then binds a resolver to the folder. Calling this again
    /// after a successful setup changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` if the settings are invalid or the resolver
    /// cannot be constructed. The caller must not keep serving requests.
    pub fn setup(&self, settings: Arc<dyn SettingsProvider>) -> Result<(), SetupError> {
        if let Some(state) = self.state.get() {
            info!(
                current = %state.settings.source(),
                ignored = %settings.source(),
                "Context already set up, ignoring setup request"
            );
            return Ok(());
        }

        info!(source = %settings.source(), "Setting up context");
        let config = BrokerConfig::from_settings(settings.as_ref());
        config::validate(&config)?;

        let resolver = FileResolver::new(config.repositories_path(), config.export_all).map_err(
            |e| SetupError::ResolverConstruction {
                root: config.repositories_folder.clone(),
                reason: e.to_string()
            }
        )?;

        info!(
            root = %resolver.root().display(),
            export_all = config.export_all,
            nested = config.nested_repositories,
            "Repository resolver ready"
        );

        let state = ContextState {
            settings,
            config,
            resolver
        };
        if self.state.set(state).is_err() {
            warn!("Context set up concurrently, keeping the first setup");
        }
        Ok(())
    }

    /// Host-driven initialization.
    ///
    /// When the broker was already set up explicitly, logs who did it and
    /// leaves `load` uncalled. Otherwise loads settings with `load` and runs
    /// [`ContextBroker::setup`].
    ///
    /// # Errors
    ///
    /// `SetupError::SettingsUnavailable` when `load` fails, otherwise as
    /// [`ContextBroker::setup`].
    pub fn initialize<F, E>(&self, load: F) -> Result<(), SetupError>
    where
        F: FnOnce() -> Result<Arc<dyn SettingsProvider>, E>,
        E: fmt::Display
    {
        info!("Context initialization requested by host");
        if let Some(state) = self.state.get() {
            info!(source = %state.settings.source(), "Context already set up");
            return Ok(());
        }

        let settings = load().map_err(|e| SetupError::SettingsUnavailable {
            reason: e.to_string()
        })?;
        self.setup(settings)
    }

    /// Host-driven teardown. State is released with the broker itself.
    pub fn shutdown(&self) {
        info!("Context destroyed by host");
    }

    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    /// Settings the broker was set up from, if any.
    pub fn settings(&self) -> Option<Arc<dyn SettingsProvider>> {
        self.state.get().map(|state| Arc::clone(&state.settings))
    }

    /// Typed snapshot of the settings taken at setup.
    pub fn config(&self) -> Option<&BrokerConfig> {
        self.state.get().map(|state| &state.config)
    }

    pub fn repositories_folder(&self) -> Option<&Path> {
        self.state.get().map(|state| state.resolver.root())
    }

    /// `web.debugMode`; false until set up.
    pub fn is_debug_mode(&self) -> bool {
        self.state
            .get()
            .is_some_and(|state| state.config.debug_mode)
    }

    /// `<git.cloneUrl><name>`.
    pub fn clone_url_for(&self, name: &str) -> String {
        let template = self
            .state
            .get()
            .map_or(keys::git::DEFAULT_CLONE_URL, |state| state.config.clone_url.as_str());
        format!("{template}{name}")
    }

    /// Replaces the login service. Requests already authenticating keep the
    /// service they started with.
    pub fn set_login_service(&self, service: Arc<dyn LoginService>) {
        *self.login_service.write() = Some(service);
        info!("Login service replaced");
    }

    pub(crate) fn login_service(&self) -> Option<Arc<dyn LoginService>> {
        self.login_service.read().clone()
    }

    pub(crate) fn state(&self) -> Result<&ContextState, BrokerError> {
        self.state.get().ok_or(BrokerError::NotInitialized)
    }
}

impl fmt::Debug for ContextBroker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBroker")
            .field("config", &self.config())
            .field("login_service", &self.login_service.read().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::StoredSettings;
    use testing::RepositoryRootFixture;

    #[test]
    fn test_defaults_before_setup() {
        let broker = ContextBroker::new();

        assert!(!broker.is_initialized());
        assert!(!broker.is_debug_mode());
        assert!(broker.settings().is_none());
        assert_eq!(broker.clone_url_for("demo"), "https://localhost/git/demo");
        assert!(matches!(broker.state(), Err(BrokerError::NotInitialized)));
    }

    #[test]
    fn test_setup_reads_settings() {
        let fixture = RepositoryRootFixture::new();
        let settings = fixture
            .settings()
            .with(keys::git::CLONE_URL, "ssh://git@example.com/")
            .with(keys::web::DEBUG_MODE, "true");

        let broker = ContextBroker::new();
        broker.setup(Arc::new(settings)).unwrap();

        assert!(broker.is_initialized());
        assert!(broker.is_debug_mode());
        assert_eq!(broker.clone_url_for("team/app.git"), "ssh://git@example.com/team/app.git");
        assert_eq!(broker.repositories_folder(), Some(fixture.path()));
    }

    #[test]
    fn test_second_setup_is_ignored() {
        let first = RepositoryRootFixture::new();
        let second = RepositoryRootFixture::new();

        let broker = ContextBroker::new();
        broker.setup(Arc::new(first.settings())).unwrap();
        let before = broker.config().cloned();

        broker
            .setup(Arc::new(
                second.settings().with(keys::web::DEBUG_MODE, "true")
            ))
            .unwrap();

        assert_eq!(broker.config().cloned(), before);
        assert_eq!(broker.repositories_folder(), Some(first.path()));
        assert!(!broker.is_debug_mode());
    }

    #[test]
    fn test_setup_fails_on_file_root() {
        let fixture = RepositoryRootFixture::new();
        let file = fixture.path().join("occupied");
        std::fs::write(&file, "").unwrap();
        let settings = StoredSettings::new("test")
            .with(keys::git::REPOSITORIES_FOLDER, file.display().to_string());

        let broker = ContextBroker::new();
        let result = broker.setup(Arc::new(settings));

        assert!(matches!(result, Err(SetupError::ResolverConstruction { .. })));
        assert!(!broker.is_initialized());
    }

    #[test]
    fn test_setup_rejects_blank_repositories_folder() {
        let settings = StoredSettings::new("test").with(keys::git::REPOSITORIES_FOLDER, " ");

        let broker = ContextBroker::new();
        let result = broker.setup(Arc::new(settings));

        match result {
            Err(SetupError::InvalidConfig { message }) => {
                assert!(message.contains("repositories_folder"));
            }
            other => panic!("unexpected result: {other:?}")
        }
        assert!(!broker.is_initialized());
    }

    #[test]
    fn test_initialize_skips_loader_when_set_up() {
        let fixture = RepositoryRootFixture::new();
        let broker = ContextBroker::new();
        broker.setup(Arc::new(fixture.settings())).unwrap();

        let result = broker.initialize(|| -> Result<Arc<dyn SettingsProvider>, String> {
            panic!("loader must not run once the context is set up")
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_initialize_reports_loader_failure() {
        let broker = ContextBroker::new();
        let result = broker.initialize(|| -> Result<Arc<dyn SettingsProvider>, String> {
            Err("settings file missing".to_string())
        });

        match result {
            Err(SetupError::SettingsUnavailable { reason }) => {
                assert_eq!(reason, "settings file missing");
            }
            other => panic!("unexpected result: {other:?}")
        }
        assert!(!broker.is_initialized());
    }
}
