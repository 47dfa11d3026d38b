//! Settings loading, logging setup and broker initialization.

use std::sync::Arc;

use anyhow::{Context as _, Result};
use config::{BrokerConfig, StoredSettings, keys};
use context::ContextBroker;
use gb_core::SettingsProvider;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::commands::GlobalArgs;

/// Loads layered settings, installs the tracing subscriber and sets the
/// broker up.
///
/// Settings failures surface through [`ContextBroker::initialize`] so they
/// are logged like any other setup failure before the process exits.
pub fn start(args: &GlobalArgs) -> Result<ContextBroker> {
    let settings = config::load_layered(args.config.as_deref(), cli_overrides(args));

    let debug_mode = settings
        .as_ref()
        .is_ok_and(|s| BrokerConfig::from_settings(s).debug_mode);
    init_tracing(debug_mode);

    let broker = ContextBroker::new();
    broker
        .initialize(|| {
            settings.map(|s| -> Arc<dyn SettingsProvider> { Arc::new(s) })
        })
        .context("gitbroker could not start")?;

    if let Some(folder) = broker.repositories_folder() {
        info!(folder = %folder.display(), "Broker ready");
    }
    Ok(broker)
}

fn cli_overrides(args: &GlobalArgs) -> Option<StoredSettings> {
    let folder = args.repositories.as_ref()?;
    Some(StoredSettings::new("cli").with(
        keys::git::REPOSITORIES_FOLDER,
        folder.display().to_string()
    ))
}

fn init_tracing(debug_mode: bool) {
    let default_level = if debug_mode { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
