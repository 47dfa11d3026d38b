//! # Configuration Validation
//!
//! Validates the broker configuration using the `validator` crate and maps
//! failures onto the setup error taxonomy.

use crate::config::BrokerConfig;
use errors::SetupError;
use validator::Validate;

/// Validate the broker configuration.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Rejects configurations the broker cannot start from. A failure here is an
/// initialization fault and must stop process startup.
///
/// ## Usage
/// ```rust,no_run
/// use config::{BrokerConfig, validate};
///
/// let config = BrokerConfig::default();
/// match validate(&config) {
///     Ok(()) => println!("Configuration is valid"),
///     Err(e) => println!("Validation error: {e}"),
/// }
/// ```
///
/// ## Validation Rules
/// - `repositories_folder`: 1+ characters
/// - `clone_url`: 1+ characters
pub fn validate(config: &BrokerConfig) -> Result<(), SetupError> {
    config.validate().map_err(|report| {
        let mut fields: Vec<String> = report.field_errors().keys().map(|k| k.to_string()).collect();
        fields.sort_unstable();
        SetupError::InvalidConfig {
            message: format!("invalid fields: {}", fields.join(", "))
        }
    })
}
