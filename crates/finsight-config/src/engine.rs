//! Top-level engine configuration and loading.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::calculators::{HealthConfig, PayoffConfig, ProjectionConfig};
use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Complete configuration of the calculators.
///
/// Every section is optional in serialized form; missing sections and fields
/// fall back to their defaults.
///
/// ```toml
/// [payoff]
/// affordability_ratio = 0.35
///
/// [projection]
/// horizon_months = 6
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Payoff strategy simulator parameters.
    pub payoff: PayoffConfig,
    /// Health scorer thresholds.
    pub health: HealthConfig,
    /// Trend projector parameters.
    pub projection: ProjectionConfig,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a configuration file, choosing the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = self.payoff.validate();
        errors.extend(self.health.validate());
        errors.extend(self.projection.validate());
        errors
    }
}
