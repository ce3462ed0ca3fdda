//! Finsight Configuration Layer
//!
//! Tunable parameters for the Finsight calculators. The defaults are the
//! engine's standard constants; a configuration file only needs to name the
//! values it changes.
//!
//! # Sections
//!
//! - **Payoff**: installment step-up factor, affordability ceilings, lump sum
//!   and windfall sizing, refinance discount, biweekly credit
//! - **Health**: debt-ratio thresholds, score deductions, recommendation triggers
//! - **Projection**: history window, minimum history, horizon, confidence decay
//!
//! # Example
//!
//! ```rust
//! use finsight_config::{EngineConfig, Validate};
//!
//! let config = EngineConfig::from_toml_str("[projection]\nhorizon_months = 6").unwrap();
//! assert_eq!(config.projection.horizon_months, 6);
//! assert_eq!(config.projection.base_confidence, 85);
//! assert!(config.is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod calculators;
mod engine;
mod error;

pub use calculators::{HealthConfig, PayoffConfig, ProjectionConfig};
pub use engine::EngineConfig;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calculators::{HealthConfig, PayoffConfig, ProjectionConfig};
    pub use crate::engine::EngineConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
