//! # Settings
//!
//! Layered runtime configuration.
//!
//! Sources, later ones overriding earlier ones:
//!
//! 1. `config/default.{toml,yaml,json}` (optional)
//! 2. `config/{env}.{toml,yaml,json}` (optional)
//! 3. Environment variables prefixed `LEAD_DESK__`, with `__` as the section
//!    separator (e.g. `LEAD_DESK__DISTRIBUTION__METHOD=load_balanced`)
//!
//! A `.env` file in the working directory is loaded into the process
//! environment first. Settings are validated before they are returned, so a
//! bad distribution method or discount fails at startup instead of at the
//! first quote.

use crate::domain::services::SelectionPolicy;
use crate::domain::value_objects::{DiscountRate, DistributionMethod};
use crate::domain::value_objects::discount_rate::DEFAULT_DISCOUNT_PCT;
use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Prefix of the environment variables read by [`load_settings`].
pub const ENV_PREFIX: &str = "LEAD_DESK";

/// Configuration error.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or parsed.
    #[error("failed to load configuration: {0}")]
    Load(String),

    /// A value is present but not acceptable.
    #[error("invalid configuration for {field}: {message}")]
    InvalidConfiguration {
        /// Dotted key of the offending value.
        field: String,
        /// What is wrong with it.
        message: String,
    },
}

impl ConfigError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this is an invalid configuration error.
    #[must_use]
    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. })
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::Load(err.to_string())
    }
}

/// Lead distribution settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionSettings {
    /// Selection method.
    pub method: DistributionMethod,
    /// Pending lead limit per seller.
    pub max_pending_leads: Option<u32>,
    /// Skip sellers at the pending lead limit.
    pub skip_overloaded: bool,
    /// Assign from the manually ordered queue instead of by recency.
    pub queue_mode: bool,
}

impl Default for DistributionSettings {
    fn default() -> Self {
        Self {
            method: DistributionMethod::Sequential,
            max_pending_leads: None,
            skip_overloaded: false,
            queue_mode: false,
        }
    }
}

/// Pricing settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Enrollment discount in percent.
    pub discount_rate_pct: Decimal,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            discount_rate_pct: DEFAULT_DISCOUNT_PCT,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level used when `RUST_LOG` is unset (`trace` through `error`, or `off`).
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Application settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Lead distribution.
    #[serde(default)]
    pub distribution: DistributionSettings,
    /// Quote pricing.
    #[serde(default)]
    pub pricing: PricingSettings,
    /// Logging.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Settings {
    /// Validates settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfiguration` naming the first bad key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.discount_rate()?;

        let distribution = &self.distribution;
        if distribution.skip_overloaded {
            match distribution.max_pending_leads {
                None => {
                    return Err(ConfigError::invalid(
                        "distribution.max_pending_leads",
                        "required when distribution.skip_overloaded is set",
                    ));
                }
                Some(0) => {
                    return Err(ConfigError::invalid(
                        "distribution.max_pending_leads",
                        "must be at least 1, otherwise every seller is skipped",
                    ));
                }
                Some(_) => {}
            }
        }

        if LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("unknown level '{}'", self.logging.level),
            ));
        }

        Ok(())
    }

    /// Returns the selection policy described by the distribution section.
    #[must_use]
    pub fn selection_policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            method: self.distribution.method,
            max_pending_leads: self.distribution.max_pending_leads,
            skip_overloaded: self.distribution.skip_overloaded,
        }
    }

    /// Returns the enrollment discount.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidConfiguration` if the percentage is
    /// outside `[0, 100]`.
    pub fn discount_rate(&self) -> Result<DiscountRate, ConfigError> {
        DiscountRate::from_pct(self.pricing.discount_rate_pct).map_err(|e| {
            ConfigError::invalid(
                "pricing.discount_rate_pct",
                format!("{} (got {})", e, self.pricing.discount_rate_pct),
            )
        })
    }
}

/// Loads settings from files and the environment.
///
/// `env` selects the optional `config/{env}` overlay.
///
/// # Errors
///
/// Returns `ConfigError::Load` if a source cannot be parsed and
/// `ConfigError::InvalidConfiguration` if a value is rejected.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    // A missing .env file is normal outside development.
    dotenvy::dotenv().ok();

    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    from_config(builder.build()?)
}

/// Deserializes and validates an already assembled configuration.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` if a value is rejected.
pub fn from_config(config: Config) -> Result<Settings, ConfigError> {
    let settings: Settings = config
        .try_deserialize()
        .map_err(|e| ConfigError::invalid("settings", e.to_string()))?;

    settings.validate()?;

    tracing::debug!(
        method = %settings.distribution.method,
        queue_mode = settings.distribution.queue_mode,
        discount_pct = %settings.pricing.discount_rate_pct,
        "settings loaded"
    );

    Ok(settings)
}
