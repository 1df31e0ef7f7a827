//! CLI configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, then command-line flags are applied on top.
//!
//! | Variable           | Default | Meaning                                  |
//! |--------------------|---------|------------------------------------------|
//! | `GTIN_PREFIX`      | `748`   | 3-digit prefix for 11-digit synthesis    |
//! | `GTIN_PASSTHROUGH` | `trust` | `trust` or `verify` standard-length codes |

use std::env;

use gtin_core::{GtinPrefix, NormalizerConfig, PassthroughPolicy};

use crate::cli::CliArgs;

pub const ENV_GTIN_PREFIX: &str = "GTIN_PREFIX";
pub const ENV_GTIN_PASSTHROUGH: &str = "GTIN_PASSTHROUGH";

/// CLI configuration.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Settings handed to the normalizer.
    pub normalizer: NormalizerConfig,
}

impl CliConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CliConfig::load`], reading values through `lookup`.
    ///
    /// Unset and blank values fall back to defaults; set but invalid values
    /// are errors, since a wrong prefix would silently change every
    /// synthesized GTIN.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let prefix = match value(ENV_GTIN_PREFIX) {
            Some(raw) => parse_prefix(ENV_GTIN_PREFIX, &raw)?,
            None => GtinPrefix::default(),
        };

        let passthrough = match value(ENV_GTIN_PASSTHROUGH) {
            Some(raw) => parse_policy(ENV_GTIN_PASSTHROUGH, &raw)?,
            None => PassthroughPolicy::default(),
        };

        Ok(CliConfig {
            normalizer: NormalizerConfig {
                prefix,
                passthrough,
            },
        })
    }

    /// Applies command-line overrides.
    pub fn apply_args(&mut self, args: &CliArgs) -> Result<(), ConfigError> {
        if let Some(raw) = &args.prefix {
            self.normalizer.prefix = parse_prefix("--prefix", raw)?;
        }
        if args.verify {
            self.normalizer.passthrough = PassthroughPolicy::Verify;
        }
        Ok(())
    }
}

fn parse_prefix(key: &str, raw: &str) -> Result<GtinPrefix, ConfigError> {
    raw.parse().map_err(|e: gtin_core::ValidationError| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

fn parse_policy(key: &str, raw: &str) -> Result<PassthroughPolicy, ConfigError> {
    raw.parse().map_err(|e: gtin_core::ValidationError| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Missing value for {0}")]
    MissingValue(String),

    #[error("Unknown argument: {0}")]
    UnknownArgument(String),
}
