//! Engine configuration.
//!
//! Provides [`EngineConfig`] with the reference defaults (10% fee, two-day
//! default duration). It can be built programmatically, deserialized by the
//! host, or loaded from environment variables.

use std::env::VarError;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tulip_core::constants::{DEFAULT_DURATION_SECS, DEFAULT_FEE_PERCENT, PERCENT_PRECISION};
use tulip_core::error::ConfigError;

const FEE_PERCENT_VAR: &str = "TULIP_FEE_PERCENT";
const DEFAULT_DURATION_VAR: &str = "TULIP_DEFAULT_DURATION_SECS";

/// Configuration for an auction engine instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Share of each sale price kept by the operator, in percent.
    pub fee_percent: u64,
    /// Duration used when an auction is created with `duration == 0`.
    pub default_duration_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fee_percent: DEFAULT_FEE_PERCENT,
            default_duration_secs: DEFAULT_DURATION_SECS,
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `TULIP_FEE_PERCENT` and `TULIP_DEFAULT_DURATION_SECS`, falling
    /// back to the defaults for unset variables. A variable that is set but
    /// not valid unicode is an error. The result is validated.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key))
    }

    /// Load configuration through `lookup`, which resolves a variable name
    /// the way [`std::env::var`] does.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let defaults = Self::default();

        let fee_percent = read_var(&lookup, FEE_PERCENT_VAR, defaults.fee_percent)?;
        let default_duration_secs =
            read_var(&lookup, DEFAULT_DURATION_VAR, defaults.default_duration_secs)?;

        let config = Self { fee_percent, default_duration_secs };
        config.validate().context("invalid engine configuration")?;
        Ok(config)
    }

    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FeeTooHigh`] if the fee would exceed the sale price
    /// - [`ConfigError::ZeroDefaultDuration`] if the default would create
    ///   instantly-expiring auctions
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fee_percent > PERCENT_PRECISION {
            return Err(ConfigError::FeeTooHigh(self.fee_percent));
        }
        if self.default_duration_secs == 0 {
            return Err(ConfigError::ZeroDefaultDuration);
        }
        Ok(())
    }

    /// Duration an auction created with `requested` seconds will actually run.
    pub fn effective_duration(&self, requested: u64) -> u64 {
        if requested == 0 {
            self.default_duration_secs
        } else {
            requested
        }
    }
}

/// Parse `key` as a `u64`, or return `default` when it is not set.
fn read_var<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    match lookup(key) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a non-negative integer, got {v:?}")),
        Err(VarError::NotPresent) => Ok(default),
        Err(e @ VarError::NotUnicode(_)) => {
            Err(e).with_context(|| format!("{key} is not valid unicode"))
        }
    }
}
