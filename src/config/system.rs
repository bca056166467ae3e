//! System configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

use super::limiter::LimiterConfig;

/// Maximum number of named limiters in one configuration.
pub const MAX_LIMITERS: usize = 8;

/// Root configuration structure from TOML.
///
/// Each `[limiters.<name>]` table configures one independent axis.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemConfig {
    /// Named limiter configurations.
    #[serde(default)]
    pub limiters: FnvIndexMap<String<32>, LimiterConfig, MAX_LIMITERS>,
}

impl SystemConfig {
    /// Get a limiter configuration by name.
    pub fn limiter(&self, name: &str) -> Option<&LimiterConfig> {
        self.limiters
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a limiter configuration by name, or a `LimiterNotFound` error.
    pub fn limiter_or_error(&self, name: &str) -> Result<&LimiterConfig> {
        self.limiter(name).ok_or_else(|| {
            Error::Config(ConfigError::LimiterNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })
    }

    /// List all limiter names.
    pub fn limiter_names(&self) -> impl Iterator<Item = &str> {
        self.limiters.keys().map(|s| s.as_str())
    }
}
