//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::{validate_config, SystemConfig};

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
///
/// ```rust,ignore
/// use derivs_limiter::load_config;
///
/// let config = load_config("axes.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SystemConfig> {
    match fs::read_to_string(path.as_ref()) {
        Ok(content) => parse_config(&content),
        Err(e) => Err(ConfigError::IoError(truncated(&e.to_string())).into()),
    }
}

/// Parse and validate configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<SystemConfig> {
    let config = toml::from_str::<SystemConfig>(content)
        .map_err(|e| Error::from(ConfigError::ParseError(truncated(e.message()))))?;

    validate_config(&config).map(|()| config)
}

/// Copy as much of `msg` as fits, cutting on a char boundary.
fn truncated<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
