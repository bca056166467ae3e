//! Configuration module for derivs-limiter.
//!
//! Provides types for loading and validating limiter configurations
//! from TOML files (with `std` feature) or pre-parsed data.

mod limiter;
mod limits;
#[cfg(feature = "std")]
mod loader;
mod system;
mod validation;

pub use limiter::{LimiterConfig, DEFAULT_MAX_STOPPING_DECEL};
pub use limits::PositionLimits;
pub use system::{SystemConfig, MAX_LIMITERS};
pub use validation::{validate_config, validate_limiter};

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};
