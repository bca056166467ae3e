//! Error types for derivs-limiter.
//!
//! The stepping path never fails. These errors only come from loading or
//! validating configuration and from the blocking fixed-rate driver.

use core::fmt;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all derivs-limiter operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Fixed-rate driver error
    Drive(DriveError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Limiter name not found in configuration
    LimiterNotFound(heapless::String<32>),
    /// Invalid velocity limit (must be finite and >= 0)
    InvalidVelLimit(f32),
    /// Invalid acceleration limit (must be finite and >= 0)
    InvalidAccelLimit(f32),
    /// Invalid deceleration limit (must be finite and >= 0)
    InvalidDecelLimit(f32),
    /// Invalid emergency stopping factor (must be finite and >= 1)
    InvalidStoppingDecel(f32),
    /// Invalid position limits (low must be <= high, neither NaN)
    InvalidPosLimits {
        /// Lower bound
        low: f32,
        /// Upper bound
        high: f32,
    },
    /// Target is not a finite number
    InvalidTarget(f32),
    /// Start position or velocity is not a finite number
    InvalidStartState {
        /// Start position
        position: f32,
        /// Start velocity
        velocity: f32,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Errors from the blocking fixed-rate driver.
#[derive(Debug, Clone, PartialEq)]
pub enum DriveError {
    /// Step period of zero microseconds
    InvalidPeriod,
    /// Target not reached within the tick budget
    Timeout {
        /// Ticks spent before giving up
        ticks: u32,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Drive(e) => write!(f, "Drive error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::LimiterNotFound(name) => write!(f, "Limiter '{}' not found", name),
            ConfigError::InvalidVelLimit(v) => {
                write!(f, "Invalid velocity limit: {}. Must be finite and >= 0", v)
            }
            ConfigError::InvalidAccelLimit(v) => {
                write!(f, "Invalid acceleration limit: {}. Must be finite and >= 0", v)
            }
            ConfigError::InvalidDecelLimit(v) => {
                write!(f, "Invalid deceleration limit: {}. Must be finite and >= 0", v)
            }
            ConfigError::InvalidStoppingDecel(v) => {
                write!(f, "Invalid max stopping decel factor: {}. Must be finite and >= 1", v)
            }
            ConfigError::InvalidPosLimits { low, high } => {
                write!(f, "Invalid position limits: low ({}) must be <= high ({})", low, high)
            }
            ConfigError::InvalidTarget(v) => write!(f, "Invalid target: {}. Must be finite", v),
            ConfigError::InvalidStartState { position, velocity } => write!(
                f,
                "Invalid start state: position {} and velocity {} must be finite",
                position, velocity
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriveError::InvalidPeriod => write!(f, "Step period must be at least 1 us"),
            DriveError::Timeout { ticks } => {
                write!(f, "Target not reached after {} ticks", ticks)
            }
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriveError> for Error {
    fn from(e: DriveError) -> Self {
        Error::Drive(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriveError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nests_inner_message() {
        let err: Error = ConfigError::InvalidPosLimits { low: 5.0, high: 1.0 }.into();
        let mut buf = heapless::String::<128>::new();
        core::fmt::write(&mut buf, format_args!("{}", err)).unwrap();
        assert!(buf.starts_with("Configuration error: Invalid position limits"));
    }

    #[test]
    fn test_drive_error_conversion() {
        let err: Error = DriveError::Timeout { ticks: 10 }.into();
        assert_eq!(err, Error::Drive(DriveError::Timeout { ticks: 10 }));
    }
}
