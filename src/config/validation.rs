//! Configuration validation.
//!
//! Configuration files are checked strictly at load time. The runtime API of
//! [`DerivsLimiter`](crate::limiter::DerivsLimiter) stays permissive and
//! clamps whatever it is given instead.

use crate::error::{ConfigError, Error, Result};

use super::{LimiterConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks, for every limiter:
/// - Velocity, acceleration and deceleration limits are finite and >= 0
/// - The emergency stopping factor is finite and >= 1
/// - Position limits are ordered (low <= high)
/// - Target and start state are finite
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    for (_, limiter) in config.limiters.iter() {
        validate_limiter(limiter)?;
    }

    Ok(())
}

/// Validate a single limiter configuration.
pub fn validate_limiter(config: &LimiterConfig) -> Result<()> {
    if !is_valid_limit(config.vel_limit) {
        return Err(Error::Config(ConfigError::InvalidVelLimit(config.vel_limit)));
    }

    if !is_valid_limit(config.accel_limit) {
        return Err(Error::Config(ConfigError::InvalidAccelLimit(
            config.accel_limit,
        )));
    }

    if let Some(decel) = config.decel_limit {
        if !is_valid_limit(decel) {
            return Err(Error::Config(ConfigError::InvalidDecelLimit(decel)));
        }
    }

    if !(config.max_stopping_decel.is_finite() && config.max_stopping_decel >= 1.0) {
        return Err(Error::Config(ConfigError::InvalidStoppingDecel(
            config.max_stopping_decel,
        )));
    }

    let limits = config.position_limits();
    if !limits.is_valid() {
        return Err(Error::Config(ConfigError::InvalidPosLimits {
            low: limits.low,
            high: limits.high,
        }));
    }

    if !config.target.is_finite() {
        return Err(Error::Config(ConfigError::InvalidTarget(config.target)));
    }

    if !(config.start_pos.is_finite() && config.start_vel.is_finite()) {
        return Err(Error::Config(ConfigError::InvalidStartState {
            position: config.start_pos,
            velocity: config.start_vel,
        }));
    }

    Ok(())
}

fn is_valid_limit(value: f32) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_accel_rejected() {
        let config = LimiterConfig::new(1.0, -2.0);

        let result = validate_limiter(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidAccelLimit(_)))
        ));
    }

    #[test]
    fn test_inverted_pos_limits_rejected() {
        let mut config = LimiterConfig::new(1.0, 1.0);
        config.pos_limit_low = Some(5.0);
        config.pos_limit_high = Some(-5.0);

        let result = validate_limiter(&config);
        assert!(matches!(
            result,
            Err(Error::Config(ConfigError::InvalidPosLimits { .. }))
        ));
    }

    #[test]
    fn test_stopping_factor_below_one_rejected() {
        let mut config = LimiterConfig::new(1.0, 1.0);
        config.max_stopping_decel = 0.5;

        assert!(matches!(
            validate_limiter(&config),
            Err(Error::Config(ConfigError::InvalidStoppingDecel(_)))
        ));
    }

    #[test]
    fn test_zero_limits_are_valid() {
        assert!(validate_limiter(&LimiterConfig::default()).is_ok());
    }
}
