//! Limiter configuration from TOML.

use serde::Deserialize;

use super::limits::PositionLimits;

/// Default emergency stopping factor.
pub const DEFAULT_MAX_STOPPING_DECEL: f32 = 2.0;

/// Complete limiter configuration.
///
/// Every field except the two main limits is optional in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LimiterConfig {
    /// Maximum absolute velocity (units per second).
    pub vel_limit: f32,

    /// Maximum absolute acceleration while speeding up (units per second squared).
    pub accel_limit: f32,

    /// Maximum absolute deceleration while slowing down.
    /// Falls back to `accel_limit` when not set.
    #[serde(default)]
    pub decel_limit: Option<f32>,

    /// Initial target position.
    #[serde(default)]
    pub target: f32,

    /// Initial position.
    #[serde(default)]
    pub start_pos: f32,

    /// Initial velocity.
    #[serde(default)]
    pub start_vel: f32,

    /// Never let velocity carry the position further from the target.
    #[serde(default)]
    pub prevent_going_wrong_way: bool,

    /// Clamp velocity to the limit at the start of every step.
    #[serde(default)]
    pub prevent_going_too_fast: bool,

    /// Optional lower position bound.
    #[serde(default)]
    pub pos_limit_low: Option<f32>,

    /// Optional upper position bound.
    #[serde(default)]
    pub pos_limit_high: Option<f32>,

    /// How many times the deceleration limit may be used to stop in an emergency.
    #[serde(default = "default_max_stopping_decel")]
    pub max_stopping_decel: f32,
}

fn default_max_stopping_decel() -> f32 {
    DEFAULT_MAX_STOPPING_DECEL
}

impl Default for LimiterConfig {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl LimiterConfig {
    /// Create a configuration with the given limits and every other field at its default.
    pub fn new(vel_limit: f32, accel_limit: f32) -> Self {
        Self {
            vel_limit,
            accel_limit,
            decel_limit: None,
            target: 0.0,
            start_pos: 0.0,
            start_vel: 0.0,
            prevent_going_wrong_way: false,
            prevent_going_too_fast: false,
            pos_limit_low: None,
            pos_limit_high: None,
            max_stopping_decel: DEFAULT_MAX_STOPPING_DECEL,
        }
    }

    /// Deceleration limit in effect (falls back to acceleration).
    pub fn effective_decel_limit(&self) -> f32 {
        self.decel_limit.unwrap_or(self.accel_limit)
    }

    /// Check if deceleration differs from acceleration.
    pub fn is_asymmetric(&self) -> bool {
        self.decel_limit.map_or(false, |d| d != self.accel_limit)
    }

    /// Position bounds, unbounded on any side that is not set.
    pub fn position_limits(&self) -> PositionLimits {
        PositionLimits::new(
            self.pos_limit_low.unwrap_or(f32::NEG_INFINITY),
            self.pos_limit_high.unwrap_or(f32::INFINITY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decel_falls_back_to_accel() {
        let mut config = LimiterConfig::new(10.0, 4.0);
        assert_eq!(config.effective_decel_limit(), 4.0);
        assert!(!config.is_asymmetric());

        config.decel_limit = Some(1.0);
        assert_eq!(config.effective_decel_limit(), 1.0);
        assert!(config.is_asymmetric());
    }

    #[test]
    fn test_position_limits_default_unbounded() {
        let mut config = LimiterConfig::default();
        assert_eq!(config.position_limits(), PositionLimits::UNBOUNDED);

        config.pos_limit_high = Some(3.0);
        let limits = config.position_limits();
        assert_eq!(limits.high, 3.0);
        assert_eq!(limits.low, f32::NEG_INFINITY);
    }
}
