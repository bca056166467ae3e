//! Builder pattern for DerivsLimiter.

use crate::config::LimiterConfig;

use super::derivs::DerivsLimiter;

/// Builder for creating DerivsLimiter instances.
///
/// Every parameter is optional. Unset limits stay at zero, which gives a
/// limiter that does not move.
#[derive(Debug, Clone, Default)]
pub struct DerivsLimiterBuilder {
    config: LimiterConfig,
}

impl DerivsLimiterBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: &LimiterConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Set the velocity limit (units per second).
    pub fn vel_limit(mut self, vel_limit: f32) -> Self {
        self.config.vel_limit = vel_limit;
        self
    }

    /// Set the acceleration limit (units per second squared).
    pub fn accel_limit(mut self, accel_limit: f32) -> Self {
        self.config.accel_limit = accel_limit;
        self
    }

    /// Set a deceleration limit different from the acceleration limit.
    pub fn decel_limit(mut self, decel_limit: f32) -> Self {
        self.config.decel_limit = Some(decel_limit);
        self
    }

    /// Set the initial target.
    pub fn target(mut self, target: f32) -> Self {
        self.config.target = target;
        self
    }

    /// Set the initial position.
    pub fn start_pos(mut self, position: f32) -> Self {
        self.config.start_pos = position;
        self
    }

    /// Set the initial velocity.
    pub fn start_vel(mut self, velocity: f32) -> Self {
        self.config.start_vel = velocity;
        self
    }

    /// Set initial position and velocity.
    pub fn start(self, position: f32, velocity: f32) -> Self {
        self.start_pos(position).start_vel(velocity)
    }

    /// Never let velocity carry the position further from the target.
    pub fn prevent_going_wrong_way(mut self, prevent: bool) -> Self {
        self.config.prevent_going_wrong_way = prevent;
        self
    }

    /// Clamp over-speed immediately instead of braking it off.
    pub fn prevent_going_too_fast(mut self, prevent: bool) -> Self {
        self.config.prevent_going_too_fast = prevent;
        self
    }

    /// Set both position bounds.
    pub fn pos_limits(mut self, low: f32, high: f32) -> Self {
        self.config.pos_limit_low = Some(low);
        self.config.pos_limit_high = Some(high);
        self
    }

    /// Set the emergency stopping factor.
    pub fn max_stopping_decel(mut self, factor: f32) -> Self {
        self.config.max_stopping_decel = factor;
        self
    }

    /// Get the configuration collected so far.
    pub fn config(&self) -> &LimiterConfig {
        &self.config
    }

    /// Build the limiter. Invalid values are clamped, never rejected.
    pub fn build(self) -> DerivsLimiter {
        DerivsLimiter::from_config(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_config() {
        let builder = DerivsLimiterBuilder::new()
            .vel_limit(2.0)
            .accel_limit(4.0)
            .decel_limit(1.0)
            .start(3.0, -1.0)
            .pos_limits(-10.0, 10.0)
            .max_stopping_decel(3.0);

        let config = builder.config();
        assert_eq!(config.decel_limit, Some(1.0));
        assert_eq!(config.start_pos, 3.0);
        assert_eq!(config.pos_limit_high, Some(10.0));

        let limiter = builder.build();
        assert_eq!(limiter.position(), 3.0);
        assert_eq!(limiter.velocity(), -1.0);
        assert_eq!(limiter.effective_decel_limit(), 1.0);
        assert_eq!(limiter.max_stopping_decel(), 3.0);
        assert!(!limiter.adjustments().any());
    }

    #[test]
    fn test_builder_clamps_invalid_values() {
        let limiter = DerivsLimiterBuilder::new()
            .vel_limit(-2.0)
            .accel_limit(f32::INFINITY)
            .pos_limits(5.0, -5.0)
            .build();

        assert_eq!(limiter.vel_limit(), 0.0);
        assert_eq!(limiter.accel_limit(), 0.0);
        assert_eq!(limiter.pos_limits().low, -5.0);

        let adjustments = limiter.adjustments();
        assert!(adjustments.negative_limit);
        assert!(adjustments.non_finite_limit);
        assert!(adjustments.pos_limits);
    }
}
