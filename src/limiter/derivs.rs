//! The limiter itself.
//!
//! Limits the first and second derivative of a value as it approaches a
//! target: velocity never exceeds the velocity limit and changes no faster
//! than the acceleration or deceleration limit allows.

use libm::fabsf;

use crate::config::{LimiterConfig, PositionLimits};

use super::adjust::{self, Adjustments};
use super::builder::DerivsLimiterBuilder;
use super::kinematics::{self, approach, braking_speed, classify, sign, Regime};
use super::observer::StepObserver;

/// Result of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Step {
    /// Position after the step.
    pub position: f32,
    /// Velocity after the step.
    pub velocity: f32,
    /// Acceleration applied during the step.
    pub acceleration: f32,
    /// Regime the step was computed in.
    pub regime: Regime,
}

/// Single-axis velocity and acceleration limiter.
///
/// Owns its position/velocity state. Call [`compute_step`](Self::compute_step)
/// periodically with the elapsed time; every call runs in constant time and
/// never fails, so it is safe to use from a real-time control task.
///
/// Invalid inputs to setters are clamped and recorded in
/// [`adjustments`](Self::adjustments).
#[derive(Debug, Clone)]
pub struct DerivsLimiter {
    position: f32,
    velocity: f32,
    acceleration: f32,
    target: f32,

    vel_limit: f32,
    accel_limit: f32,
    /// `None` falls back to `accel_limit`.
    decel_limit: Option<f32>,
    max_stopping_decel: f32,
    limits: PositionLimits,
    prevent_going_wrong_way: bool,
    prevent_going_too_fast: bool,

    /// Timestamp of the last `calc_at` call.
    last_time_us: Option<u64>,

    adjustments: Adjustments,
    unsafe_stops: u32,
}

impl Default for DerivsLimiter {
    /// A limiter with zero limits. It never moves until real limits are set.
    fn default() -> Self {
        Self::from_config(&LimiterConfig::default())
    }
}

impl DerivsLimiter {
    /// Create a limiter at rest at zero, targeting zero.
    pub fn new(vel_limit: f32, accel_limit: f32) -> Self {
        Self::from_config(&LimiterConfig::new(vel_limit, accel_limit))
    }

    /// Start building a limiter with optional parameters.
    pub fn builder() -> DerivsLimiterBuilder {
        DerivsLimiterBuilder::new()
    }

    /// Create a limiter from a configuration, clamping invalid values.
    pub fn from_config(config: &LimiterConfig) -> Self {
        let mut adjustments = Adjustments::default();
        let bounds = config.position_limits();
        let limits = adjust::pos_limits(bounds.low, bounds.high, &mut adjustments);

        let vel_limit = adjust::limit(config.vel_limit, &mut adjustments);
        let accel_limit = adjust::limit(config.accel_limit, &mut adjustments);
        // NaN is the conventional "unset" marker
        let decel_limit = config
            .decel_limit
            .filter(|d| !d.is_nan())
            .map(|d| adjust::limit(d, &mut adjustments));
        let max_stopping_decel = adjust::stopping_decel(config.max_stopping_decel, &mut adjustments);

        let target = adjust::target(config.target, 0.0, &limits, &mut adjustments);
        let position = adjust::state(config.start_pos, 0.0, &mut adjustments);
        let velocity = adjust::state(config.start_vel, 0.0, &mut adjustments);

        Self {
            position,
            velocity,
            acceleration: 0.0,
            target,
            vel_limit,
            accel_limit,
            decel_limit,
            max_stopping_decel,
            limits,
            prevent_going_wrong_way: config.prevent_going_wrong_way,
            prevent_going_too_fast: config.prevent_going_too_fast,
            last_time_us: None,
            adjustments,
            unsafe_stops: 0,
        }
    }

    /// Advance the state by `dt` seconds.
    ///
    /// `dt` of zero, negative or not finite leaves the state unchanged.
    ///
    /// Order of operations:
    /// 1. velocity pre-conditioning (too fast / wrong way flags)
    /// 2. clamp to the fastest speed that can stop before the position bound ahead
    /// 3. accelerate or brake toward the braking-curve speed, then clamp to `±vel_limit`
    /// 4. integrate position
    /// 5. snap onto the target when the step reaches it
    /// 6. clamp position into the bounds and drop outward velocity
    pub fn compute_step(&mut self, dt: f32) -> Step {
        if !(dt > 0.0 && dt.is_finite()) {
            return self.snapshot();
        }

        let decel = self.effective_decel_limit();
        let emergency = decel * self.max_stopping_decel;
        let target = self.limits.clamp(self.target);
        let error = target - self.position;
        let previous = self.velocity;
        let mut velocity = previous;

        if self.prevent_going_too_fast {
            velocity = velocity.clamp(-self.vel_limit, self.vel_limit);
        }
        if self.prevent_going_wrong_way && velocity != 0.0 && velocity * error <= 0.0 {
            velocity = 0.0;
        }

        let room = self.limits.distance_ahead(self.position, velocity);
        if room.is_finite() {
            let safe = braking_speed(room, emergency, dt);
            if fabsf(velocity) > safe {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "velocity {} cannot stop within {}, clamped to {}",
                    velocity,
                    room,
                    safe
                );
                velocity = sign(velocity) * safe;
                self.unsafe_stops = self.unsafe_stops.saturating_add(1);
            }
        }

        let regime = classify(error, velocity, self.vel_limit, decel, dt);
        let curve = braking_speed(fabsf(error), decel, dt);
        let desired = sign(error) * curve.min(self.vel_limit);
        // already past the braking curve: stopping in time needs the emergency rate
        let brake_rate = if velocity * error > 0.0 && fabsf(velocity) > curve {
            emergency
        } else {
            decel
        };
        velocity = approach(velocity, desired, self.accel_limit, brake_rate, dt)
            .clamp(-self.vel_limit, self.vel_limit);

        let mut position = self.position + velocity * dt;

        if velocity * error > 0.0
            && fabsf(velocity) * dt >= fabsf(error)
            && (self.prevent_going_wrong_way || fabsf(velocity) <= emergency * dt)
        {
            position = target;
            velocity = 0.0;
        }

        if position > self.limits.high {
            position = self.limits.high;
            velocity = velocity.min(0.0);
        } else if position < self.limits.low {
            position = self.limits.low;
            velocity = velocity.max(0.0);
        }

        self.position = position;
        self.velocity = velocity;
        self.acceleration = (velocity - previous) / dt;

        Step {
            position,
            velocity,
            acceleration: self.acceleration,
            regime,
        }
    }

    /// Advance the state and report the result to `observer`.
    pub fn compute_step_observed<O: StepObserver>(&mut self, dt: f32, observer: &mut O) -> Step {
        let step = self.compute_step(dt);
        observer.on_step(&step);
        step
    }

    /// Set a new target, then advance by `dt`.
    pub fn step_toward(&mut self, target: f32, dt: f32) -> Step {
        self.set_target(target);
        self.compute_step(dt)
    }

    /// Advance using a microsecond timestamp instead of an interval.
    ///
    /// The first call after construction or [`reset_time`](Self::reset_time)
    /// only records the timestamp, so a long gap before the first call does
    /// not cause a jump. A timestamp earlier than the previous one counts as
    /// no elapsed time.
    pub fn calc_at(&mut self, now_us: u64) -> Step {
        let dt = match self.last_time_us {
            Some(last) => now_us.saturating_sub(last) as f32 / 1_000_000.0,
            None => 0.0,
        };
        self.last_time_us = Some(now_us);
        self.compute_step(dt)
    }

    /// Forget the last timestamp; the next `calc_at` starts fresh.
    #[inline]
    pub fn reset_time(&mut self) {
        self.last_time_us = None;
    }

    /// Timestamp of the last `calc_at` call.
    #[inline]
    pub fn last_time_us(&self) -> Option<u64> {
        self.last_time_us
    }

    /// Current state as a [`Step`], without advancing.
    pub fn snapshot(&self) -> Step {
        Step {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            regime: self.regime(),
        }
    }

    /// Get the current position.
    #[inline]
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Get the current velocity.
    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Get the acceleration applied during the last step.
    #[inline]
    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    /// Get the target.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Signed distance `target - position`.
    #[inline]
    pub fn dist_to_target(&self) -> f32 {
        self.target - self.position
    }

    /// Check if the position equals the target.
    #[inline]
    pub fn is_pos_at_target(&self) -> bool {
        self.position == self.target
    }

    /// Check if the limiter rests on the (bound-clamped) target.
    #[inline]
    pub fn is_settled(&self) -> bool {
        self.regime() == Regime::Settled
    }

    /// Regime implied by the current state, using continuous braking distance.
    pub fn regime(&self) -> Regime {
        classify(
            self.limits.clamp(self.target) - self.position,
            self.velocity,
            self.vel_limit,
            self.effective_decel_limit(),
            0.0,
        )
    }

    /// Distance needed to stop from the current velocity at the deceleration limit.
    pub fn stopping_distance(&self) -> f32 {
        kinematics::stopping_distance(self.velocity, self.effective_decel_limit())
    }

    /// Set the target.
    ///
    /// NaN is ignored; infinities are clamped.
    pub fn set_target(&mut self, target: f32) {
        self.target = adjust::target(target, self.target, &self.limits, &mut self.adjustments);
    }

    /// Set the target relative to the current position.
    pub fn set_target_delta(&mut self, delta: f32) {
        self.set_target(self.position + delta);
    }

    /// Set the target and the velocity limit together.
    pub fn set_target_and_vel_limit(&mut self, target: f32, vel_limit: f32) {
        self.set_target(target);
        self.set_vel_limit(vel_limit);
    }

    /// Set position and velocity.
    pub fn set_position_velocity(&mut self, position: f32, velocity: f32) {
        self.set_position(position);
        self.set_velocity(velocity);
    }

    /// Set the position.
    ///
    /// Returns `true` if the position changed.
    pub fn set_position(&mut self, position: f32) -> bool {
        let position = adjust::state(position, self.position, &mut self.adjustments);
        if position != self.position {
            self.position = position;
            true
        } else {
            false
        }
    }

    /// Set the velocity.
    ///
    /// Returns `true` if the velocity changed.
    pub fn set_velocity(&mut self, velocity: f32) -> bool {
        let velocity = adjust::state(velocity, self.velocity, &mut self.adjustments);
        if velocity != self.velocity {
            self.velocity = velocity;
            true
        } else {
            false
        }
    }

    /// Get the velocity limit.
    #[inline]
    pub fn vel_limit(&self) -> f32 {
        self.vel_limit
    }

    /// Set the velocity limit.
    ///
    /// Returns `true` if the limit changed.
    pub fn set_vel_limit(&mut self, vel_limit: f32) -> bool {
        let vel_limit = adjust::limit(vel_limit, &mut self.adjustments);
        let changed = vel_limit != self.vel_limit;
        self.vel_limit = vel_limit;
        changed
    }

    /// Get the acceleration limit.
    #[inline]
    pub fn accel_limit(&self) -> f32 {
        self.accel_limit
    }

    /// Set the acceleration limit.
    ///
    /// Returns `true` if the limit changed.
    pub fn set_accel_limit(&mut self, accel_limit: f32) -> bool {
        let accel_limit = adjust::limit(accel_limit, &mut self.adjustments);
        let changed = accel_limit != self.accel_limit;
        self.accel_limit = accel_limit;
        changed
    }

    /// Get the configured deceleration limit (`None` when following acceleration).
    #[inline]
    pub fn decel_limit(&self) -> Option<f32> {
        self.decel_limit
    }

    /// Set the deceleration limit; `None` or NaN follows the acceleration limit.
    ///
    /// Returns `true` if the limit changed.
    pub fn set_decel_limit(&mut self, decel_limit: Option<f32>) -> bool {
        let decel_limit = decel_limit
            .filter(|d| !d.is_nan())
            .map(|d| adjust::limit(d, &mut self.adjustments));
        let changed = decel_limit != self.decel_limit;
        self.decel_limit = decel_limit;
        changed
    }

    /// Deceleration limit in effect.
    #[inline]
    pub fn effective_decel_limit(&self) -> f32 {
        self.decel_limit.unwrap_or(self.accel_limit)
    }

    /// Set velocity and acceleration limits.
    pub fn set_vel_accel_limits(&mut self, vel_limit: f32, accel_limit: f32) {
        self.set_vel_limit(vel_limit);
        self.set_accel_limit(accel_limit);
    }

    /// Get the position bounds.
    #[inline]
    pub fn pos_limits(&self) -> PositionLimits {
        self.limits
    }

    /// Set both position bounds.
    pub fn set_pos_limits(&mut self, low: f32, high: f32) {
        self.limits = adjust::pos_limits(low, high, &mut self.adjustments);
    }

    /// Set the lower position bound.
    pub fn set_low_pos_limit(&mut self, low: f32) {
        self.set_pos_limits(low, self.limits.high);
    }

    /// Set the upper position bound.
    pub fn set_high_pos_limit(&mut self, high: f32) {
        self.set_pos_limits(self.limits.low, high);
    }

    /// Check if wrong-way motion is prevented.
    #[inline]
    pub fn prevent_going_wrong_way(&self) -> bool {
        self.prevent_going_wrong_way
    }

    /// Never let velocity carry the position further from the target.
    pub fn set_prevent_going_wrong_way(&mut self, prevent: bool) {
        self.prevent_going_wrong_way = prevent;
    }

    /// Check if over-speed is clamped immediately.
    #[inline]
    pub fn prevent_going_too_fast(&self) -> bool {
        self.prevent_going_too_fast
    }

    /// Clamp over-speed immediately instead of braking it off.
    pub fn set_prevent_going_too_fast(&mut self, prevent: bool) {
        self.prevent_going_too_fast = prevent;
    }

    /// Get the emergency stopping factor.
    #[inline]
    pub fn max_stopping_decel(&self) -> f32 {
        self.max_stopping_decel
    }

    /// Set how many times the deceleration limit may be used to stop in time.
    ///
    /// Values below 1 are raised to 1; non-finite values reset to the default.
    pub fn set_max_stopping_decel(&mut self, factor: f32) {
        self.max_stopping_decel = adjust::stopping_decel(factor, &mut self.adjustments);
    }

    /// Inputs clamped or ignored since construction or the last clear.
    #[inline]
    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    /// Clear the adjustment record.
    pub fn clear_adjustments(&mut self) {
        self.adjustments = Adjustments::default();
    }

    /// Number of steps where speed had to be cut to stop before a position bound.
    #[inline]
    pub fn unsafe_stops(&self) -> u32 {
        self.unsafe_stops
    }
}

impl From<&LimiterConfig> for DerivsLimiter {
    fn from(config: &LimiterConfig) -> Self {
        Self::from_config(config)
    }
}
