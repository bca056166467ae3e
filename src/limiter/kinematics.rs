//! Braking kinematics and the derived motion regime.
//!
//! Everything here is a pure function of the current state, so the regime
//! never needs to be stored between steps.

use libm::{fabsf, sqrtf};

/// What the limiter does on a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Regime {
    /// Speeding up toward the target.
    Accelerating,
    /// Moving toward the target at the velocity limit.
    Cruising,
    /// Slowing down: braking for the target, moving the wrong way or too fast.
    Decelerating,
    /// Resting on the target.
    Settled,
}

impl Regime {
    /// Check if velocity is being reduced.
    #[inline]
    pub fn is_braking(self) -> bool {
        self == Regime::Decelerating
    }
}

/// Sign of `x` as -1, 0 or 1.
#[inline]
pub(crate) fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Stopping distance `v² / (2·decel)` of continuous braking.
///
/// Infinite when the velocity is non-zero and there is no deceleration.
pub fn stopping_distance(velocity: f32, decel: f32) -> f32 {
    if velocity == 0.0 {
        0.0
    } else if decel > 0.0 {
        velocity * velocity / (2.0 * decel)
    } else {
        f32::INFINITY
    }
}

/// Stopping distance when velocity is updated before position every `dt`.
///
/// Adds `|v|·dt/2` to the continuous distance.
pub fn discrete_stopping_distance(velocity: f32, decel: f32, dt: f32) -> f32 {
    stopping_distance(velocity, decel) + fabsf(velocity) * dt.max(0.0) * 0.5
}

/// Largest speed that can still stop within `distance` at `decel`.
///
/// Inverse of [`discrete_stopping_distance`]; with `dt == 0` it is the
/// continuous `sqrt(2·decel·distance)`.
pub fn braking_speed(distance: f32, decel: f32, dt: f32) -> f32 {
    if !(distance > 0.0) || !(decel > 0.0) {
        return 0.0;
    }
    if distance.is_infinite() || decel.is_infinite() {
        return f32::INFINITY;
    }

    let dt = dt.max(0.0);
    let half_step = 0.5 * decel * dt;
    let radicand = half_step * half_step + 2.0 * decel * distance;
    if radicand.is_finite() {
        sqrtf(radicand) - half_step
    } else if dt > 0.0 {
        // Huge step: the whole distance has to be covered within two steps.
        2.0 * distance / dt
    } else {
        f32::INFINITY
    }
}

/// Classify the motion for a position error `error = target - position`.
pub fn classify(error: f32, velocity: f32, vel_limit: f32, decel: f32, dt: f32) -> Regime {
    if velocity == 0.0 {
        return if error == 0.0 {
            Regime::Settled
        } else {
            Regime::Accelerating
        };
    }

    // moving away from the target, or still moving on it
    if velocity * error <= 0.0 {
        return Regime::Decelerating;
    }

    let speed = fabsf(velocity);
    if speed > vel_limit || speed >= braking_speed(fabsf(error), decel, dt) {
        Regime::Decelerating
    } else if speed >= vel_limit {
        Regime::Cruising
    } else {
        Regime::Accelerating
    }
}

/// Move `from` toward `to` by at most `max_delta`.
#[inline]
pub(crate) fn move_toward(from: f32, to: f32, max_delta: f32) -> f32 {
    let delta = to - from;
    if fabsf(delta) <= max_delta {
        to
    } else {
        from + sign(delta) * max_delta
    }
}

/// Change `velocity` toward `desired` within one step.
///
/// Speeding up uses `accel`, slowing down uses `decel`. A reversal brakes to
/// zero first and spends whatever is left of `dt` accelerating the other way.
pub(crate) fn approach(velocity: f32, desired: f32, accel: f32, decel: f32, dt: f32) -> f32 {
    if velocity == desired {
        return velocity;
    }

    let slowing = velocity != 0.0 && (desired - velocity) * velocity < 0.0;
    if !slowing {
        return move_toward(velocity, desired, accel * dt);
    }

    if desired * velocity > 0.0 {
        return move_toward(velocity, desired, decel * dt);
    }

    let braked = move_toward(velocity, 0.0, decel * dt);
    if braked != 0.0 || desired == 0.0 {
        return braked;
    }

    // braked reached zero, so decel > 0 here
    let remaining = (dt - fabsf(velocity) / decel).max(0.0);
    move_toward(0.0, desired, accel * remaining)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braking_speed_inverts_stopping_distance() {
        for &(distance, decel, dt) in &[(10.0, 1.0, 0.1), (0.3, 4.0, 0.01), (2.0, 0.5, 0.0)] {
            let speed = braking_speed(distance, decel, dt);
            let back = discrete_stopping_distance(speed, decel, dt);
            assert!((back - distance).abs() < 1e-3, "{} vs {}", back, distance);
        }
    }

    #[test]
    fn test_braking_speed_degenerate_inputs() {
        assert_eq!(braking_speed(0.0, 1.0, 0.1), 0.0);
        assert_eq!(braking_speed(5.0, 0.0, 0.1), 0.0);
        assert_eq!(braking_speed(f32::NAN, 1.0, 0.1), 0.0);
        assert!(braking_speed(f32::INFINITY, 1.0, 0.1).is_infinite());
    }

    #[test]
    fn test_stopping_distance() {
        assert_eq!(stopping_distance(2.0, 1.0), 2.0);
        assert_eq!(stopping_distance(-2.0, 4.0), 0.5);
        assert_eq!(stopping_distance(0.0, 0.0), 0.0);
        assert!(stopping_distance(1.0, 0.0).is_infinite());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0.0, 0.0, 1.0, 1.0, 0.1), Regime::Settled);
        assert_eq!(classify(5.0, 0.0, 1.0, 1.0, 0.1), Regime::Accelerating);
        assert_eq!(classify(5.0, 1.0, 1.0, 1.0, 0.1), Regime::Cruising);
        assert_eq!(classify(5.0, -0.5, 1.0, 1.0, 0.1), Regime::Decelerating);
        assert_eq!(classify(0.1, 1.0, 1.0, 1.0, 0.1), Regime::Decelerating);
        assert_eq!(classify(5.0, 2.0, 1.0, 1.0, 0.1), Regime::Decelerating);
    }

    #[test]
    fn test_approach_reversal_uses_both_limits() {
        // 0.05 s braking at 2, then 0.05 s accelerating at 1
        let v = approach(0.1, -1.0, 1.0, 2.0, 0.1);
        assert!((v - (-0.05)).abs() < 1e-6);
    }

    #[test]
    fn test_approach_speeds_up_and_slows_down() {
        assert!((approach(0.0, 1.0, 2.0, 4.0, 0.1) - 0.2).abs() < 1e-6);
        assert!((approach(1.0, 0.5, 2.0, 4.0, 0.1) - 0.6).abs() < 1e-6);
        assert_eq!(approach(0.5, 0.5, 2.0, 4.0, 0.1), 0.5);
    }
}
