//! Permissive input handling.
//!
//! A control loop must always get an output, so invalid numbers are clamped
//! instead of rejected. What was clamped is remembered in [`Adjustments`].

use crate::config::{PositionLimits, DEFAULT_MAX_STOPPING_DECEL};

/// Record of inputs that had to be clamped or ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Adjustments {
    /// A negative limit was clamped to zero.
    pub negative_limit: bool,
    /// A NaN or infinite limit was clamped to zero.
    pub non_finite_limit: bool,
    /// A NaN target was ignored or an infinite one was clamped.
    pub target: bool,
    /// A NaN or infinite position or velocity write was ignored.
    pub state: bool,
    /// Position bounds were NaN or out of order.
    pub pos_limits: bool,
    /// The emergency stopping factor was out of range.
    pub stopping_decel: bool,
}

impl Adjustments {
    /// Check if any input was clamped.
    #[inline]
    pub fn any(&self) -> bool {
        self.negative_limit
            || self.non_finite_limit
            || self.target
            || self.state
            || self.pos_limits
            || self.stopping_decel
    }
}

/// Clamp a velocity/acceleration/deceleration limit to a finite value >= 0.
pub(crate) fn limit(value: f32, adjustments: &mut Adjustments) -> f32 {
    if !value.is_finite() {
        adjustments.non_finite_limit = true;
        #[cfg(feature = "defmt")]
        defmt::warn!("non-finite limit {} clamped to 0", value);
        0.0
    } else if value < 0.0 {
        adjustments.negative_limit = true;
        #[cfg(feature = "defmt")]
        defmt::warn!("negative limit {} clamped to 0", value);
        0.0
    } else {
        value
    }
}

/// Clamp the emergency stopping factor to a finite value >= 1.
pub(crate) fn stopping_decel(value: f32, adjustments: &mut Adjustments) -> f32 {
    if !value.is_finite() {
        adjustments.stopping_decel = true;
        #[cfg(feature = "defmt")]
        defmt::warn!("max stopping decel {} replaced by default", value);
        DEFAULT_MAX_STOPPING_DECEL
    } else if value < 1.0 {
        adjustments.stopping_decel = true;
        #[cfg(feature = "defmt")]
        defmt::warn!("max stopping decel {} raised to 1", value);
        1.0
    } else {
        value
    }
}

/// Sanitize a target: NaN keeps `previous`, infinities clamp to the bounds.
pub(crate) fn target(
    value: f32,
    previous: f32,
    limits: &PositionLimits,
    adjustments: &mut Adjustments,
) -> f32 {
    if value.is_nan() {
        adjustments.target = true;
        #[cfg(feature = "defmt")]
        defmt::warn!("NaN target ignored");
        previous
    } else if value.is_infinite() {
        adjustments.target = true;
        let clamped = limits.clamp(value);
        if clamped.is_finite() {
            clamped
        } else if value > 0.0 {
            f32::MAX
        } else {
            f32::MIN
        }
    } else {
        value
    }
}

/// Accept a finite position or velocity write, otherwise keep `previous`.
pub(crate) fn state(value: f32, previous: f32, adjustments: &mut Adjustments) -> f32 {
    if value.is_finite() {
        value
    } else {
        adjustments.state = true;
        #[cfg(feature = "defmt")]
        defmt::warn!("non-finite state write {} ignored", value);
        previous
    }
}

/// Sanitize position bounds.
pub(crate) fn pos_limits(low: f32, high: f32, adjustments: &mut Adjustments) -> PositionLimits {
    let (limits, repaired) = PositionLimits::sanitized(low, high);
    if repaired {
        adjustments.pos_limits = true;
        #[cfg(feature = "defmt")]
        defmt::warn!("position limits repaired to [{}, {}]", limits.low, limits.high);
    }
    limits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_clamping() {
        let mut adj = Adjustments::default();
        assert_eq!(limit(3.0, &mut adj), 3.0);
        assert!(!adj.any());

        assert_eq!(limit(-3.0, &mut adj), 0.0);
        assert!(adj.negative_limit);

        assert_eq!(limit(f32::NAN, &mut adj), 0.0);
        assert!(adj.non_finite_limit);
    }

    #[test]
    fn test_target_sanitizing() {
        let mut adj = Adjustments::default();
        let bounded = PositionLimits::new(-1.0, 1.0);

        assert_eq!(target(f32::NAN, 0.5, &bounded, &mut adj), 0.5);
        assert!(adj.target);
        assert_eq!(target(f32::INFINITY, 0.0, &bounded, &mut adj), 1.0);
        assert_eq!(
            target(f32::NEG_INFINITY, 0.0, &PositionLimits::UNBOUNDED, &mut adj),
            f32::MIN
        );
    }

    #[test]
    fn test_stopping_decel_bounds() {
        let mut adj = Adjustments::default();
        assert_eq!(stopping_decel(3.0, &mut adj), 3.0);
        assert!(!adj.stopping_decel);
        assert_eq!(stopping_decel(0.2, &mut adj), 1.0);
        assert_eq!(stopping_decel(f32::NAN, &mut adj), DEFAULT_MAX_STOPPING_DECEL);
        assert!(adj.stopping_decel);
    }
}
