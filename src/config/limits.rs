//! Position bound configuration and types.

/// Inclusive position bounds for a limiter.
///
/// Defaults to unbounded in both directions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PositionLimits {
    /// Minimum allowed position.
    pub low: f32,
    /// Maximum allowed position.
    pub high: f32,
}

impl Default for PositionLimits {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl PositionLimits {
    /// No bound in either direction.
    pub const UNBOUNDED: Self = Self {
        low: f32::NEG_INFINITY,
        high: f32::INFINITY,
    };

    /// Create new position limits without checking them.
    pub const fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    /// Create position limits, repairing invalid input.
    ///
    /// A NaN bound becomes unbounded on that side and swapped bounds are put
    /// back in order. The flag is `true` when anything had to be repaired.
    pub fn sanitized(low: f32, high: f32) -> (Self, bool) {
        let mut repaired = false;
        let low = if low.is_nan() {
            repaired = true;
            f32::NEG_INFINITY
        } else {
            low
        };
        let high = if high.is_nan() {
            repaired = true;
            f32::INFINITY
        } else {
            high
        };
        if low > high {
            (Self { low: high, high: low }, true)
        } else {
            (Self { low, high }, repaired)
        }
    }

    /// Check if limits are valid (low <= high, no NaN).
    pub fn is_valid(&self) -> bool {
        self.low <= self.high
    }

    /// Check if either side is finite.
    pub fn is_bounded(&self) -> bool {
        self.low.is_finite() || self.high.is_finite()
    }

    /// Check if a position is within limits.
    pub fn contains(&self, position: f32) -> bool {
        position >= self.low && position <= self.high
    }

    /// Clamp a position into the limits.
    pub fn clamp(&self, position: f32) -> f32 {
        if position < self.low {
            self.low
        } else if position > self.high {
            self.high
        } else {
            position
        }
    }

    /// Free distance from `position` to the bound that `direction` points at.
    ///
    /// Never negative. Infinite when that side is unbounded or `direction` is zero.
    pub fn distance_ahead(&self, position: f32, direction: f32) -> f32 {
        let room = if direction > 0.0 {
            self.high - position
        } else if direction < 0.0 {
            position - self.low
        } else {
            return f32::INFINITY;
        };
        room.max(0.0)
    }
}
