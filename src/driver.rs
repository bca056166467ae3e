//! Fixed-rate stepping with an embedded-hal delay provider.
//!
//! For simple firmware without a scheduler: sleep one period, step the
//! limiter by exactly that period, repeat until it settles.

use embedded_hal::delay::DelayNs;

use crate::error::{DriveError, Error, Result};
use crate::limiter::{DerivsLimiter, Step, StepObserver};

/// Outcome of a completed drive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriveReport {
    /// Ticks it took to settle (0 if already settled).
    pub ticks: u32,
    /// State after the last tick.
    pub last: Step,
}

/// Steps a limiter at a fixed period.
///
/// Generic over the delay provider (must implement `DelayNs`).
pub struct FixedRateDriver<DELAY>
where
    DELAY: DelayNs,
{
    /// Delay provider for the step period.
    delay: DELAY,

    /// Step period in microseconds.
    period_us: u32,

    /// Tick budget for `run_to_target`.
    max_ticks: u32,
}

impl<DELAY> FixedRateDriver<DELAY>
where
    DELAY: DelayNs,
{
    /// Create a driver.
    ///
    /// # Errors
    ///
    /// Returns `DriveError::InvalidPeriod` if `period_us` is zero.
    pub fn new(delay: DELAY, period_us: u32, max_ticks: u32) -> Result<Self> {
        if period_us == 0 {
            return Err(Error::Drive(DriveError::InvalidPeriod));
        }

        Ok(Self {
            delay,
            period_us,
            max_ticks,
        })
    }

    /// Get the step period in microseconds.
    #[inline]
    pub fn period_us(&self) -> u32 {
        self.period_us
    }

    /// Get the step period in seconds.
    #[inline]
    pub fn period_secs(&self) -> f32 {
        self.period_us as f32 / 1_000_000.0
    }

    /// Get the tick budget.
    #[inline]
    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    /// Wait one period, then step the limiter by that period.
    pub fn tick<O: StepObserver>(&mut self, limiter: &mut DerivsLimiter, observer: &mut O) -> Step {
        self.delay.delay_us(self.period_us);
        limiter.compute_step_observed(self.period_secs(), observer)
    }

    /// Tick until the limiter settles on its target (blocking).
    ///
    /// # Errors
    ///
    /// Returns `DriveError::Timeout` if it has not settled after `max_ticks`.
    pub fn run_to_target<O: StepObserver>(
        &mut self,
        limiter: &mut DerivsLimiter,
        observer: &mut O,
    ) -> Result<DriveReport> {
        if limiter.is_settled() {
            return Ok(DriveReport {
                ticks: 0,
                last: limiter.snapshot(),
            });
        }

        for ticks in 1..=self.max_ticks {
            let last = self.tick(limiter, observer);
            if limiter.is_settled() {
                #[cfg(feature = "defmt")]
                defmt::debug!("settled at {} after {} ticks", last.position, ticks);
                return Ok(DriveReport { ticks, last });
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("not settled after {} ticks", self.max_ticks);
        Err(Error::Drive(DriveError::Timeout {
            ticks: self.max_ticks,
        }))
    }

    /// Release the delay provider.
    pub fn into_inner(self) -> DELAY {
        self.delay
    }
}
