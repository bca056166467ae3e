//! Limiter module for derivs-limiter.
//!
//! Provides the single-axis limiter, its builder, the braking kinematics it
//! is built on, and the observer side channel.

mod adjust;
mod builder;
mod derivs;
pub mod kinematics;
mod observer;

pub use adjust::Adjustments;
pub use builder::DerivsLimiterBuilder;
pub use derivs::{DerivsLimiter, Step};
pub use kinematics::Regime;
pub use observer::{Mirror, StepObserver};
