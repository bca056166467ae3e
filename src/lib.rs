//! # derivs-limiter
//!
//! Limits the first and second derivative of a value as it approaches a target.
//!
//! ## Features
//!
//! - **Velocity and acceleration limits**: with an optional separate deceleration limit
//! - **Braking-curve stepping**: stops exactly on the target, no overshoot
//! - **Position bounds**: with an emergency stopping margin
//! - **Never fails**: invalid input is clamped, and each step runs in constant time
//! - **no_std compatible**: Core library works without standard library
//! - **Configuration-driven**: Define named limiters in TOML files
//!
//! ## Quick Start
//!
//! ```rust
//! use derivs_limiter::DerivsLimiter;
//!
//! let mut limiter = DerivsLimiter::builder()
//!     .vel_limit(1.0)
//!     .accel_limit(1.0)
//!     .target(10.0)
//!     .build();
//!
//! while !limiter.is_settled() {
//!     limiter.compute_step(0.1);
//! }
//! assert_eq!(limiter.position(), 10.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod limiter;

// Re-exports for ergonomic API
pub use config::{validate_config, LimiterConfig, PositionLimits, SystemConfig};
pub use driver::{DriveReport, FixedRateDriver};
pub use error::{Error, Result};
pub use limiter::{
    Adjustments, DerivsLimiter, DerivsLimiterBuilder, Mirror, Regime, Step, StepObserver,
};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};
