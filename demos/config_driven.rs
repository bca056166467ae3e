//! Example: Configuration-driven limiters.
//!
//! This example demonstrates how to:
//! - Load named limiter configurations from TOML
//! - Build limiters from configuration
//! - Drive a limiter at a fixed rate with a delay provider
//!
//! Run with: `cargo run --example config_driven --features std`

use derivs_limiter::{
    config::parse_config,
    error::{ConfigError, Error, Result},
    DerivsLimiter, FixedRateDriver, Mirror,
};

/// Mock delay for demonstration.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {
        // In real code, this would actually delay
    }
}

const CONFIG: &str = r#"
[limiters.lift]
vel_limit = 0.5
accel_limit = 1.0
decel_limit = 0.25
target = 2.0
pos_limit_low = 0.0
pos_limit_high = 2.5

[limiters.pan]
vel_limit = 90.0
accel_limit = 360.0
target = -45.0
prevent_going_wrong_way = true
max_stopping_decel = 3.0
"#;

fn main() -> Result<()> {
    println!("=== Configuration-Driven Limiters ===\n");

    let config = parse_config(CONFIG)?;
    println!("Loaded {} limiter(s):", config.limiters.len());
    for name in config.limiter_names() {
        let limiter = config.limiter_or_error(name)?;
        println!(
            "  {}: vel {} accel {} decel {} {}",
            name,
            limiter.vel_limit,
            limiter.accel_limit,
            limiter.effective_decel_limit(),
            if limiter.is_asymmetric() { "(asymmetric)" } else { "" }
        );
    }

    // Unknown names are reported, not panicked on
    match config.limiter_or_error("tilt") {
        Err(Error::Config(ConfigError::LimiterNotFound(name))) => {
            println!("\nNo limiter named '{}'", name);
        }
        _ => unreachable!(),
    }

    println!("\n=== Driving 'lift' at 100 Hz ===");
    let mut lift = DerivsLimiter::from_config(config.limiter_or_error("lift")?);
    let mut driver = FixedRateDriver::new(MockDelay, 10_000, 10_000)?;

    let mut shown_pos = 0.0_f32;
    let mut shown_vel = 0.0_f32;
    let report = driver.run_to_target(&mut lift, &mut Mirror::new(&mut shown_pos, &mut shown_vel))?;
    println!(
        "Settled after {} ticks ({:.2}s), mirrored position {}",
        report.ticks,
        report.ticks as f32 * driver.period_secs(),
        shown_pos
    );

    println!("\n=== Stepping 'pan' manually ===");
    let mut pan = DerivsLimiter::from_config(config.limiter_or_error("pan")?);
    let mut peak = 0.0_f32;
    while !pan.is_settled() {
        let step = pan.compute_step(0.001);
        peak = peak.max(step.velocity.abs());
    }
    println!("Reached {} with peak speed {:.1}", pan.position(), peak);

    println!("\n=== Example Complete ===");
    Ok(())
}
