//! Basic limiter example.
//!
//! Moves a value from 0 to 10 with asymmetric acceleration/deceleration,
//! prints the motion as it goes, then retargets mid-move.

use derivs_limiter::{DerivsLimiter, Regime, Step};

fn print_step(t: f32, step: &Step) {
    println!(
        "t={:5.2}s  pos={:8.4}  vel={:7.4}  acc={:7.3}  {:?}",
        t, step.position, step.velocity, step.acceleration, step.regime
    );
}

fn main() {
    println!("=== Basic Limiter Example ===\n");

    let mut limiter = DerivsLimiter::builder()
        .vel_limit(2.0)
        .accel_limit(4.0)
        .decel_limit(1.0) // slower decel for a smooth stop
        .target(10.0)
        .build();

    let dt = 0.05;
    let mut t = 0.0;
    let mut last_regime = None;

    while !limiter.is_settled() {
        let step = limiter.compute_step(dt);
        t += dt;

        // only print regime changes and every second
        if last_regime != Some(step.regime) || (t % 1.0) < dt {
            print_step(t, &step);
            last_regime = Some(step.regime);
        }
    }
    println!("\nSettled at {} after {:.2}s", limiter.position(), t);

    println!("\n=== Retarget While Moving ===");
    limiter.set_target(0.0);
    for _ in 0..20 {
        limiter.compute_step(dt);
    }
    println!(
        "Heading back: pos={:.3} vel={:.3} stopping distance={:.3}",
        limiter.position(),
        limiter.velocity(),
        limiter.stopping_distance()
    );

    limiter.set_target(limiter.position() + 0.05);
    let step = limiter.compute_step(dt);
    if step.regime == Regime::Decelerating {
        println!("New target is behind the stopping point, braking first");
    }

    let mut steps = 0;
    while !limiter.is_settled() {
        limiter.compute_step(dt);
        steps += 1;
    }
    println!("Settled at {} after {} more steps", limiter.position(), steps);

    println!("\n=== Example Complete ===");
}
