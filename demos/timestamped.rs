//! Timestamp-driven stepping.
//!
//! Steps a limiter from a free-running microsecond clock with uneven
//! intervals, the way a control loop without a fixed period would.

use derivs_limiter::{DerivsLimiter, Step};

fn main() {
    println!("=== Timestamped Limiter Example ===\n");

    let mut limiter = DerivsLimiter::builder()
        .vel_limit(100.0)
        .accel_limit(400.0)
        .target(50.0)
        .pos_limits(-60.0, 60.0)
        .build();

    let mut trace: Vec<(u64, Step)> = Vec::new();

    // first call only records the timestamp
    let mut now_us: u64 = 3_000_000;
    limiter.calc_at(now_us);

    let mut jitter = 0u64;
    while !limiter.is_settled() {
        jitter = (jitter * 7 + 3) % 5;
        now_us += 1_000 + jitter * 400;
        let step = limiter.calc_at(now_us);
        trace.push((now_us, step));
    }

    for (t, step) in trace.iter().step_by(25) {
        println!(
            "t={:8}us  pos={:7.3}  vel={:7.2}  {:?}",
            t, step.position, step.velocity, step.regime
        );
    }
    println!("Settled at {} after {} calls", limiter.position(), trace.len());

    // A long pause between sessions should not produce one huge step
    limiter.reset_time();
    limiter.set_target(-50.0);
    limiter.calc_at(now_us + 60_000_000);
    println!(
        "After reset and a 60s gap: pos={} (unchanged)",
        limiter.position()
    );

    println!("\n=== Example Complete ===");
}
