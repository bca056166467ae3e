//! Property tests for the limiter invariants.

use derivs_limiter::DerivsLimiter;
use proptest::prelude::*;

fn limiter(vel: f32, accel: f32, decel: f32, target: f32, start: f32) -> DerivsLimiter {
    DerivsLimiter::builder()
        .vel_limit(vel)
        .accel_limit(accel)
        .decel_limit(decel)
        .target(target)
        .start_pos(start)
        .build()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn speed_never_exceeds_limit(
        vel in 0.1f32..20.0,
        accel in 0.1f32..50.0,
        decel in 0.1f32..50.0,
        target in -100.0f32..100.0,
        start_vel in -3.0f32..3.0,
        lowered in 0.0f32..1.0,
        dt in 0.001f32..0.2,
    ) {
        // start_vel beyond +-1 starts over the limit
        let mut l = limiter(vel, accel, decel, target, 0.0);
        l.set_velocity(start_vel * vel);

        for i in 0..500 {
            if i == 150 {
                l.set_vel_limit(vel * lowered);
            }
            if i == 250 {
                l.set_target(-target);
            }
            let step = l.compute_step(dt);
            prop_assert!(
                step.velocity.abs() <= l.vel_limit(),
                "{} > {}",
                step.velocity,
                l.vel_limit()
            );
        }
    }

    #[test]
    fn external_velocity_write_is_clamped_next_step(
        vel in 0.1f32..20.0,
        target in -100.0f32..100.0,
        kick in -100.0f32..100.0,
        dt in 0.001f32..0.2,
    ) {
        let mut l = limiter(vel, 1.0, 1.0, target, 0.0);
        for _ in 0..20 {
            l.compute_step(dt);
        }

        l.set_velocity(kick);
        let step = l.compute_step(dt);
        prop_assert!(step.velocity.abs() <= vel);
    }

    #[test]
    fn acceleration_stays_within_braking_envelope(
        vel in 0.1f32..20.0,
        accel in 0.1f32..50.0,
        decel in 0.1f32..50.0,
        target in -100.0f32..100.0,
        dt in 0.001f32..0.2,
    ) {
        let mut l = limiter(vel, accel, decel, target, 0.0);
        let bound = accel.max(decel * l.max_stopping_decel()) * 1.001 + 1e-3;

        for i in 0..500 {
            if i == 100 {
                l.set_target(target * -0.5);
            }
            let step = l.compute_step(dt);
            prop_assert!(step.acceleration.abs() <= bound, "{} > {}", step.acceleration, bound);
        }
    }

    #[test]
    fn position_stays_within_bounds(
        low in -50.0f32..0.0,
        span in 0.0f32..50.0,
        target in -200.0f32..200.0,
        start_vel in -30.0f32..30.0,
        dt in 0.001f32..0.2,
    ) {
        let high = low + span;
        let mut l = DerivsLimiter::builder()
            .vel_limit(10.0)
            .accel_limit(5.0)
            .target(target)
            .start(low + span * 0.5, start_vel)
            .pos_limits(low, high)
            .build();

        for _ in 0..500 {
            let step = l.compute_step(dt);
            prop_assert!(step.position >= low && step.position <= high);
        }
    }

    #[test]
    fn zero_dt_changes_nothing(
        target in -100.0f32..100.0,
        steps in 0usize..50,
    ) {
        let mut l = limiter(2.0, 3.0, 1.0, target, 0.0);
        for _ in 0..steps {
            l.compute_step(0.05);
        }

        let before = (l.position(), l.velocity(), l.acceleration());
        l.compute_step(0.0);
        prop_assert_eq!(before, (l.position(), l.velocity(), l.acceleration()));
    }

    #[test]
    fn dist_to_target_is_exact(
        target in -100.0f32..100.0,
        start in -100.0f32..100.0,
        dt in 0.001f32..0.2,
    ) {
        let mut l = limiter(4.0, 2.0, 3.0, target, start);
        for _ in 0..100 {
            l.compute_step(dt);
            prop_assert_eq!(l.dist_to_target(), l.target() - l.position());
        }
    }

    #[test]
    fn zero_limits_never_move(
        target in -100.0f32..100.0,
        start in -100.0f32..100.0,
        start_vel in -10.0f32..10.0,
        dt in 0.0f32..10.0,
    ) {
        let mut l = limiter(0.0, 0.0, 0.0, target, start);
        l.set_velocity(start_vel);
        // zero dt leaves the written velocity in place
        let dt = if dt == 0.0 { 0.5 } else { dt };
        for _ in 0..20 {
            let step = l.compute_step(dt);
            prop_assert_eq!(step.position, start);
            prop_assert_eq!(step.velocity, 0.0);
        }
    }

    #[test]
    fn settles_exactly_on_target_from_rest(
        vel in 0.5f32..10.0,
        accel in 0.5f32..10.0,
        decel in 0.5f32..10.0,
        target in -50.0f32..50.0,
        dt in 0.01f32..0.1,
    ) {
        let mut l = limiter(vel, accel, decel, target, 0.0);
        let tolerance = 1e-3 * (1.0 + target.abs());

        let mut steps = 0;
        while !l.is_settled() && steps < 20_000 {
            let step = l.compute_step(dt);
            if target >= 0.0 {
                prop_assert!(step.position <= target + tolerance);
            } else {
                prop_assert!(step.position >= target - tolerance);
            }
            steps += 1;
        }

        prop_assert_eq!(l.position(), target);
        prop_assert_eq!(l.velocity(), 0.0);
    }
}
