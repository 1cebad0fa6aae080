// Host-side tests for constants and their relationships.

use birthday_show::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn burst_intervals_are_a_few_seconds() {
    for secs in [
        CLASSIC_BURST_INTERVAL_SEC,
        CIRCUS_BURST_INTERVAL_SEC,
        NEON_BURST_INTERVAL_SEC,
    ] {
        assert!((2.0..=3.0).contains(&secs));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn confetti_physics_settles() {
    // Decay should shrink velocity every frame
    assert!(CONFETTI_DECAY > 0.0 && CONFETTI_DECAY < 1.0);
    assert!(CONFETTI_GRAVITY > 0.0);
    assert!(CONFETTI_DEFAULT_TICKS > 0);
    assert!(CONFETTI_MAX_PARTICLES as u32 >= 2 * CANNON_PARTICLES);
    assert!(CONFETTI_DEFAULT_SPREAD_DEG > 0.0 && CONFETTI_DEFAULT_SPREAD_DEG <= 360.0);
    assert!(CANNON_SPREAD_DEG > 0.0 && STREAM_SPREAD_DEG > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn stream_fits_in_the_shortest_interval() {
    assert!(STREAM_STEP_MS > 0);
    assert!(STREAM_DURATION_MS % STREAM_STEP_MS == 0);
    assert!((STREAM_DURATION_MS as f32) / 1000.0 < NEON_BURST_INTERVAL_SEC);
    assert!(STREAM_STEP_MS >= STREAM_MIN_STEP_MS);
    assert!(STREAM_DURATION_MS / STREAM_STEP_MS <= STREAM_MAX_STEPS as u64);
    assert_eq!(CONFETTI_DEFAULT_DRIFT, 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn reactive_mapping_stays_in_range() {
    // Intensity and radius both top out at 1
    assert!(IDLE_INTENSITY > 0.0 && IDLE_INTENSITY + INTENSITY_SPAN <= 1.0);
    assert!(IDLE_RADIUS_FRAC > 0.0 && IDLE_RADIUS_FRAC + RADIUS_SPAN_FRAC <= 1.0);
    assert!(IDLE_SPEED > 0.0 && SPEED_SPAN >= 0.0);
    assert!(POINT_RADIUS_MAX > POINT_RADIUS_MIN && POINT_RADIUS_MIN > 0.0);
    assert!(POINT_FALL_MAX > POINT_FALL_MIN && POINT_FALL_MIN > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn decor_and_comet_timings_are_consistent() {
    assert!(COMET_LIFETIME_MAX_SEC > COMET_LIFETIME_MIN_SEC);
    assert!(COMET_LIFETIME_MIN_SEC > COMET_SPAWN_INTERVAL_SEC);
    assert!(COMET_MAX_ALIVE > 0);

    assert!(DECOR_SWEEP_INTERVAL_MS > 0);
    // a sweep always lands between the end of an animation and its deadline
    assert!(DECOR_SWEEP_INTERVAL_MS as u64 <= DECOR_GRACE_MS);
    assert!(EMOJI_RESPAWN_SEC > 0.0);

    assert!(ANALYSER_FFT_SIZE.is_power_of_two());
    assert!((0.0..1.0).contains(&ANALYSER_SMOOTHING));
}
