//! Show timing and effect tuning constants.
//!
//! Presets in `config.rs` are built from these so that magic numbers stay in
//! one place and can be sanity-checked by the host tests.

// Periodic emitter intervals (seconds)
pub const CLASSIC_BURST_INTERVAL_SEC: f32 = 3.0;
pub const CIRCUS_BURST_INTERVAL_SEC: f32 = 2.5;
pub const NEON_BURST_INTERVAL_SEC: f32 = 2.0;

// Confetti physics, per animation frame (canvas-confetti defaults)
pub const CONFETTI_DECAY: f32 = 0.9;
pub const CONFETTI_GRAVITY: f32 = 1.0;
pub const CONFETTI_DEFAULT_TICKS: u32 = 200;
pub const CONFETTI_DEFAULT_SPREAD_DEG: f32 = 45.0;
pub const CONFETTI_DEFAULT_VELOCITY: f32 = 45.0;
pub const CONFETTI_SCALAR: f32 = 1.0;
pub const CONFETTI_DEFAULT_DRIFT: f32 = 0.0;
pub const CONFETTI_MAX_PARTICLES: usize = 2400;

// Corner cannons
pub const CANNON_PARTICLES: u32 = 180;
pub const CANNON_SPREAD_DEG: f32 = 70.0;
pub const CANNON_VELOCITY: f32 = 28.0;

// Fireworks stream: small sub-bursts from both sides for a short window
pub const STREAM_DURATION_MS: u64 = 1500;
pub const STREAM_STEP_MS: u64 = 50;
pub const STREAM_PARTICLES: u32 = 10;
pub const STREAM_SPREAD_DEG: f32 = 55.0;
pub const STREAM_MIN_STEP_MS: u64 = 1;
pub const STREAM_MAX_STEPS: u32 = 120;

// Drifting point field
pub const POINT_FIELD_COUNT: usize = 200;
pub const POINT_RADIUS_MIN: f32 = 2.0;
pub const POINT_RADIUS_MAX: f32 = 8.0;
pub const POINT_FALL_MIN: f32 = 1.0;
pub const POINT_FALL_MAX: f32 = 4.0;

// Reactive mapping: idle values at loudness 0 and span added at loudness 1
pub const IDLE_INTENSITY: f32 = 0.35;
pub const INTENSITY_SPAN: f32 = 0.65;
pub const IDLE_RADIUS_FRAC: f32 = 0.55;
pub const RADIUS_SPAN_FRAC: f32 = 0.45;
pub const IDLE_SPEED: f32 = 1.0;
pub const SPEED_SPAN: f32 = 2.0;
pub const HUE_CYCLE_DEG_PER_SEC: f32 = 24.0;

// Comets
pub const COMET_SPAWN_INTERVAL_SEC: f32 = 0.9;
pub const COMET_LIFETIME_MIN_SEC: f32 = 1.2;
pub const COMET_LIFETIME_MAX_SEC: f32 = 2.4;
pub const COMET_TAIL_PX: f32 = 120.0;
pub const COMET_MAX_ALIVE: usize = 12;

// Ephemeral decor
pub const CLASSIC_EMOJI_COUNT: usize = 15;
pub const CIRCUS_EMOJI_COUNT: usize = 18;
pub const NEON_EMOJI_COUNT: usize = 10;
pub const EMOJI_RESPAWN_SEC: f32 = 12.0;
pub const DECOR_GRACE_MS: u64 = 200;
// Must not exceed the grace so the sweep lands before each deadline
pub const DECOR_SWEEP_INTERVAL_MS: i32 = 100;

// Audio unlock
pub const AUTOPLAY_PROBE_DELAY_MS: u32 = 1000;
pub const ANALYSER_FFT_SIZE: u32 = 256;
pub const ANALYSER_SMOOTHING: f64 = 0.8;
