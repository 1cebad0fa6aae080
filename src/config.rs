//! Show configuration: one parameterized record instead of a copy per page
//! variant.
//!
//! A [`ShowConfig`] is normally created from a [`Preset`] and optionally
//! adjusted through [`ShowConfigBuilder`]. Everything here is plain data so it
//! can be built and validated on the host.

use crate::constants::*;
use crate::core::color::{Palette, NEON, PARTY};
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("unknown preset '{0}'")]
    UnknownPreset(String),
    #[error("burst interval must be positive")]
    InvalidInterval,
    #[error("invalid {what} range: {lo}..{hi}")]
    InvalidRange {
        what: &'static str,
        lo: f32,
        hi: f32,
    },
    #[error("emoji glyph set is empty")]
    EmptyGlyphs,
    #[error("emoji grace {0:?} is shorter than the {1:?} cleanup sweep")]
    GraceTooShort(Duration, Duration),
    #[error("stream step {step:?} over {duration:?} is too fine")]
    InvalidStream { step: Duration, duration: Duration },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Preset {
    /// Falling confetti dots and emoji floating up the page.
    #[default]
    Classic,
    /// Corner cannons, fireworks streams and emoji rain.
    Circus,
    /// Music-reactive radial gradient with comets.
    Neon,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Classic, Preset::Circus, Preset::Neon];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Circus => "circus",
            Preset::Neon => "neon",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

/// Where a burst is emitted from, in normalized viewport coordinates
/// (0,0 top-left, 1,1 bottom-right).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Origin {
    Fixed { x: f32, y: f32 },
    /// Uniformly random inside the rectangle.
    RandomPoint { x: (f32, f32), y: (f32, f32) },
    /// Random x along a horizontal band at height `y`.
    Band { y: f32, x: (f32, f32) },
}

/// Unresolved parameters of one burst.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstSpec {
    pub particle_count: u32,
    /// Launch direction in degrees; 90 is straight up.
    pub angle_deg: f32,
    pub spread_deg: f32,
    pub start_velocity: f32,
    /// Particle lifetime in animation frames.
    pub ticks: u32,
    /// Sideways pixels added every frame.
    pub drift: f32,
    pub origin: Origin,
    pub palette: Palette,
}

impl BurstSpec {
    pub fn new(particle_count: u32, origin: Origin, palette: Palette) -> Self {
        Self {
            particle_count,
            angle_deg: 90.0,
            spread_deg: CONFETTI_DEFAULT_SPREAD_DEG,
            start_velocity: CONFETTI_DEFAULT_VELOCITY,
            ticks: CONFETTI_DEFAULT_TICKS,
            drift: CONFETTI_DEFAULT_DRIFT,
            origin,
            palette,
        }
    }

    pub fn angle(mut self, deg: f32) -> Self {
        self.angle_deg = deg;
        self
    }

    pub fn spread(mut self, deg: f32) -> Self {
        self.spread_deg = deg;
        self
    }

    pub fn velocity(mut self, v: f32) -> Self {
        self.start_velocity = v;
        self
    }

    pub fn ticks(mut self, ticks: u32) -> Self {
        self.ticks = ticks;
        self
    }

    pub fn drift(mut self, drift: f32) -> Self {
        self.drift = drift;
        self
    }
}

/// Repeats `bursts` every `step` for `duration` to make a short sequence of
/// sub-bursts out of one emitter tick.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamSpec {
    pub duration: Duration,
    pub step: Duration,
    pub bursts: SmallVec<[BurstSpec; 2]>,
}

/// Everything the emitter fires on one tick.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct BurstPattern {
    pub bursts: SmallVec<[BurstSpec; 2]>,
    pub stream: Option<StreamSpec>,
}

impl BurstPattern {
    pub fn single(spec: BurstSpec) -> Self {
        Self {
            bursts: smallvec![spec],
            stream: None,
        }
    }

    pub fn corner_cannons(palette: Palette) -> Self {
        let side = |x: f32| {
            BurstSpec::new(CANNON_PARTICLES, Origin::Fixed { x, y: 0.6 }, palette)
                .spread(CANNON_SPREAD_DEG)
                .velocity(CANNON_VELOCITY)
                .ticks(CONFETTI_DEFAULT_TICKS)
        };
        Self {
            bursts: smallvec![side(0.0), side(1.0)],
            stream: None,
        }
    }

    pub fn fireworks_stream(palette: Palette) -> StreamSpec {
        let side = |x: f32, angle: f32| {
            BurstSpec::new(STREAM_PARTICLES, Origin::Fixed { x, y: 0.6 }, palette)
                .angle(angle)
                .spread(STREAM_SPREAD_DEG)
        };
        StreamSpec {
            duration: Duration::from_millis(STREAM_DURATION_MS),
            step: Duration::from_millis(STREAM_STEP_MS),
            bursts: smallvec![side(0.0, 60.0), side(1.0, 120.0)],
        }
    }

    pub fn with_stream(mut self, stream: StreamSpec) -> Self {
        self.stream = Some(stream);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bursts.is_empty() && self.stream.as_ref().map_or(true, |s| s.bursts.is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BackgroundKind {
    /// Color-cycling radial gradient.
    Gradient,
    /// Gradient underlay plus a field of falling dots.
    PointField,
    /// Gradient underlay plus short-lived comet streaks.
    Comets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorMotion {
    /// Bottom-to-top drift with a full rotation.
    Rise,
    /// Top-to-bottom fall with a fade.
    Rain,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EmojiConfig {
    pub glyphs: &'static [&'static str],
    pub count: usize,
    pub size_px: (f32, f32),
    pub duration_sec: (f32, f32),
    pub grace: Duration,
    pub motion: DecorMotion,
    /// Spawn another batch on this period; `None` spawns once at mount.
    pub respawn: Option<Duration>,
}

pub const CLOWN_GLYPHS: &[&str] = &["🤡", "🎉", "🥳", "🤡", "🎊", "🤹‍♂️"];
pub const BALLOON_GLYPHS: &[&str] = &["🎈", "🎈", "🤡", "🎉", "✨", "🎪", "🎵"];
pub const SPARKLE_GLYPHS: &[&str] = &["✨", "🎂", "💫", "🎁", "🌟"];

/// DOM element ids the show binds to.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementIds {
    pub canvas: String,
    pub audio: String,
    pub hint: String,
    pub start_button: String,
    pub burst_button: String,
    pub fireworks_button: String,
    pub emoji_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "show-canvas".into(),
            audio: "bg-music".into(),
            hint: "tap-hint".into(),
            start_button: "btn-show".into(),
            burst_button: "btn-burst".into(),
            fireworks_button: "btn-fireworks".into(),
            emoji_button: "btn-emoji".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ShowConfig {
    pub preset: Preset,
    pub ids: ElementIds,
    pub burst_interval: Duration,
    pub pattern: BurstPattern,
    pub background: BackgroundKind,
    pub point_count: usize,
    pub point_palette: Palette,
    pub base_hue_deg: f32,
    pub emoji: EmojiConfig,
    /// Let the background follow the music's loudness once it plays.
    pub reactive: bool,
    /// One timed playback attempt after mount, independent of the gesture.
    pub autoplay_probe: Option<Duration>,
}

impl ShowConfig {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self {
                preset,
                ids: ElementIds::default(),
                burst_interval: Duration::from_secs_f32(CLASSIC_BURST_INTERVAL_SEC),
                pattern: BurstPattern::single(
                    BurstSpec::new(
                        120,
                        Origin::RandomPoint {
                            x: (0.1, 0.9),
                            y: (0.1, 0.5),
                        },
                        Palette::Rainbow,
                    )
                    .spread(360.0)
                    .velocity(30.0),
                ),
                background: BackgroundKind::PointField,
                point_count: POINT_FIELD_COUNT,
                point_palette: Palette::Rainbow,
                base_hue_deg: 275.0,
                emoji: EmojiConfig {
                    glyphs: CLOWN_GLYPHS,
                    count: CLASSIC_EMOJI_COUNT,
                    size_px: (40.0, 40.0),
                    duration_sec: (6.0, 12.0),
                    grace: Duration::from_millis(DECOR_GRACE_MS),
                    motion: DecorMotion::Rise,
                    respawn: Some(Duration::from_secs_f32(EMOJI_RESPAWN_SEC)),
                },
                reactive: false,
                autoplay_probe: Some(Duration::from_millis(AUTOPLAY_PROBE_DELAY_MS as u64)),
            },
            Preset::Circus => Self {
                preset,
                ids: ElementIds::default(),
                burst_interval: Duration::from_secs_f32(CIRCUS_BURST_INTERVAL_SEC),
                pattern: BurstPattern::corner_cannons(Palette::Fixed(PARTY))
                    .with_stream(BurstPattern::fireworks_stream(Palette::Fixed(PARTY))),
                background: BackgroundKind::Gradient,
                point_count: 0,
                point_palette: Palette::Fixed(PARTY),
                base_hue_deg: 320.0,
                emoji: EmojiConfig {
                    glyphs: BALLOON_GLYPHS,
                    count: CIRCUS_EMOJI_COUNT,
                    size_px: (20.0, 44.0),
                    duration_sec: (5.0, 5.0),
                    grace: Duration::from_millis(DECOR_GRACE_MS),
                    motion: DecorMotion::Rain,
                    respawn: None,
                },
                reactive: true,
                autoplay_probe: None,
            },
            Preset::Neon => Self {
                preset,
                ids: ElementIds::default(),
                burst_interval: Duration::from_secs_f32(NEON_BURST_INTERVAL_SEC),
                pattern: BurstPattern::single(
                    BurstSpec::new(
                        60,
                        Origin::Band {
                            y: 0.15,
                            x: (0.0, 1.0),
                        },
                        Palette::Fixed(NEON),
                    )
                    .angle(270.0)
                    .spread(90.0)
                    .velocity(20.0),
                ),
                background: BackgroundKind::Comets,
                point_count: 0,
                point_palette: Palette::Fixed(NEON),
                base_hue_deg: 200.0,
                emoji: EmojiConfig {
                    glyphs: SPARKLE_GLYPHS,
                    count: NEON_EMOJI_COUNT,
                    size_px: (24.0, 48.0),
                    duration_sec: (7.0, 11.0),
                    grace: Duration::from_millis(DECOR_GRACE_MS),
                    motion: DecorMotion::Rise,
                    respawn: Some(Duration::from_secs_f32(EMOJI_RESPAWN_SEC)),
                },
                reactive: true,
                autoplay_probe: Some(Duration::from_millis(AUTOPLAY_PROBE_DELAY_MS as u64)),
            },
        }
    }

    pub fn builder(preset: Preset) -> ShowConfigBuilder {
        ShowConfigBuilder {
            config: Self::preset(preset),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.burst_interval.is_zero() {
            return Err(ConfigError::InvalidInterval);
        }
        check_range("emoji size", self.emoji.size_px)?;
        check_range("emoji duration", self.emoji.duration_sec)?;
        if self.emoji.duration_sec.0 <= 0.0 {
            return Err(ConfigError::InvalidRange {
                what: "emoji duration",
                lo: self.emoji.duration_sec.0,
                hi: self.emoji.duration_sec.1,
            });
        }
        if self.emoji.count > 0 && self.emoji.glyphs.is_empty() {
            return Err(ConfigError::EmptyGlyphs);
        }
        let sweep = Duration::from_millis(DECOR_SWEEP_INTERVAL_MS as u64);
        if self.emoji.grace < sweep {
            return Err(ConfigError::GraceTooShort(self.emoji.grace, sweep));
        }
        if let Some(stream) = &self.pattern.stream {
            check_stream(stream)?;
        }
        Ok(())
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::preset(Preset::default())
    }
}

fn check_range(what: &'static str, (lo, hi): (f32, f32)) -> Result<(), ConfigError> {
    if lo.is_finite() && hi.is_finite() && lo >= 0.0 && lo <= hi {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { what, lo, hi })
    }
}

fn check_stream(stream: &StreamSpec) -> Result<(), ConfigError> {
    let err = ConfigError::InvalidStream {
        step: stream.step,
        duration: stream.duration,
    };
    if stream.step < Duration::from_millis(STREAM_MIN_STEP_MS) {
        return Err(err);
    }
    if stream.duration.as_nanos() / stream.step.as_nanos() > STREAM_MAX_STEPS as u128 {
        return Err(err);
    }
    Ok(())
}

/// Adjusts a preset before mounting.
#[derive(Clone, Debug)]
pub struct ShowConfigBuilder {
    config: ShowConfig,
}

impl ShowConfigBuilder {
    pub fn burst_interval(mut self, interval: Duration) -> Self {
        self.config.burst_interval = interval;
        self
    }

    pub fn pattern(mut self, pattern: BurstPattern) -> Self {
        self.config.pattern = pattern;
        self
    }

    pub fn background(mut self, kind: BackgroundKind) -> Self {
        self.config.background = kind;
        if kind == BackgroundKind::PointField && self.config.point_count == 0 {
            self.config.point_count = POINT_FIELD_COUNT;
        }
        self
    }

    pub fn point_count(mut self, count: usize) -> Self {
        self.config.point_count = count;
        self
    }

    pub fn emoji(mut self, emoji: EmojiConfig) -> Self {
        self.config.emoji = emoji;
        self
    }

    pub fn emoji_count(mut self, count: usize) -> Self {
        self.config.emoji.count = count;
        self
    }

    pub fn reactive(mut self, reactive: bool) -> Self {
        self.config.reactive = reactive;
        self
    }

    pub fn autoplay_probe(mut self, delay: Option<Duration>) -> Self {
        self.config.autoplay_probe = delay;
        self
    }

    pub fn ids(mut self, ids: ElementIds) -> Self {
        self.config.ids = ids;
        self
    }

    pub fn build(self) -> Result<ShowConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
