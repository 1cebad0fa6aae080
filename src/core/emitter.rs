use crate::config::{BurstPattern, BurstSpec, Origin};
use crate::core::color::{sample_range, Palette};
use rand::Rng;
use std::time::Duration;

/// A burst with its origin resolved, ready for the confetti renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BurstConfig {
    pub particle_count: u32,
    pub angle_deg: f32,
    pub spread_deg: f32,
    pub start_velocity: f32,
    pub ticks: u32,
    pub drift: f32,
    /// Normalized viewport coordinates.
    pub origin: [f32; 2],
    pub palette: Palette,
}

impl BurstConfig {
    pub fn resolve<R: Rng + ?Sized>(spec: &BurstSpec, rng: &mut R) -> Self {
        Self {
            particle_count: spec.particle_count,
            angle_deg: spec.angle_deg,
            spread_deg: spec.spread_deg,
            start_velocity: spec.start_velocity,
            ticks: spec.ticks,
            drift: spec.drift,
            origin: spec.origin.resolve(rng),
            palette: spec.palette,
        }
    }
}

impl Origin {
    pub fn resolve<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 2] {
        let [x, y] = match *self {
            Origin::Fixed { x, y } => [x, y],
            Origin::RandomPoint { x, y } => {
                [sample_range(rng, x.0, x.1), sample_range(rng, y.0, y.1)]
            }
            Origin::Band { y, x } => [sample_range(rng, x.0, x.1), y],
        };
        [x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)]
    }
}

/// A burst due at `due`, measured from mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledBurst {
    pub due: Duration,
    pub config: BurstConfig,
}

/// Plans the bursts for each tick of the periodic timer.
///
/// The browser timer only says "a tick happened"; this decides what that
/// tick fires. After [`EffectEmitter::cancel`] every tick is empty.
#[derive(Debug)]
pub struct EffectEmitter {
    pattern: BurstPattern,
    interval: Duration,
    ticks: u64,
    cancelled: bool,
}

impl EffectEmitter {
    pub fn new(pattern: BurstPattern, interval: Duration) -> Self {
        Self {
            pattern,
            interval,
            ticks: 0,
            cancelled: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, now: Duration, rng: &mut R) -> Vec<ScheduledBurst> {
        if self.cancelled {
            return Vec::new();
        }
        self.ticks += 1;
        plan(&self.pattern, now, rng)
    }
}

/// Expands a pattern into concrete bursts starting at `now`. Also used for
/// the manual triggers, which fire outside the timer.
pub fn plan<R: Rng + ?Sized>(
    pattern: &BurstPattern,
    now: Duration,
    rng: &mut R,
) -> Vec<ScheduledBurst> {
    let mut out: Vec<ScheduledBurst> = pattern
        .bursts
        .iter()
        .map(|spec| ScheduledBurst {
            due: now,
            config: BurstConfig::resolve(spec, rng),
        })
        .collect();
    if let Some(stream) = &pattern.stream {
        if !stream.step.is_zero() {
            let steps = (stream.duration.as_nanos() / stream.step.as_nanos()) as u32;
            for k in 0..=steps {
                let due = now + stream.step * k;
                for spec in &stream.bursts {
                    out.push(ScheduledBurst {
                        due,
                        config: BurstConfig::resolve(spec, rng),
                    });
                }
            }
        }
    }
    out
}

/// Bursts waiting for their due time; drained from the frame loop.
#[derive(Debug, Default)]
pub struct BurstQueue {
    pending: Vec<ScheduledBurst>,
}

impl BurstQueue {
    pub fn push_all(&mut self, bursts: impl IntoIterator<Item = ScheduledBurst>) {
        self.pending.extend(bursts);
    }

    pub fn drain_due(&mut self, now: Duration) -> Vec<BurstConfig> {
        let mut due = Vec::new();
        self.pending.retain(|b| {
            if b.due <= now {
                due.push(b.config);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
