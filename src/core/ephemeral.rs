//! Short-lived decorations: floating emoji in the DOM and comet streaks on
//! the canvas.
//!
//! Both are fire-and-forget. The registry gives every DOM element a hard
//! deadline of `duration + grace` so removal never depends on the
//! `animationend` callback alone; backgrounded tabs may never deliver it.
//! The sweep picks up anything whose animation has ended, so a sweep period
//! no longer than the grace keeps every removal inside the deadline.

use crate::config::{DecorMotion, EmojiConfig};
use crate::constants::*;
use crate::core::color::{hsl, sample_range, Rgb};
use fnv::FnvHashMap;
use glam::Vec2;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

/// Randomized look of one decoration.
#[derive(Clone, Debug, PartialEq)]
pub struct DecorSpec {
    pub glyph: &'static str,
    /// Horizontal position in percent of viewport width.
    pub left_pct: f32,
    pub size_px: f32,
    pub duration: Duration,
    pub motion: DecorMotion,
}

impl DecorSpec {
    pub fn roll<R: Rng + ?Sized>(cfg: &EmojiConfig, rng: &mut R) -> Self {
        let glyph = if cfg.glyphs.is_empty() {
            "🎉"
        } else {
            cfg.glyphs[rng.gen_range(0..cfg.glyphs.len())]
        };
        let secs = sample_range(rng, cfg.duration_sec.0, cfg.duration_sec.1).max(0.05);
        Self {
            glyph,
            left_pct: rng.gen::<f32>() * 100.0,
            size_px: sample_range(rng, cfg.size_px.0, cfg.size_px.1),
            duration: Duration::from_secs_f32(secs),
            motion: cfg.motion,
        }
    }

    /// Inline style for the element; the keyframes live in the page CSS.
    pub fn style(&self) -> String {
        let anim = match self.motion {
            DecorMotion::Rise => "show-emoji-rise",
            DecorMotion::Rain => "show-emoji-rain",
        };
        format!(
            "position:fixed;left:{:.2}vw;font-size:{:.1}px;pointer-events:none;z-index:3;\
             animation:{} {:.3}s linear 1 forwards;",
            self.left_pct,
            self.size_px,
            anim,
            self.duration.as_secs_f32()
        )
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    created: Duration,
    ends: Duration,
    deadline: Duration,
}

/// Tracks live DOM decorations and their removal deadlines.
#[derive(Debug)]
pub struct EphemeralRegistry {
    grace: Duration,
    next_id: u64,
    live: FnvHashMap<ElementId, Entry>,
}

impl EphemeralRegistry {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            next_id: 0,
            live: FnvHashMap::default(),
        }
    }

    pub fn spawn(&mut self, now: Duration, duration: Duration) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.live.insert(
            id,
            Entry {
                created: now,
                ends: now + duration,
                deadline: now + duration + self.grace,
            },
        );
        id
    }

    /// Completion path. Returns false if the element was already removed.
    pub fn retire(&mut self, id: ElementId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Fallback path: every element whose animation has ended, oldest first.
    pub fn sweep(&mut self, now: Duration) -> Vec<ElementId> {
        let mut overdue: Vec<(Duration, ElementId)> = self
            .live
            .iter()
            .filter(|(_, e)| e.ends <= now)
            .map(|(id, e)| (e.created, *id))
            .collect();
        overdue.sort();
        for (_, id) in &overdue {
            self.live.remove(id);
        }
        overdue.into_iter().map(|(_, id)| id).collect()
    }

    /// Latest time the element may still be on the page.
    pub fn deadline(&self, id: ElementId) -> Option<Duration> {
        self.live.get(&id).map(|e| e.deadline)
    }

    /// Teardown: forget everything and hand back what still has to go.
    pub fn drain_all(&mut self) -> Vec<ElementId> {
        let mut ids: Vec<ElementId> = self.live.drain().map(|(id, _)| id).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

/// Fixed-period schedule measured from mount, e.g. emoji respawn batches.
#[derive(Clone, Copy, Debug)]
pub struct Cadence {
    period: Duration,
    next: Duration,
}

impl Cadence {
    pub fn new(period: Duration, first: Duration) -> Self {
        Self {
            period,
            next: first,
        }
    }

    /// True when the next slot has been reached. Periods skipped while the
    /// tab was hidden collapse into one.
    pub fn due(&mut self, now: Duration) -> bool {
        if self.period.is_zero() || now < self.next {
            return false;
        }
        while self.next <= now {
            self.next += self.period;
        }
        true
    }
}

#[derive(Clone, Debug)]
pub struct Comet {
    start: Vec2,
    velocity: Vec2,
    born: Duration,
    lifetime: Duration,
    pub color: Rgb,
    pub width: f32,
}

impl Comet {
    /// Enter from the upper-left region heading down-right.
    pub fn spawn<R: Rng + ?Sized>(size: Vec2, hue_deg: f32, now: Duration, rng: &mut R) -> Self {
        let start = Vec2::new(
            sample_range(rng, -0.1, 0.7) * size.x,
            sample_range(rng, -0.1, 0.4) * size.y,
        );
        let dir = Vec2::new(1.0, sample_range(rng, 0.25, 0.6)).normalize();
        let speed = sample_range(rng, 0.35, 0.8) * size.x.max(size.y);
        Self {
            start,
            velocity: dir * speed,
            born: now,
            lifetime: Duration::from_secs_f32(sample_range(
                rng,
                COMET_LIFETIME_MIN_SEC,
                COMET_LIFETIME_MAX_SEC,
            )),
            color: hsl(hue_deg + sample_range(rng, -30.0, 30.0), 1.0, 0.7),
            width: sample_range(rng, 1.5, 3.5),
        }
    }

    fn age(&self, now: Duration) -> f32 {
        now.saturating_sub(self.born).as_secs_f32()
    }

    pub fn head(&self, now: Duration, speed: f32) -> Vec2 {
        self.start + self.velocity * self.age(now) * speed
    }

    pub fn tail(&self, now: Duration, speed: f32) -> Vec2 {
        self.head(now, speed) - self.velocity.normalize_or_zero() * COMET_TAIL_PX * speed
    }

    /// Fades in over the first fifth of life and out over the rest.
    pub fn alpha(&self, now: Duration) -> f32 {
        let t = (self.age(now) / self.lifetime.as_secs_f32()).clamp(0.0, 1.0);
        if t < 0.2 {
            t / 0.2
        } else {
            1.0 - (t - 0.2) / 0.8
        }
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.born + self.lifetime
    }
}

/// The live comet set plus its spawn cadence.
#[derive(Debug)]
pub struct CometSky {
    comets: Vec<Comet>,
    cadence: Cadence,
}

impl CometSky {
    pub fn new() -> Self {
        Self {
            comets: Vec::new(),
            cadence: Cadence::new(
                Duration::from_secs_f32(COMET_SPAWN_INTERVAL_SEC),
                Duration::ZERO,
            ),
        }
    }

    /// Drop expired comets and spawn a new one when the cadence allows.
    pub fn step<R: Rng + ?Sized>(&mut self, now: Duration, size: Vec2, hue_deg: f32, rng: &mut R) {
        self.comets.retain(|c| !c.is_expired(now));
        if self.cadence.due(now) && self.comets.len() < COMET_MAX_ALIVE {
            self.comets.push(Comet::spawn(size, hue_deg, now, rng));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Comet> {
        self.comets.iter()
    }

    pub fn len(&self) -> usize {
        self.comets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comets.is_empty()
    }

    pub fn clear(&mut self) {
        self.comets.clear();
    }
}

impl Default for CometSky {
    fn default() -> Self {
        Self::new()
    }
}
