use crate::constants::*;
use crate::core::color::{sample_range, Palette, Rgb};
use glam::Vec2;
use rand::Rng;

/// Average of a byte frequency snapshot, normalized to 0..1. An empty
/// snapshot (no analyser yet) reads as silence.
pub fn loudness_from_bytes(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    (sum as f32 / (bins.len() as f32 * 255.0)).clamp(0.0, 1.0)
}

/// Per-frame procedural parameters. Every field is a non-decreasing function
/// of loudness (hue aside, which also cycles with time).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub loudness: f32,
    /// Gradient color intensity, 0..1.
    pub intensity: f32,
    /// Gradient outer radius as a fraction of the surface diagonal.
    pub radius_frac: f32,
    /// Multiplier for drifting points and comet speed.
    pub speed: f32,
    pub hue_deg: f32,
}

impl FrameParams {
    pub fn idle(elapsed_sec: f32, base_hue_deg: f32) -> Self {
        Self::from_loudness(0.0, elapsed_sec, base_hue_deg)
    }

    pub fn from_loudness(loudness: f32, elapsed_sec: f32, base_hue_deg: f32) -> Self {
        let l = if loudness.is_finite() {
            loudness.clamp(0.0, 1.0)
        } else {
            0.0
        };
        // sqrt lifts quiet passages without breaking monotonicity
        let shaped = l.sqrt();
        Self {
            loudness: l,
            intensity: IDLE_INTENSITY + INTENSITY_SPAN * shaped,
            radius_frac: IDLE_RADIUS_FRAC + RADIUS_SPAN_FRAC * shaped,
            speed: IDLE_SPEED + SPEED_SPAN * l,
            hue_deg: (base_hue_deg + HUE_CYCLE_DEG_PER_SEC * elapsed_sec + 40.0 * l)
                .rem_euclid(360.0),
        }
    }
}

/// Canvas size in CSS pixels and the matching backing-store size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub css: Vec2,
    pub px_width: u32,
    pub px_height: u32,
    pub dpr: f32,
}

impl SurfaceSize {
    pub fn from_css(css_width: f32, css_height: f32, dpr: f32) -> Self {
        let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        let w = css_width.max(0.0);
        let h = css_height.max(0.0);
        Self {
            css: Vec2::new(w, h),
            px_width: ((w * dpr) as u32).max(1),
            px_height: ((h * dpr) as u32).max(1),
            dpr,
        }
    }
}

/// Remembers the last applied surface size. A resize notification marks it
/// dirty so the next frame resynchronizes before painting.
#[derive(Debug)]
pub struct SurfaceTracker {
    current: Option<SurfaceSize>,
    dirty: bool,
}

impl SurfaceTracker {
    pub fn new() -> Self {
        Self {
            current: None,
            dirty: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn current(&self) -> Option<SurfaceSize> {
        self.current
    }

    /// Returns the new size when it has to be applied to the canvas.
    pub fn sync(&mut self, css_width: f32, css_height: f32, dpr: f32) -> Option<SurfaceSize> {
        let next = SurfaceSize::from_css(css_width, css_height, dpr);
        let changed = self.current != Some(next);
        self.dirty = false;
        if changed {
            self.current = Some(next);
            Some(next)
        } else {
            None
        }
    }
}

impl Default for SurfaceTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub struct Point {
    pub pos: Vec2,
    pub radius: f32,
    vel: Vec2,
    pub color: Rgb,
}

/// Field of dots drifting down the surface and wrapping back to the top.
#[derive(Debug, Default)]
pub struct PointField {
    points: Vec<Point>,
}

impl PointField {
    pub fn new<R: Rng + ?Sized>(count: usize, size: Vec2, palette: Palette, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|_| Point {
                pos: Vec2::new(rng.gen::<f32>() * size.x, rng.gen::<f32>() * size.y),
                radius: sample_range(rng, POINT_RADIUS_MIN, POINT_RADIUS_MAX),
                vel: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * 2.0,
                    sample_range(rng, POINT_FALL_MIN, POINT_FALL_MAX),
                ),
                color: palette.pick(rng),
            })
            .collect();
        Self { points }
    }

    pub fn step<R: Rng + ?Sized>(&mut self, speed: f32, size: Vec2, rng: &mut R) {
        for p in &mut self.points {
            p.pos += p.vel * speed;
            if p.pos.y > size.y {
                p.pos.y = -10.0;
                p.pos.x = rng.gen::<f32>() * size.x;
            }
        }
    }

    /// Keep points at the same relative place when the surface changes size.
    pub fn rescale(&mut self, from: Vec2, to: Vec2) {
        if from.x <= 0.0 || from.y <= 0.0 {
            return;
        }
        let k = to / from;
        for p in &mut self.points {
            p.pos *= k;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
