use crate::constants::{CONFETTI_DECAY, CONFETTI_GRAVITY, CONFETTI_MAX_PARTICLES, CONFETTI_SCALAR};
use crate::core::color::Rgb;
use crate::core::emitter::BurstConfig;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    /// Heading in radians, canvas space (y down).
    heading: f32,
    velocity: f32,
    drift: f32,
    wobble: f32,
    wobble_speed: f32,
    pub tilt: f32,
    tilt_speed: f32,
    pub color: Rgb,
    pub size: f32,
    tick: u32,
    total_ticks: u32,
}

impl Particle {
    /// Remaining life in 0..1; used as draw opacity.
    pub fn life(&self) -> f32 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        1.0 - self.tick as f32 / self.total_ticks as f32
    }

    pub fn wobble_offset(&self) -> Vec2 {
        Vec2::new(self.wobble.cos(), self.wobble.sin()) * (self.size * 0.6)
    }

    fn step(&mut self) -> bool {
        self.pos.x += self.heading.cos() * self.velocity + self.drift;
        self.pos.y += self.heading.sin() * self.velocity + CONFETTI_GRAVITY * 3.0;
        self.velocity *= CONFETTI_DECAY;
        self.wobble += self.wobble_speed;
        self.tilt += self.tilt_speed;
        self.tick += 1;
        self.tick < self.total_ticks
    }
}

/// In-canvas confetti renderer state: spawns bursts and advances particles
/// one animation frame at a time.
#[derive(Debug, Default)]
pub struct ConfettiField {
    particles: Vec<Particle>,
}

impl ConfettiField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a burst onto a surface of `size` pixels. Oldest particles are
    /// dropped past the global cap.
    pub fn fire<R: Rng + ?Sized>(&mut self, burst: &BurstConfig, size: Vec2, rng: &mut R) {
        let origin = Vec2::new(burst.origin[0], burst.origin[1]) * size;
        let angle = burst.angle_deg.to_radians();
        let spread = burst.spread_deg.to_radians();
        for _ in 0..burst.particle_count {
            let jitter = 0.5 * spread - rng.gen::<f32>() * spread;
            self.particles.push(Particle {
                pos: origin,
                // Canvas y grows downward, so an upward angle is negated.
                heading: -angle + jitter,
                velocity: burst.start_velocity * 0.5 + rng.gen::<f32>() * burst.start_velocity,
                drift: burst.drift,
                wobble: rng.gen::<f32>() * 10.0,
                wobble_speed: 0.05 + rng.gen::<f32>() * 0.06,
                tilt: rng.gen::<f32>() * std::f32::consts::PI,
                tilt_speed: 0.05 + rng.gen::<f32>() * 0.1,
                color: burst.palette.pick(rng),
                size: (5.0 + rng.gen::<f32>() * 5.0) * CONFETTI_SCALAR,
                tick: 0,
                total_ticks: burst.ticks,
            });
        }
        if self.particles.len() > CONFETTI_MAX_PARTICLES {
            let excess = self.particles.len() - CONFETTI_MAX_PARTICLES;
            self.particles.drain(..excess);
        }
    }

    /// Advance every particle one frame and drop the expired ones.
    pub fn step(&mut self) {
        self.particles.retain_mut(Particle::step);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
