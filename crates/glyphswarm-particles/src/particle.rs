//! Particle types: CPU simulation state, the fixed-capacity arena, and GPU instance data

use bytemuck::{Pod, Zeroable};
use glyphswarm_core::SamplePoint;

/// Frame rate the per-frame constants are tuned for
pub const BASELINE_FPS: f32 = 60.0;
/// Upper bound on the frame-normalized time step
pub const MAX_DT_SCALE: f32 = 3.0;
/// Fraction of the remaining home distance a frozen particle covers per frame
pub const FROZEN_DRIFT: f32 = 0.005;
/// Exposure gained per unit of applied force
pub const COLOR_GAIN: f32 = 0.12;
/// Exposure retained per frame
pub const COLOR_DECAY: f32 = 0.92;

/// One point of the swarm
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub home_x: f32,
    pub home_y: f32,
    pub frozen: bool,
    /// Decaying force-exposure accumulator in [0, 1], visual only
    pub color_blend: f32,
}

impl Particle {
    /// At rest at `position`, anchored to `home`
    pub fn at(home: SamplePoint, x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            home_x: home.home_x,
            home_y: home.home_y,
            ..Default::default()
        }
    }

    pub fn set_home(&mut self, home: SamplePoint) {
        self.home_x = home.home_x;
        self.home_y = home.home_y;
    }

    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    pub fn distance_to_home(&self) -> f32 {
        let dx = self.home_x - self.x;
        let dy = self.home_y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Advance one frame.
    ///
    /// Forces are per-frame impulses added straight to velocity. The home
    /// spring and friction are scaled by the 60 fps-normalized step so the
    /// settle rate does not depend on frame rate; that step is clamped to
    /// `MAX_DT_SCALE` so a long stall cannot blow the integration up.
    pub fn update(&mut self, dt: f32, force_x: f32, force_y: f32, friction: f32, ease: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let dt_n = (dt * BASELINE_FPS).min(MAX_DT_SCALE);
        let decay = COLOR_DECAY.powf(dt_n);

        if self.frozen {
            let drift = FROZEN_DRIFT * dt_n;
            self.x += (self.home_x - self.x) * drift;
            self.y += (self.home_y - self.y) * drift;
            self.color_blend *= decay;
            return;
        }

        self.vx += force_x;
        self.vy += force_y;

        self.vx += (self.home_x - self.x) * ease * dt_n;
        self.vy += (self.home_y - self.y) * ease * dt_n;

        let damping = friction.powf(dt_n);
        self.vx *= damping;
        self.vy *= damping;

        // Equals `dt` for any frame shorter than the clamp
        let step = dt_n / BASELINE_FPS;
        self.x += self.vx * step;
        self.y += self.vy * step;

        let magnitude = (force_x * force_x + force_y * force_y).sqrt();
        self.color_blend = (self.color_blend + magnitude * COLOR_GAIN).min(1.0);
        self.color_blend *= decay;
    }
}

/// GPU instance data, 32 bytes (2 rows of vec4)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ParticleInstance {
    pub pos_size: [f32; 4], // xy = position, z = size, w = color blend
    pub color: [f32; 4],    // rgba
}

/// Fixed-capacity particle storage with a live-count index.
///
/// Capacity is the configured ceiling; growing and shrinking only move the
/// live count, so LOD changes never reallocate.
pub struct ParticleArena {
    particles: Vec<Particle>,
    live: usize,
}

impl ParticleArena {
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
            live: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Change the ceiling. The only operation that reallocates.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.particles.resize(capacity, Particle::default());
        self.live = self.live.min(capacity);
    }

    /// Make one more slot live, returning it for initialization.
    /// Returns None if the arena is full.
    pub fn spawn(&mut self) -> Option<&mut Particle> {
        if self.live >= self.particles.len() {
            return None;
        }
        let idx = self.live;
        self.live += 1;
        Some(&mut self.particles[idx])
    }

    /// Drop every live particle past `len`
    pub fn truncate(&mut self, len: usize) {
        self.live = self.live.min(len);
    }

    pub fn clear(&mut self) {
        self.live = 0;
    }

    pub fn live(&self) -> &[Particle] {
        &self.particles[..self.live]
    }

    pub fn live_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.live]
    }
}
