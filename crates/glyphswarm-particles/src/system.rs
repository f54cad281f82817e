//! The particle pool: phrase mapping, per-frame forces, and LOD resizing

use crate::body::{BodyField, SegmentationMask};
use crate::forces::{force_shape, influence, FREEZE_DAMPING};
use crate::particle::{Particle, ParticleArena, ParticleInstance};
use crate::view::{ParticleView, SwarmSnapshot, SwarmStats};
use glyphswarm_core::{
    AppearanceConfig, BodyConfig, Canvas, ForcePoint, InteractionMode, LodConfig, SamplePoint,
    SimConfig, SwarmRng, Vec2,
};
use glyphswarm_sampler::{ClassifiedPixels, TextSampler};
use log::{debug, info};
use std::sync::Arc;

/// Max offset of a fresh particle from its home on `init`
pub const SCATTER_JITTER: f32 = 120.0;
/// Max offset of particles added back by an LOD restore
pub const RESTORE_JITTER: f32 = 2.0;
/// Radius of the pointer force source
pub const POINTER_RADIUS: f32 = 100.0;

struct BodyInput {
    mask: SegmentationMask,
    intensity: f32,
}

/// Owns the live particles and maps them onto a phrase's home anchors.
///
/// Invariant: `particles().len() <= target_count() <= max_particles()`, and
/// particle `i` is anchored to `homes()[i]`.
pub struct ParticleSystem {
    sampler: TextSampler,
    arena: ParticleArena,
    target_count: usize,
    lod: LodConfig,
    body_config: BodyConfig,
    text: String,
    canvas: Canvas,
    /// Classified pixels of the current phrase and canvas
    pixels: Arc<ClassifiedPixels>,
    homes: Vec<SamplePoint>,
    force_points: Vec<ForcePoint>,
    pointer: Option<Vec2>,
    body: Option<BodyInput>,
    rng: SwarmRng,
    mean_speed: f32,
    mode: InteractionMode,
    /// Pre-allocated buffer for GPU packing
    instances: Vec<ParticleInstance>,
}

impl ParticleSystem {
    pub fn new(
        sampler: TextSampler,
        max_particles: usize,
        lod: LodConfig,
        body_config: BodyConfig,
        seed: u32,
    ) -> Self {
        Self {
            sampler,
            arena: ParticleArena::new(max_particles),
            target_count: max_particles,
            lod,
            body_config,
            text: String::new(),
            canvas: Canvas::default(),
            pixels: Arc::new(ClassifiedPixels::default()),
            homes: Vec::new(),
            force_points: Vec::new(),
            pointer: None,
            body: None,
            rng: SwarmRng::new(seed),
            mean_speed: 0.0,
            mode: InteractionMode::default(),
            instances: Vec::new(),
        }
    }

    // ── Shape ──

    /// Sample `text` and replace the whole pool, scattered around the homes
    pub fn init(&mut self, text: &str, canvas: Canvas) {
        self.load_phrase(text, canvas);
        self.homes = self.sampler.subsample(&self.pixels, self.target_count);
        self.arena.clear();

        for i in 0..self.homes.len() {
            let home = self.homes[i];
            let x = home.home_x + self.rng.range(-SCATTER_JITTER, SCATTER_JITTER);
            let y = home.home_y + self.rng.range(-SCATTER_JITTER, SCATTER_JITTER);
            if let Some(p) = self.arena.spawn() {
                *p = Particle::at(home, x, y);
            }
        }
        info!(
            "[particles] init {:?} at {}x{}: {} particle(s)",
            text,
            canvas.width,
            canvas.height,
            self.arena.len()
        );
    }

    /// Morph to a new phrase: existing particles keep their positions and
    /// glide to new homes; extra particles spawn from existing ones.
    pub fn transition_to(&mut self, text: &str, canvas: Canvas) {
        let before = self.arena.len();
        self.load_phrase(text, canvas);
        let homes = self.sampler.subsample(&self.pixels, self.target_count);
        self.reshape(homes);
        info!(
            "[particles] transition to {:?}: {} → {} particle(s)",
            text,
            before,
            self.arena.len()
        );
    }

    /// Reshape the current phrase onto a new canvas size
    pub fn resize(&mut self, canvas: Canvas) {
        if canvas == self.canvas {
            return;
        }
        let text = self.text.clone();
        self.transition_to(&text, canvas);
    }

    /// Change the particle ceiling; the budget is reset to the new ceiling
    pub fn set_max_particles(&mut self, max_particles: usize, canvas: Canvas) {
        if max_particles == self.arena.capacity() {
            return;
        }
        self.arena.set_capacity(max_particles);
        self.target_count = max_particles;
        self.homes.truncate(self.arena.len());
        let text = self.text.clone();
        self.transition_to(&text, canvas);
    }

    pub fn set_lod_config(&mut self, lod: LodConfig) {
        self.lod = lod;
        self.target_count = self
            .target_count
            .max(self.floor())
            .min(self.max_particles());
    }

    pub fn set_body_config(&mut self, body_config: BodyConfig) {
        self.body_config = body_config;
    }

    fn load_phrase(&mut self, text: &str, canvas: Canvas) {
        self.text = text.to_string();
        self.canvas = canvas;
        self.pixels = self.sampler.classify(text, canvas);
    }

    /// Remap live particles onto `homes` in place, spawning from random live
    /// particles' current positions or truncating the tail.
    fn reshape(&mut self, homes: Vec<SamplePoint>) {
        let old = self.arena.len();
        let new = homes.len().min(self.arena.capacity());

        for (p, home) in self.arena.live_mut().iter_mut().zip(&homes) {
            p.set_home(*home);
        }

        if new < old {
            self.arena.truncate(new);
        }
        for &home in homes.iter().take(new).skip(old) {
            let (x, y) = if old > 0 {
                let idx = self.rng.index(old);
                let source = &self.arena.live()[idx];
                (source.x, source.y)
            } else {
                (
                    home.home_x + self.rng.range(-SCATTER_JITTER, SCATTER_JITTER),
                    home.home_y + self.rng.range(-SCATTER_JITTER, SCATTER_JITTER),
                )
            };
            if let Some(p) = self.arena.spawn() {
                *p = Particle::at(home, x, y);
            }
        }
        self.homes = homes;
        self.homes.truncate(new);
    }

    // ── Level of detail ──

    /// Lowest `target_count` LOD shrinking may reach
    pub fn floor(&self) -> usize {
        self.lod.floor.resolve(self.max_particles())
    }

    /// Shrink the budget by `shrink_factor`, re-striding the cached anchors so
    /// the outline bias survives. Returns false when already at the floor.
    pub fn reduce_lod(&mut self) -> bool {
        let shrunk = (self.target_count as f64 * (1.0 - self.lod.shrink_factor as f64)).round() as usize;
        let next = shrunk
            .min(self.target_count.saturating_sub(1))
            .max(self.floor())
            .min(self.max_particles());
        if next >= self.target_count {
            return false;
        }
        let previous = self.target_count;
        self.target_count = next;

        let homes = self.sampler.subsample(&self.pixels, next);
        let keep = self.arena.len().min(homes.len());
        self.arena.truncate(keep);
        for (p, home) in self.arena.live_mut().iter_mut().zip(&homes) {
            p.set_home(*home);
        }
        self.homes = homes;
        self.homes.truncate(keep);

        info!(
            "[particles] LOD reduce: target {} → {} ({} live)",
            previous,
            next,
            self.arena.len()
        );
        true
    }

    /// Grow the budget by `grow_factor`, capped at the ceiling. New particles
    /// appear at their homes with a small jitter. A changed canvas is
    /// re-rasterized first. Returns false when nothing changed.
    pub fn restore_lod(&mut self, canvas: Canvas) -> bool {
        let grown = (self.target_count as f64 * self.lod.grow_factor as f64).ceil() as usize;
        let next = grown
            .max(self.target_count + 1)
            .min(self.max_particles())
            .max(self.floor());
        let resized = canvas != self.canvas;
        if next == self.target_count && !resized {
            return false;
        }
        let previous = self.target_count;
        self.target_count = next;

        if resized {
            let text = self.text.clone();
            self.load_phrase(&text, canvas);
        }
        let homes = self.sampler.subsample(&self.pixels, next);
        let old = self.arena.len();
        let new = homes.len().min(self.arena.capacity());

        for (p, home) in self.arena.live_mut().iter_mut().zip(&homes) {
            p.set_home(*home);
        }
        if new < old {
            self.arena.truncate(new);
        }
        for &home in homes.iter().take(new).skip(old) {
            let x = home.home_x + self.rng.range(-RESTORE_JITTER, RESTORE_JITTER);
            let y = home.home_y + self.rng.range(-RESTORE_JITTER, RESTORE_JITTER);
            if let Some(p) = self.arena.spawn() {
                *p = Particle::at(home, x, y);
            }
        }
        self.homes = homes;
        self.homes.truncate(new);

        info!(
            "[particles] LOD restore: target {} → {} ({} live)",
            previous,
            next,
            self.arena.len()
        );
        true
    }

    // ── Per-frame inputs ──

    /// Replace this frame's force sources
    pub fn set_force_points(&mut self, points: &[ForcePoint]) {
        self.force_points.clear();
        self.force_points.extend_from_slice(points);
    }

    /// Pointer position, applied alongside the force points
    pub fn set_mouse_pos(&mut self, position: Option<Vec2>) {
        self.pointer = position;
    }

    /// Body silhouette with a motion intensity in [0, 1]
    pub fn set_body_mask(&mut self, mask: SegmentationMask, intensity: f32) {
        self.body = Some(BodyInput { mask, intensity });
    }

    pub fn clear_body_mask(&mut self) {
        self.body = None;
    }

    // ── Update ──

    /// Accumulate forces for every particle under `config.mode` and integrate
    pub fn update_all(&mut self, dt: f32, canvas: Canvas, config: &SimConfig) {
        self.mode = config.mode;
        let shape = force_shape(config.mode);
        let pointer = self
            .pointer
            .map(|p| ForcePoint::new(p.x, p.y, POINTER_RADIUS, config.repulsion_force));
        let body = self.body.as_ref().and_then(|input| {
            BodyField::build(
                &input.mask,
                input.intensity,
                canvas,
                config.repulsion_force,
                &self.body_config,
            )
            .map(|field| (field, &input.mask))
        });
        let sources = &self.force_points;

        let mut speed_sum = 0.0f32;
        for p in self.arena.live_mut() {
            let position = Vec2::new(p.x, p.y);
            let mut force = Vec2::ZERO;
            let mut inside = false;

            for source in sources.iter().chain(pointer.iter()) {
                if let Some((dir, magnitude)) = influence(source, position) {
                    inside = true;
                    if let Some(shape) = shape {
                        force = force + shape(dir, magnitude);
                    }
                }
            }

            if let Some((field, mask)) = &body {
                if field.contains(mask, position) {
                    inside = true;
                    if let Some(shape) = shape {
                        force = force + field.force(shape, position);
                    }
                }
            }

            if shape.is_none() && inside {
                p.vx *= FREEZE_DAMPING;
                p.vy *= FREEZE_DAMPING;
                p.frozen = true;
            } else {
                p.frozen = false;
            }

            p.update(dt, force.x, force.y, config.friction, config.ease);
            speed_sum += p.speed();
        }

        let count = self.arena.len();
        self.mean_speed = if count > 0 {
            speed_sum / count as f32
        } else {
            0.0
        };
    }

    // ── Outputs ──

    pub fn particles(&self) -> &[Particle] {
        self.arena.live()
    }

    /// Current home anchors, one per live particle
    pub fn homes(&self) -> &[SamplePoint] {
        &self.homes
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn target_count(&self) -> usize {
        self.target_count
    }

    pub fn max_particles(&self) -> usize {
        self.arena.capacity()
    }

    pub fn stats(&self) -> SwarmStats {
        SwarmStats {
            particle_count: self.arena.len(),
            target_count: self.target_count,
            max_particles: self.max_particles(),
            mean_speed: self.mean_speed,
            mode: self.mode,
        }
    }

    pub fn snapshot(&self, appearance: &AppearanceConfig) -> SwarmSnapshot {
        SwarmSnapshot {
            particles: self
                .arena
                .live()
                .iter()
                .map(|p| ParticleView::from_particle(p, appearance))
                .collect(),
            stats: self.stats(),
        }
    }

    /// Pack live particles into the instance buffer for GPU upload
    pub fn pack_instances(&mut self, appearance: &AppearanceConfig, size: f32) -> &[ParticleInstance] {
        self.instances.clear();
        self.instances.extend(
            self.arena
                .live()
                .iter()
                .map(|p| ParticleInstance::from_particle(p, appearance, size)),
        );
        debug!("[particles] packed {} instance(s)", self.instances.len());
        &self.instances
    }
}
