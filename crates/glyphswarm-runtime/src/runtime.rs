//! Per-frame orchestration of the pool and the LOD controller

use crate::clock::FrameClock;
use crate::phrases::PhraseCursor;
use glyphswarm_core::{
    AppearanceConfig, Canvas, ForcePoint, Result, SimConfig, SwarmConfig, Vec2,
};
use glyphswarm_lod::{FpsMonitor, LodDirective};
use glyphswarm_particles::{
    ParticleInstance, ParticleSystem, SegmentationMask, SwarmSnapshot, SwarmStats,
};
use glyphswarm_sampler::{BlockFont, GlyphSource, TextSampler, TrueTypeFont};
use log::{info, warn};
use std::path::Path;

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Directive raised this frame, already applied to the pool
    pub directive: LodDirective,
    pub stats: SwarmStats,
}

/// Drives a `ParticleSystem` and an `FpsMonitor` in frame order:
/// forces and integration first, then frame-rate observation, then LOD.
pub struct SwarmRuntime {
    system: ParticleSystem,
    monitor: FpsMonitor,
    phrases: PhraseCursor,
    canvas: Canvas,
    appearance: AppearanceConfig,
    clock: FrameClock,
}

/// TrueType font at `path`, or the built-in block font when none is given or
/// it fails to load
fn load_glyphs(path: Option<&Path>) -> Box<dyn GlyphSource> {
    let Some(path) = path else {
        return Box::new(BlockFont::new());
    };
    match TrueTypeFont::load(path) {
        Ok(font) => {
            info!("[runtime] loaded font {}", path.display());
            Box::new(font)
        }
        Err(e) => {
            warn!("[runtime] {e}; falling back to block font");
            Box::new(BlockFont::new())
        }
    }
}

impl SwarmRuntime {
    /// Validate `config` and build the pool for `canvas`. The pool stays
    /// empty until `start`.
    pub fn from_config(config: &SwarmConfig, canvas: Canvas) -> Result<Self> {
        config.validate()?;
        let glyphs = load_glyphs(config.font_path.as_deref());
        let sampler = TextSampler::new(glyphs, config.sampler.clone(), config.seed);
        let system = ParticleSystem::new(
            sampler,
            config.sim.particle_count,
            config.lod.clone(),
            config.body.clone(),
            config.seed.rotate_left(16),
        );
        Ok(Self {
            system,
            monitor: FpsMonitor::new(&config.lod),
            phrases: PhraseCursor::new(config.phrases.clone()),
            canvas,
            appearance: config.appearance.clone(),
            clock: FrameClock::new(),
        })
    }

    /// Scatter the pool around the first phrase and restart frame-rate
    /// monitoring
    pub fn start(&mut self) {
        let text = self.phrases.current().to_string();
        self.system.init(&text, self.canvas);
        self.monitor.reset();
        self.clock = FrameClock::new();
    }

    /// Run one frame at timestamp `now_secs` with simulation step `dt`
    pub fn frame(&mut self, now_secs: f64, dt: f32, sim: &SimConfig) -> FrameReport {
        if sim.particle_count != self.system.max_particles() {
            info!(
                "[runtime] particle ceiling {} → {}",
                self.system.max_particles(),
                sim.particle_count
            );
            self.system.set_max_particles(sim.particle_count, self.canvas);
        }

        self.system.update_all(dt, self.canvas, sim);

        let directive = self.monitor.observe(now_secs);
        match directive {
            LodDirective::Reduce => {
                self.system.reduce_lod();
            }
            LodDirective::Restore => {
                self.system.restore_lod(self.canvas);
            }
            LodDirective::None => {}
        }

        FrameReport {
            directive,
            stats: self.system.stats(),
        }
    }

    /// Run one frame timed by the internal wall clock
    pub fn tick(&mut self, sim: &SimConfig) -> FrameReport {
        self.clock.tick();
        let (now, dt) = (self.clock.wall_time, self.clock.delta_time as f32);
        self.frame(now, dt, sim)
    }

    /// Morph to the next phrase in the rotation
    pub fn next_phrase(&mut self) -> &str {
        let text = self.phrases.advance().to_string();
        self.system.transition_to(&text, self.canvas);
        self.phrases.current()
    }

    pub fn resize(&mut self, canvas: Canvas) {
        self.canvas = canvas;
        self.system.resize(canvas);
    }

    pub fn set_force_points(&mut self, points: &[ForcePoint]) {
        self.system.set_force_points(points);
    }

    pub fn set_mouse_pos(&mut self, position: Option<Vec2>) {
        self.system.set_mouse_pos(position);
    }

    pub fn set_body_mask(&mut self, mask: SegmentationMask, intensity: f32) {
        self.system.set_body_mask(mask, intensity);
    }

    pub fn clear_body_mask(&mut self) {
        self.system.clear_body_mask();
    }

    pub fn set_appearance(&mut self, appearance: AppearanceConfig) {
        self.appearance = appearance;
    }

    pub fn snapshot(&self) -> SwarmSnapshot {
        self.system.snapshot(&self.appearance)
    }

    pub fn pack_instances(&mut self, size: f32) -> &[ParticleInstance] {
        self.system.pack_instances(&self.appearance, size)
    }

    pub fn phrase(&self) -> &str {
        self.phrases.current()
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn monitor(&self) -> &FpsMonitor {
        &self.monitor
    }
}
