//! Read-only outputs for renderers and on-screen stats

use crate::particle::{Particle, ParticleInstance};
use glyphswarm_core::{AppearanceConfig, InteractionMode};

/// What a renderer needs to draw one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub color: [f32; 4],
}

/// Aggregate telemetry for stats overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwarmStats {
    pub particle_count: usize,
    pub target_count: usize,
    pub max_particles: usize,
    pub mean_speed: f32,
    pub mode: InteractionMode,
}

/// Owned copy of the swarm, decoupled from further simulation steps
#[derive(Debug, Clone, PartialEq)]
pub struct SwarmSnapshot {
    pub particles: Vec<ParticleView>,
    pub stats: SwarmStats,
}

/// Base color blended toward the hit accent by exposure
pub fn display_color(appearance: &AppearanceConfig, blend: f32) -> [f32; 4] {
    let t = blend.clamp(0.0, 1.0);
    let (a, b) = (appearance.base_color, appearance.hit_color);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

impl ParticleView {
    pub fn from_particle(p: &Particle, appearance: &AppearanceConfig) -> Self {
        Self {
            x: p.x,
            y: p.y,
            color: display_color(appearance, p.color_blend),
        }
    }
}

impl ParticleInstance {
    pub fn from_particle(p: &Particle, appearance: &AppearanceConfig, size: f32) -> Self {
        Self {
            pos_size: [p.x, p.y, size, p.color_blend],
            color: display_color(appearance, p.color_blend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_endpoints() {
        let appearance = AppearanceConfig {
            base_color: [1.0, 1.0, 1.0, 1.0],
            hit_color: [1.0, 0.0, 0.0, 0.5],
        };
        assert_eq!(display_color(&appearance, 0.0), appearance.base_color);
        assert_eq!(display_color(&appearance, 1.0), appearance.hit_color);
        let mid = display_color(&appearance, 0.5);
        assert!((mid[1] - 0.5).abs() < 1e-6);
        assert!((mid[3] - 0.75).abs() < 1e-6);
        // Out-of-range exposure is clamped
        assert_eq!(display_color(&appearance, 7.0), appearance.hit_color);
    }

    #[test]
    fn instance_packs_position_and_blend() {
        let p = Particle {
            x: 3.0,
            y: 4.0,
            color_blend: 0.25,
            ..Default::default()
        };
        let inst = ParticleInstance::from_particle(&p, &AppearanceConfig::default(), 2.0);
        assert_eq!(inst.pos_size, [3.0, 4.0, 2.0, 0.25]);
    }
}
