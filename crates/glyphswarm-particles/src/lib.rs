//! Glyphswarm Particles - the text particle pool
//!
//! Provides the simulation core with:
//! - `Particle` integration with a home spring and frame-rate independent damping
//! - `ParticleArena` fixed-capacity storage, so LOD resizes never reallocate
//! - Per-mode force shapes (repulse, attract, vortex, freeze) and linear falloff
//! - `BodyField` silhouette interaction from a segmentation mask
//! - `ParticleSystem` phrase init/transition, LOD reduce/restore, per-frame update
//! - Snapshots and GPU instance packing for renderers

pub mod body;
pub mod forces;
pub mod particle;
pub mod system;
pub mod view;

pub use body::{BodyField, SegmentationMask};
pub use forces::{force_shape, ForceShape};
pub use particle::{Particle, ParticleArena, ParticleInstance};
pub use system::ParticleSystem;
pub use view::{display_color, ParticleView, SwarmSnapshot, SwarmStats};
