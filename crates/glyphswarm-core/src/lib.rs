//! Glyphswarm Core - Foundational types for the Glyphswarm simulation
//!
//! This crate provides the types that all other Glyphswarm crates depend on:
//! - `Vec2`, `Canvas` - 2D canvas-space types
//! - `ForcePoint`, `SamplePoint` - per-frame force sources and home anchors
//! - `SwarmConfig` and its sections - TOML-backed configuration
//! - `SwarmRng` - seeded xorshift PRNG shared by sampler and pool
//! - Error types and Result alias

mod config;
mod error;
mod rng;
mod types;

pub use config::{
    AppearanceConfig, BodyConfig, InteractionMode, LodConfig, LodFloor, SamplerConfig, SimConfig,
    SwarmConfig,
};
pub use error::{Result, SwarmError};
pub use rng::SwarmRng;
pub use types::{Canvas, ForcePoint, SamplePoint, Vec2};
