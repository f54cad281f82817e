//! Simulation configuration, loaded from TOML
//!
//! Every section carries defaults, so a file only has to name the values it
//! overrides:
//!
//! ```toml
//! phrases = ["HELLO", "WORLD"]
//!
//! [sim]
//! mode = "vortex"
//! friction = 0.88
//!
//! [lod]
//! floor = { fraction = 0.25 }
//! ```

use crate::error::{Result, SwarmError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Force-direction policy applied uniformly to every active source in a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionMode {
    #[default]
    Repulse,
    Attract,
    Vortex,
    Freeze,
}

impl InteractionMode {
    pub const ALL: [InteractionMode; 4] = [
        InteractionMode::Repulse,
        InteractionMode::Attract,
        InteractionMode::Vortex,
        InteractionMode::Freeze,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::Repulse => "repulse",
            InteractionMode::Attract => "attract",
            InteractionMode::Vortex => "vortex",
            InteractionMode::Freeze => "freeze",
        }
    }
}

/// Per-frame physics parameters, mutated live by settings UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Particle budget ceiling
    pub particle_count: usize,
    pub repulsion_force: f32,
    /// Velocity retention per 60 fps frame, in (0, 1)
    pub friction: f32,
    /// Home spring stiffness, in (0, 1]
    pub ease: f32,
    pub mode: InteractionMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 6000,
            repulsion_force: 80.0,
            friction: 0.9,
            ease: 0.05,
            mode: InteractionMode::Repulse,
        }
    }
}

/// Lower bound for LOD shrinking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LodFloor {
    /// Fixed particle count
    Absolute(usize),
    /// Fraction of the configured ceiling
    Fraction(f32),
}

impl LodFloor {
    /// Resolve to a particle count, never above `max_particles`
    pub fn resolve(&self, max_particles: usize) -> usize {
        match *self {
            LodFloor::Absolute(n) => n.min(max_particles),
            LodFloor::Fraction(f) => {
                let n = (max_particles as f64 * f.clamp(0.0, 1.0) as f64).round() as usize;
                n.min(max_particles)
            }
        }
    }
}

/// Level-of-detail tuning: resize factors and hysteresis thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodConfig {
    /// Fraction removed per reduce directive
    pub shrink_factor: f32,
    /// Multiplier applied per restore directive
    pub grow_factor: f32,
    pub floor: LodFloor,
    pub low_fps: f32,
    pub high_fps: f32,
    pub reduce_after_secs: f64,
    pub restore_after_secs: f64,
    pub warmup_secs: f64,
    /// Number of instantaneous fps samples averaged
    pub sample_window: usize,
}

impl Default for LodConfig {
    fn default() -> Self {
        Self {
            shrink_factor: 0.10,
            grow_factor: 1.33,
            floor: LodFloor::Absolute(300),
            low_fps: 15.0,
            high_fps: 50.0,
            reduce_after_secs: 5.0,
            restore_after_secs: 8.0,
            warmup_secs: 12.0,
            sample_window: 30,
        }
    }
}

/// Text rasterization and subsampling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Rendered text width limit relative to canvas width
    pub max_width_fraction: f32,
    /// Font size floor relative to canvas width, portrait canvases only
    pub portrait_min_fraction: f32,
    /// Dilate strokes by one pixel
    pub thicken: bool,
    /// Share of the budget reserved for outline pixels below the threshold
    pub edge_bias: f32,
    pub edge_bias_threshold: usize,
    /// Coverage above which a pixel counts as opaque
    pub alpha_threshold: u8,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_width_fraction: 0.82,
            portrait_min_fraction: 0.2,
            thicken: true,
            edge_bias: 0.7,
            edge_bias_threshold: 1500,
            alpha_threshold: 128,
        }
    }
}

/// Colors handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    pub base_color: [f32; 4],
    /// Accent shown while a particle is being pushed around
    pub hit_color: [f32; 4],
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            hit_color: [1.0, 0.36, 0.25, 1.0],
        }
    }
}

/// Body-silhouette interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyConfig {
    /// Canvas-pixel expansion of the silhouette bounding box
    pub bbox_margin: f32,
    /// Mirror the mask horizontally (selfie cameras)
    pub mirror_x: bool,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            bbox_margin: 40.0,
            mirror_x: false,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub phrases: Vec<String>,
    pub seed: u32,
    /// TrueType font; the built-in block font is used when absent
    pub font_path: Option<PathBuf>,
    pub sim: SimConfig,
    pub lod: LodConfig,
    pub sampler: SamplerConfig,
    pub appearance: AppearanceConfig,
    pub body: BodyConfig,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            phrases: vec!["HELLO".to_string()],
            seed: 0x5EED_1234,
            font_path: None,
            sim: SimConfig::default(),
            lod: LodConfig::default(),
            sampler: SamplerConfig::default(),
            appearance: AppearanceConfig::default(),
            body: BodyConfig::default(),
        }
    }
}

impl SwarmConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: SwarmConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        let sim = &self.sim;
        check_open("sim.friction", sim.friction, 0.0, 1.0)?;
        check_half_open("sim.ease", sim.ease, 0.0, 1.0)?;
        check_closed("sim.repulsion_force", sim.repulsion_force, 0.0, 1.0e6)?;

        let lod = &self.lod;
        check_open("lod.shrink_factor", lod.shrink_factor, 0.0, 1.0)?;
        check_closed("lod.grow_factor", lod.grow_factor, 1.0, 10.0)?;
        if lod.grow_factor <= 1.0 {
            return Err(SwarmError::InvalidConfig(
                "lod.grow_factor must be greater than 1".to_string(),
            ));
        }
        if let LodFloor::Fraction(f) = lod.floor {
            check_closed("lod.floor.fraction", f, 0.0, 1.0)?;
        }
        if !(lod.low_fps > 0.0 && lod.low_fps < lod.high_fps) {
            return Err(SwarmError::InvalidConfig(format!(
                "lod.low_fps ({}) must be positive and below lod.high_fps ({})",
                lod.low_fps, lod.high_fps
            )));
        }
        if lod.sample_window == 0 {
            return Err(SwarmError::InvalidConfig(
                "lod.sample_window must be at least 1".to_string(),
            ));
        }
        for (field, secs) in [
            ("lod.reduce_after_secs", lod.reduce_after_secs),
            ("lod.restore_after_secs", lod.restore_after_secs),
            ("lod.warmup_secs", lod.warmup_secs),
        ] {
            if !(secs >= 0.0) {
                return Err(SwarmError::ValueOutOfRange {
                    field: field.to_string(),
                    min: 0.0,
                    max: f64::INFINITY,
                    value: secs,
                });
            }
        }

        let sampler = &self.sampler;
        check_half_open(
            "sampler.max_width_fraction",
            sampler.max_width_fraction,
            0.0,
            1.0,
        )?;
        check_closed(
            "sampler.portrait_min_fraction",
            sampler.portrait_min_fraction,
            0.0,
            1.0,
        )?;
        check_closed("sampler.edge_bias", sampler.edge_bias, 0.0, 1.0)?;

        check_closed("body.bbox_margin", self.body.bbox_margin, 0.0, 1.0e4)?;
        Ok(())
    }
}

fn out_of_range(field: &str, value: f32, min: f32, max: f32) -> SwarmError {
    SwarmError::ValueOutOfRange {
        field: field.to_string(),
        min: min as f64,
        max: max as f64,
        value: value as f64,
    }
}

fn check_open(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value > min && value < max {
        Ok(())
    } else {
        Err(out_of_range(field, value, min, max))
    }
}

fn check_half_open(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value > min && value <= max {
        Ok(())
    } else {
        Err(out_of_range(field, value, min, max))
    }
}

fn check_closed(field: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(out_of_range(field, value, min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SwarmConfig::default();
        config.validate().unwrap();
        assert!(config.sim.friction > 0.0 && config.sim.friction < 1.0);
        assert!(config.lod.low_fps < config.lod.high_fps);
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
phrases = ["HI", "THERE"]
seed = 7

[sim]
mode = "vortex"
friction = 0.85

[lod]
shrink_factor = 0.25
floor = { fraction = 0.3 }
"#;
        let config = SwarmConfig::from_toml_str(toml_str).unwrap();
        assert_eq!(config.phrases, vec!["HI".to_string(), "THERE".to_string()]);
        assert_eq!(config.seed, 7);
        assert_eq!(config.sim.mode, InteractionMode::Vortex);
        assert!((config.sim.friction - 0.85).abs() < 1e-6);
        // Untouched values fall back to defaults
        assert!((config.sim.ease - 0.05).abs() < 1e-6);
        assert!((config.lod.shrink_factor - 0.25).abs() < 1e-6);
        assert_eq!(config.lod.floor, LodFloor::Fraction(0.3));
        assert_eq!(config.lod.floor.resolve(1000), 300);
    }

    #[test]
    fn absolute_floor_parses() {
        let config = SwarmConfig::from_toml_str("[lod]\nfloor = { absolute = 250 }").unwrap();
        assert_eq!(config.lod.floor, LodFloor::Absolute(250));
    }

    #[test]
    fn floor_never_exceeds_ceiling() {
        assert_eq!(LodFloor::Absolute(500).resolve(200), 200);
        assert_eq!(LodFloor::Fraction(1.5).resolve(200), 200);
        assert_eq!(LodFloor::Fraction(0.0).resolve(200), 0);
    }

    #[test]
    fn friction_out_of_range_rejected() {
        let err = SwarmConfig::from_toml_str("[sim]\nfriction = 1.0").unwrap_err();
        match err {
            SwarmError::ValueOutOfRange { field, .. } => assert_eq!(field, "sim.friction"),
            other => panic!("Expected ValueOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn ease_of_one_accepted() {
        let config = SwarmConfig::from_toml_str("[sim]\nease = 1.0").unwrap();
        assert!((config.sim.ease - 1.0).abs() < 1e-6);
    }

    #[test]
    fn inverted_fps_band_rejected() {
        let err = SwarmConfig::from_toml_str("[lod]\nlow_fps = 60.0\nhigh_fps = 30.0").unwrap_err();
        assert!(matches!(err, SwarmError::InvalidConfig(_)));
    }

    #[test]
    fn unknown_mode_is_parse_error() {
        let err = SwarmConfig::from_toml_str("[sim]\nmode = \"explode\"").unwrap_err();
        assert!(matches!(err, SwarmError::TomlParse(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swarm.toml");
        std::fs::write(&path, "phrases = [\"FILE\"]\n[sim]\nmode = \"freeze\"\n").unwrap();
        let config = SwarmConfig::load(&path).unwrap();
        assert_eq!(config.phrases, vec!["FILE".to_string()]);
        assert_eq!(config.sim.mode, InteractionMode::Freeze);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SwarmConfig::load(Path::new("/nonexistent/swarm.toml")).unwrap_err();
        assert!(matches!(err, SwarmError::Io(_)));
    }

    #[test]
    fn mode_names_round_trip_through_as_str() {
        for mode in InteractionMode::ALL {
            let src = format!("[sim]\nmode = \"{}\"", mode.as_str());
            assert_eq!(SwarmConfig::from_toml_str(&src).unwrap().sim.mode, mode);
        }
    }
}
