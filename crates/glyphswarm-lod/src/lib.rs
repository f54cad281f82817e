//! Glyphswarm LOD - frame-rate monitoring with hysteresis
//!
//! `FpsMonitor` turns frame timestamps into at most one `LodDirective` per
//! sustained slow or fast interval. The particle pool applies them.

mod monitor;

pub use monitor::{FpsMonitor, LodDirective};
