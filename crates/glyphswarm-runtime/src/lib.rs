//! Glyphswarm Runtime - per-frame driver
//!
//! Provides the building blocks a host loop calls once per frame:
//! - `FrameClock` - wall-clock delta with a stall clamp
//! - `PhraseCursor` - cycles through the configured phrases
//! - `SwarmRuntime` - forces, integration and LOD application in frame order

mod clock;
mod phrases;
mod runtime;

pub use clock::FrameClock;
pub use phrases::PhraseCursor;
pub use runtime::{FrameReport, SwarmRuntime};
