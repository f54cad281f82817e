//! Glyphswarm Sampler - turns a phrase into particle home anchors
//!
//! Pipeline:
//! - pick a font size that fits the canvas (`raster::choose_font_size`)
//! - rasterize centered into an offscreen `GrayImage`, optionally thickened
//! - classify opaque pixels into outline and interior (`ClassifiedPixels`)
//! - shuffle within each class, then subsample to the particle budget with an
//!   outline bias at low counts (`subsample`)
//!
//! `TextSampler` caches the classified set per phrase and canvas size so LOD
//! resizes only re-stride, never re-rasterize.

pub mod block_font;
pub mod classify;
pub mod font;
pub mod raster;
pub mod sample;
pub mod truetype;

mod sampler;

pub use block_font::BlockFont;
pub use classify::ClassifiedPixels;
pub use font::{GlyphSource, VerticalMetrics};
pub use sample::subsample;
pub use sampler::TextSampler;
pub use truetype::TrueTypeFont;
