//! TrueType / OpenType glyph source backed by `rusttype`

use crate::font::{plot, GlyphSource, VerticalMetrics};
use glyphswarm_core::{Result, SwarmError, Vec2};
use image::GrayImage;
use rusttype::{point, Font, Scale};
use std::path::Path;

/// A scalable font loaded from caller-supplied bytes
pub struct TrueTypeFont {
    font: Font<'static>,
}

impl TrueTypeFont {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| SwarmError::FontLoad("unrecognized font data".to_string()))?;
        Ok(Self { font })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes).map_err(|e| match e {
            SwarmError::FontLoad(msg) => {
                SwarmError::FontLoad(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })
    }
}

impl GlyphSource for TrueTypeFont {
    fn measure(&self, text: &str, px: f32) -> f32 {
        let scale = Scale::uniform(px);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map_or(0.0, |g| {
                g.position().x + g.unpositioned().h_metrics().advance_width
            })
    }

    fn vertical_metrics(&self, px: f32) -> VerticalMetrics {
        let v = self.font.v_metrics(Scale::uniform(px));
        VerticalMetrics {
            ascent: v.ascent,
            descent: v.descent,
        }
    }

    fn draw(&self, text: &str, px: f32, origin: Vec2, target: &mut GrayImage) {
        let scale = Scale::uniform(px);
        for glyph in self.font.layout(text, scale, point(origin.x, origin.y)) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let x = bounds.min.x as i64 + gx as i64;
                let y = bounds.min.y as i64 + gy as i64;
                plot(target, x, y, (coverage.clamp(0.0, 1.0) * 255.0).round() as u8);
            });
        }
    }
}
