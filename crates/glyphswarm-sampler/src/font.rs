//! Glyph source abstraction shared by the built-in and TrueType fonts

use glyphswarm_core::Vec2;
use image::GrayImage;

/// Vertical extent of a line of text relative to its baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    /// Distance above the baseline (positive)
    pub ascent: f32,
    /// Distance below the baseline (zero or negative)
    pub descent: f32,
}

impl VerticalMetrics {
    pub fn height(&self) -> f32 {
        self.ascent - self.descent
    }
}

/// Something that can lay out and draw a single line of text
pub trait GlyphSource {
    /// Advance width of `text` at font size `px`
    fn measure(&self, text: &str, px: f32) -> f32;

    fn vertical_metrics(&self, px: f32) -> VerticalMetrics;

    /// Draw `text` with its left edge at `origin.x` and baseline at `origin.y`.
    /// Coverage is max-blended into `target`; pixels outside are clipped.
    fn draw(&self, text: &str, px: f32, origin: Vec2, target: &mut GrayImage);
}

/// Max-blend one coverage value, ignoring out-of-bounds coordinates
pub(crate) fn plot(target: &mut GrayImage, x: i64, y: i64, coverage: u8) {
    if x < 0 || y < 0 || x >= target.width() as i64 || y >= target.height() as i64 {
        return;
    }
    let pixel = target.get_pixel_mut(x as u32, y as u32);
    if coverage > pixel.0[0] {
        pixel.0[0] = coverage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_clips_and_max_blends() {
        let mut img = GrayImage::new(4, 4);
        plot(&mut img, -1, 0, 255);
        plot(&mut img, 4, 4, 255);
        plot(&mut img, 1, 1, 100);
        plot(&mut img, 1, 1, 50);
        assert_eq!(img.get_pixel(1, 1).0[0], 100);
        assert_eq!(img.pixels().filter(|p| p.0[0] > 0).count(), 1);
    }

    #[test]
    fn metrics_height() {
        let m = VerticalMetrics {
            ascent: 10.0,
            descent: -3.0,
        };
        assert!((m.height() - 13.0).abs() < 1e-6);
    }
}
