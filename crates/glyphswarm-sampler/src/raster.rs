//! Offscreen text rasterization

use crate::font::GlyphSource;
use glyphswarm_core::{Canvas, SamplerConfig, Vec2};
use image::{GrayImage, Luma};

/// Starting font size relative to canvas height, before width fitting
const BASE_HEIGHT_FRACTION: f32 = 0.5;
/// Refinement passes for fonts whose width is not linear in size
const FIT_PASSES: usize = 8;

/// Pick a font size so the text spans at most `max_width_fraction` of the
/// canvas width. Portrait canvases get a floor relative to canvas width.
pub fn choose_font_size(
    glyphs: &dyn GlyphSource,
    text: &str,
    canvas: Canvas,
    config: &SamplerConfig,
) -> f32 {
    let width = canvas.width as f32;
    let max_width = width * config.max_width_fraction;
    let mut px = canvas.height as f32 * BASE_HEIGHT_FRACTION;

    for _ in 0..FIT_PASSES {
        let measured = glyphs.measure(text, px);
        if measured <= max_width || measured <= 0.0 {
            break;
        }
        // Slightly under-shoot so hinting rounding settles below the limit
        px *= (max_width / measured) * 0.999;
    }

    if canvas.is_portrait() {
        px = px.max(width * config.portrait_min_fraction);
    }
    px
}

/// Render `text` centered into a canvas-sized coverage buffer
pub fn rasterize(
    glyphs: &dyn GlyphSource,
    text: &str,
    canvas: Canvas,
    config: &SamplerConfig,
) -> GrayImage {
    let mut image = GrayImage::new(canvas.width, canvas.height);
    if canvas.is_empty() || text.trim().is_empty() {
        return image;
    }

    let px = choose_font_size(glyphs, text, canvas, config);
    let text_width = glyphs.measure(text, px);
    let metrics = glyphs.vertical_metrics(px);

    let origin = Vec2::new(
        (canvas.width as f32 - text_width) / 2.0,
        (canvas.height as f32 - metrics.height()) / 2.0 + metrics.ascent,
    );
    glyphs.draw(text, px, origin, &mut image);

    if config.thicken {
        image = thicken(&image);
    }
    image
}

/// One-pixel 4-neighbour dilation, evening out stroke weight across fonts
pub fn thicken(source: &GrayImage) -> GrayImage {
    let (w, h) = source.dimensions();
    let mut out = GrayImage::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let mut v = source.get_pixel(x, y).0[0];
            if x > 0 {
                v = v.max(source.get_pixel(x - 1, y).0[0]);
            }
            if x + 1 < w {
                v = v.max(source.get_pixel(x + 1, y).0[0]);
            }
            if y > 0 {
                v = v.max(source.get_pixel(x, y - 1).0[0]);
            }
            if y + 1 < h {
                v = v.max(source.get_pixel(x, y + 1).0[0]);
            }
            out.put_pixel(x, y, Luma([v]));
        }
    }
    out
}
