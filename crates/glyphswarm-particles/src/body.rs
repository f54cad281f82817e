//! Body-silhouette force field built from a segmentation mask

use crate::forces::{direction, ForceShape};
use glyphswarm_core::{BodyConfig, Canvas, Vec2};
use image::GrayImage;

/// Foreground mask in its own resolution; any non-zero byte is foreground
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentationMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SegmentationMask {
    /// None unless `data` holds exactly `width * height` bytes
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.data[(y * self.width + x) as usize] > 0
    }
}

impl From<GrayImage> for SegmentationMask {
    fn from(image: GrayImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            data: image.into_raw(),
        }
    }
}

/// Per-frame canvas-space summary of a silhouette
#[derive(Debug, Clone, PartialEq)]
pub struct BodyField {
    /// Expanded bounding box: min x, min y, max x, max y
    bounds: [f32; 4],
    centroid: Vec2,
    scale_x: f32,
    scale_y: f32,
    mirror_x: bool,
    strength: f32,
}

impl BodyField {
    /// Scan `mask` once. None when the mask is empty, degenerate, or the
    /// canvas has no area.
    pub fn build(
        mask: &SegmentationMask,
        intensity: f32,
        canvas: Canvas,
        repulsion_force: f32,
        config: &BodyConfig,
    ) -> Option<Self> {
        if mask.width == 0 || mask.height == 0 || canvas.is_empty() {
            return None;
        }

        let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
        let (mut max_x, mut max_y) = (0u32, 0u32);
        let (mut sum_x, mut sum_y, mut count) = (0f64, 0f64, 0u64);
        for y in 0..mask.height {
            let row = &mask.data[(y * mask.width) as usize..((y + 1) * mask.width) as usize];
            for (x, &v) in row.iter().enumerate() {
                if v == 0 {
                    continue;
                }
                let x = x as u32;
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
                sum_x += x as f64;
                sum_y += y as f64;
                count += 1;
            }
        }
        if count == 0 {
            return None;
        }

        let scale_x = canvas.width as f32 / mask.width as f32;
        let scale_y = canvas.height as f32 / mask.height as f32;
        let mean_x = (sum_x / count as f64) as f32;
        let mean_y = (sum_y / count as f64) as f32;

        let (left, right, centroid_x) = if config.mirror_x {
            let w = mask.width as f32;
            (
                (w - 1.0 - max_x as f32) * scale_x,
                (w - min_x as f32) * scale_x,
                (w - mean_x - 0.5) * scale_x,
            )
        } else {
            (
                min_x as f32 * scale_x,
                (max_x + 1) as f32 * scale_x,
                (mean_x + 0.5) * scale_x,
            )
        };
        let margin = config.bbox_margin;

        Some(Self {
            bounds: [
                left - margin,
                min_y as f32 * scale_y - margin,
                right + margin,
                (max_y + 1) as f32 * scale_y + margin,
            ],
            centroid: Vec2::new(centroid_x, (mean_y + 0.5) * scale_y),
            scale_x,
            scale_y,
            mirror_x: config.mirror_x,
            strength: repulsion_force * intensity.clamp(0.0, 1.0),
        })
    }

    pub fn centroid(&self) -> Vec2 {
        self.centroid
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    /// Coarse box test, then the per-pixel mask lookup
    pub fn contains(&self, mask: &SegmentationMask, position: Vec2) -> bool {
        let [x0, y0, x1, y1] = self.bounds;
        if position.x < x0 || position.x > x1 || position.y < y0 || position.y > y1 {
            return false;
        }
        if position.x < 0.0 || position.y < 0.0 {
            return false;
        }
        let mut mx = (position.x / self.scale_x) as u32;
        let my = (position.y / self.scale_y) as u32;
        if mx >= mask.width {
            return false;
        }
        if self.mirror_x {
            mx = mask.width - 1 - mx;
        }
        mask.is_foreground(mx, my)
    }

    /// Force on a particle inside the silhouette, relative to the centroid
    pub fn force(&self, shape: ForceShape, position: Vec2) -> Vec2 {
        let (dir, _) = direction(self.centroid, position);
        shape(dir, self.strength)
    }
}
