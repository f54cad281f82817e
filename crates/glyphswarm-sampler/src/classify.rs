//! Outline / interior classification of opaque pixels

use glyphswarm_core::{SamplePoint, SwarmRng};
use image::GrayImage;

/// Opaque pixels of a rasterized phrase, split by 4-connected adjacency.
///
/// A pixel is an edge if any of its four neighbours is transparent or lies
/// outside the buffer. Ordering is scan order until [`shuffle`] is called.
///
/// [`shuffle`]: ClassifiedPixels::shuffle
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedPixels {
    pub edges: Vec<SamplePoint>,
    pub interior: Vec<SamplePoint>,
}

impl ClassifiedPixels {
    pub fn from_coverage(image: &GrayImage, alpha_threshold: u8) -> Self {
        let (w, h) = image.dimensions();
        let opaque = |x: i64, y: i64| -> bool {
            x >= 0
                && y >= 0
                && x < w as i64
                && y < h as i64
                && image.get_pixel(x as u32, y as u32).0[0] > alpha_threshold
        };

        let mut pixels = Self::default();
        for y in 0..h as i64 {
            for x in 0..w as i64 {
                if !opaque(x, y) {
                    continue;
                }
                let point = SamplePoint::new(x as f32, y as f32);
                let inner =
                    opaque(x - 1, y) && opaque(x + 1, y) && opaque(x, y - 1) && opaque(x, y + 1);
                if inner {
                    pixels.interior.push(point);
                } else {
                    pixels.edges.push(point);
                }
            }
        }
        pixels
    }

    /// Randomize within each class so strided subsampling has no scan-order bias
    pub fn shuffle(&mut self, rng: &mut SwarmRng) {
        rng.shuffle(&mut self.edges);
        rng.shuffle(&mut self.interior);
    }

    pub fn len(&self) -> usize {
        self.edges.len() + self.interior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.interior.is_empty()
    }

    /// Edges first, then interior
    pub fn ordered(&self) -> impl Iterator<Item = &SamplePoint> {
        self.edges.iter().chain(self.interior.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn filled_rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> GrayImage {
        let mut img = GrayImage::new(w, h);
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, Luma([255]));
            }
        }
        img
    }

    #[test]
    fn solid_square_splits_into_ring_and_core() {
        let img = filled_rect(10, 10, 2, 2, 7, 7);
        let pixels = ClassifiedPixels::from_coverage(&img, 128);
        assert_eq!(pixels.len(), 25);
        assert_eq!(pixels.edges.len(), 16);
        assert_eq!(pixels.interior.len(), 9);
    }

    #[test]
    fn buffer_border_counts_as_transparent() {
        let img = filled_rect(3, 3, 0, 0, 3, 3);
        let pixels = ClassifiedPixels::from_coverage(&img, 128);
        assert_eq!(pixels.edges.len(), 8);
        assert_eq!(pixels.interior, vec![SamplePoint::new(1.0, 1.0)]);
    }

    #[test]
    fn diagonal_neighbours_do_not_matter() {
        // A plus shape: the centre has all four orthogonal neighbours
        let mut img = GrayImage::new(3, 3);
        for (x, y) in [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)] {
            img.put_pixel(x, y, Luma([255]));
        }
        let pixels = ClassifiedPixels::from_coverage(&img, 128);
        assert_eq!(pixels.interior, vec![SamplePoint::new(1.0, 1.0)]);
        assert_eq!(pixels.edges.len(), 4);
    }

    #[test]
    fn threshold_filters_faint_coverage() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(0, 0, Luma([100]));
        img.put_pixel(1, 0, Luma([200]));
        let pixels = ClassifiedPixels::from_coverage(&img, 128);
        assert_eq!(pixels.len(), 1);
    }

    #[test]
    fn shuffle_keeps_classes() {
        let img = filled_rect(20, 20, 2, 2, 18, 18);
        let mut pixels = ClassifiedPixels::from_coverage(&img, 128);
        let before = pixels.clone();
        pixels.shuffle(&mut SwarmRng::new(9));
        assert_eq!(pixels.edges.len(), before.edges.len());
        assert_eq!(pixels.interior.len(), before.interior.len());
        for p in &pixels.edges {
            assert!(before.edges.contains(p));
        }
        assert_ne!(pixels.interior, before.interior);
    }
}
