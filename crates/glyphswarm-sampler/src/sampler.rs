//! Phrase → anchor sampling with a per-phrase cache

use crate::block_font::BlockFont;
use crate::classify::ClassifiedPixels;
use crate::font::GlyphSource;
use crate::raster::rasterize;
use crate::sample::subsample;
use glyphswarm_core::{Canvas, SamplePoint, SamplerConfig, SwarmRng};
use log::debug;
use std::sync::Arc;

/// Classified sets kept before the oldest is evicted
const CACHE_CAPACITY: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CacheKey {
    text: String,
    canvas: Canvas,
}

/// Rasterizes phrases and hands out budgeted anchor sequences
pub struct TextSampler {
    glyphs: Box<dyn GlyphSource>,
    config: SamplerConfig,
    rng: SwarmRng,
    /// Most recently used last
    cache: Vec<(CacheKey, Arc<ClassifiedPixels>)>,
}

impl TextSampler {
    pub fn new(glyphs: Box<dyn GlyphSource>, config: SamplerConfig, seed: u32) -> Self {
        Self {
            glyphs,
            config,
            rng: SwarmRng::new(seed),
            cache: Vec::with_capacity(CACHE_CAPACITY),
        }
    }

    /// Sampler using the built-in block font
    pub fn with_block_font(config: SamplerConfig, seed: u32) -> Self {
        Self::new(Box::new(BlockFont::new()), config, seed)
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Replace sampling parameters; cached rasters depend on them, so drop them
    pub fn set_config(&mut self, config: SamplerConfig) {
        if config != self.config {
            self.config = config;
            self.cache.clear();
        }
    }

    /// Rasterize and classify `text` for `canvas`, shuffled within each class.
    /// Results are cached per phrase and canvas size.
    pub fn classify(&mut self, text: &str, canvas: Canvas) -> Arc<ClassifiedPixels> {
        if canvas.is_empty() || text.trim().is_empty() {
            return Arc::new(ClassifiedPixels::default());
        }

        let key = CacheKey {
            text: text.to_string(),
            canvas,
        };
        if let Some(pos) = self.cache.iter().position(|(k, _)| *k == key) {
            let entry = self.cache.remove(pos);
            let pixels = Arc::clone(&entry.1);
            self.cache.push(entry);
            debug!(
                "[sampler] cache hit for {:?} at {}x{}",
                text, canvas.width, canvas.height
            );
            return pixels;
        }

        let image = rasterize(self.glyphs.as_ref(), text, canvas, &self.config);
        let mut pixels = ClassifiedPixels::from_coverage(&image, self.config.alpha_threshold);
        pixels.shuffle(&mut self.rng);
        debug!(
            "[sampler] rasterized {:?} at {}x{}: {} edge, {} interior",
            text,
            canvas.width,
            canvas.height,
            pixels.edges.len(),
            pixels.interior.len()
        );

        let pixels = Arc::new(pixels);
        if self.cache.len() >= CACHE_CAPACITY {
            self.cache.remove(0);
        }
        self.cache.push((key, Arc::clone(&pixels)));
        pixels
    }

    /// Budgeted anchors for an already classified phrase
    pub fn subsample(&self, pixels: &ClassifiedPixels, budget: usize) -> Vec<SamplePoint> {
        subsample(pixels, budget, &self.config)
    }

    /// `classify` followed by `subsample`
    pub fn sample(&mut self, text: &str, canvas: Canvas, budget: usize) -> Vec<SamplePoint> {
        let pixels = self.classify(text, canvas);
        self.subsample(&pixels, budget)
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
