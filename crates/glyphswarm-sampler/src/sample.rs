//! Budgeted subsampling of classified pixels

use crate::classify::ClassifiedPixels;
use glyphswarm_core::{SamplePoint, SamplerConfig};

/// Reduce `pixels` to at most `budget` anchors, edges before interior.
///
/// Below `edge_bias_threshold` up to `edge_bias` of the budget goes to outline
/// pixels so sparse phrases stay legible; interior fills the rest. At or above
/// the threshold the combined sequence is strided uniformly.
pub fn subsample(
    pixels: &ClassifiedPixels,
    budget: usize,
    config: &SamplerConfig,
) -> Vec<SamplePoint> {
    let total = pixels.len();
    if total <= budget {
        return pixels.ordered().copied().collect();
    }

    let mut out = Vec::with_capacity(budget);
    if budget < config.edge_bias_threshold {
        let edges = pixels.edges.len();
        let interior = pixels.interior.len();

        let reserved = edge_reservation(budget, config.edge_bias);
        let mut edge_take = reserved.min(edges);
        let interior_take = (budget - edge_take).min(interior);
        // Interior too small to cover its share: backfill with more outline
        edge_take = (budget - interior_take).min(edges);

        stride_into(&pixels.edges, edge_take, &mut out);
        stride_into(&pixels.interior, interior_take, &mut out);
    } else {
        let edges = pixels.edges.len();
        for i in 0..budget {
            let idx = stride_index(i, total, budget);
            let point = if idx < edges {
                pixels.edges[idx]
            } else {
                pixels.interior[idx - edges]
            };
            out.push(point);
        }
    }
    out
}

/// `ceil(budget * bias)`, tolerant of float noise in the product
fn edge_reservation(budget: usize, bias: f32) -> usize {
    let exact = budget as f64 * bias.clamp(0.0, 1.0) as f64;
    ((exact - 1e-6).ceil().max(0.0) as usize).min(budget)
}

fn stride_index(i: usize, len: usize, count: usize) -> usize {
    (i as u64 * len as u64 / count as u64) as usize
}

/// Evenly pick `count` items from `source`, in source order
fn stride_into(source: &[SamplePoint], count: usize, out: &mut Vec<SamplePoint>) {
    if count >= source.len() {
        out.extend_from_slice(source);
        return;
    }
    for i in 0..count {
        out.push(source[stride_index(i, source.len(), count)]);
    }
}
