//! Series similarity: how closely two equal-length sequences move together.

use crate::numeric::mean;

/// Similarity between two equal-length series, bounded to [-1, 1].
pub trait SimilarityMeasure: Send + Sync {
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Pearson correlation coefficient.
///
/// Returns 0.0 for mismatched lengths, fewer than two points, or a series with
/// zero variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pearson;

impl SimilarityMeasure for Pearson {
    fn similarity(&self, a: &[f64], b: &[f64]) -> f64 {
        if a.len() != b.len() || a.len() < 2 {
            return 0.0;
        }
        let mean_a = mean(a);
        let mean_b = mean(b);

        let mut cov = 0.0;
        let mut var_a = 0.0;
        let mut var_b = 0.0;
        for (x, y) in a.iter().zip(b) {
            let dx = x - mean_a;
            let dy = y - mean_b;
            cov += dx * dy;
            var_a += dx * dx;
            var_b += dy * dy;
        }

        if var_a <= 0.0 || var_b <= 0.0 {
            return 0.0;
        }
        (cov / (var_a.sqrt() * var_b.sqrt())).clamp(-1.0, 1.0)
    }
}
