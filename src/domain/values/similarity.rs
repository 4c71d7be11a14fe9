use serde::{Deserialize, Serialize};

/// Cosine similarity accumulated in f64. A zero-norm operand (or a length
/// disagreement) yields 0.0 rather than NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b.iter()) {
        let x = *x as f64;
        let y = *y as f64;
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

/// Default minimum similarity a search result must reach.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimilarityThreshold(f64);

impl SimilarityThreshold {
    pub fn new(value: f64) -> Result<Self, String> {
        if !(0.0..=1.0).contains(&value) {
            return Err(format!(
                "Similarity threshold must be between 0.0 and 1.0, got {value}"
            ));
        }
        Ok(SimilarityThreshold(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for SimilarityThreshold {
    fn default() -> Self {
        SimilarityThreshold(0.8)
    }
}
