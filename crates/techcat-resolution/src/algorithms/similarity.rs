//! Fused lexical + semantic similarity.
//!
//! The lexical side is a normalized Levenshtein ratio over lower-cased
//! names. The semantic side is the cosine of cached embeddings, clamped to
//! [0, 1]; a text without a cached vector scores 0.

use std::collections::HashMap;
use std::sync::Arc;

use techcat_embeddings::EmbeddingEngine;

/// Synchronous read access to precomputed embeddings.
pub trait VectorLookup: Send + Sync {
    fn vector(&self, text: &str) -> Option<Arc<Vec<f32>>>;
}

impl VectorLookup for EmbeddingEngine {
    fn vector(&self, text: &str) -> Option<Arc<Vec<f32>>> {
        self.cached(text)
    }
}

impl VectorLookup for HashMap<String, Arc<Vec<f32>>> {
    fn vector(&self, text: &str) -> Option<Arc<Vec<f32>>> {
        self.get(text).cloned()
    }
}

/// Cosine similarity between two vectors.
/// Returns 0.0 for zero-length, mismatched or zero-magnitude vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let (mut dot, mut mag_a, mut mag_b) = (0.0f64, 0.0f64, 0.0f64);
    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }
    let denom = mag_a.sqrt() * mag_b.sqrt();
    if denom < f64::EPSILON {
        0.0
    } else {
        (dot / denom).clamp(-1.0, 1.0)
    }
}

/// Edit-distance ratio in [0, 1], case-insensitive.
pub fn fuzzy_similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(&a.to_lowercase(), &b.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedScore {
    pub fuzzy: f64,
    pub semantic: f64,
    pub score: f64,
}

pub struct FusedScorer<'a> {
    vectors: &'a dyn VectorLookup,
    fuzzy_weight: f64,
    semantic_weight: f64,
}

impl<'a> FusedScorer<'a> {
    pub fn new(vectors: &'a dyn VectorLookup, fuzzy_weight: f64, semantic_weight: f64) -> Self {
        Self {
            vectors,
            fuzzy_weight,
            semantic_weight,
        }
    }

    /// Semantic similarity of two embedded texts, clamped to [0, 1].
    pub fn semantic(&self, a: &str, b: &str) -> f64 {
        match (self.vectors.vector(a), self.vectors.vector(b)) {
            (Some(va), Some(vb)) => cosine_similarity(&va, &vb).max(0.0),
            _ => 0.0,
        }
    }

    /// Score two names, embedding each name itself.
    pub fn score(&self, a: &str, b: &str) -> FusedScore {
        self.score_with_texts(a, a, b, b)
    }

    /// Fuzzy compares the names; semantic compares the embedded texts.
    pub fn score_with_texts(&self, a_name: &str, a_text: &str, b_name: &str, b_text: &str) -> FusedScore {
        let fuzzy = fuzzy_similarity(a_name, b_name);
        let semantic = self.semantic(a_text, b_text);
        FusedScore {
            fuzzy,
            semantic,
            score: self.combine(fuzzy, semantic),
        }
    }

    pub fn combine(&self, fuzzy: f64, semantic: f64) -> f64 {
        (self.fuzzy_weight * fuzzy + self.semantic_weight * semantic).clamp(0.0, 1.0)
    }
}

/// Slack absorbing rounding in weighted sums, so a score that is the
/// threshold in exact arithmetic compares equal to it.
pub const SCORE_EPSILON: f64 = 1e-9;

/// Thresholds are inclusive.
pub fn meets(score: f64, threshold: f64) -> bool {
    score + SCORE_EPSILON >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(pairs: &[(&str, Vec<f32>)]) -> HashMap<String, Arc<Vec<f32>>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Arc::new(v.clone())))
            .collect()
    }

    #[test]
    fn identical_vectors_have_similarity_one() {
        let v = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn mismatched_lengths_return_zero() {
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn fuzzy_ignores_case() {
        assert_eq!(fuzzy_similarity("LiDAR", "lidar"), 1.0);
        assert!(fuzzy_similarity("tiltrotor", "tilt-rotor") > 0.8);
    }

    #[test]
    fn missing_vector_scores_zero_semantic() {
        let vectors = lookup(&[("a", vec![1.0, 0.0])]);
        let scorer = FusedScorer::new(&vectors, 0.4, 0.6);
        assert_eq!(scorer.semantic("a", "b"), 0.0);
    }

    #[test]
    fn negative_cosine_is_clamped() {
        let vectors = lookup(&[("a", vec![1.0, 0.0]), ("b", vec![-1.0, 0.0])]);
        let scorer = FusedScorer::new(&vectors, 0.0, 1.0);
        assert_eq!(scorer.score("a", "b").score, 0.0);
    }

    #[test]
    fn fused_score_weights_both_sides() {
        let vectors = lookup(&[("x", vec![1.0, 0.0]), ("y", vec![1.0, 0.0])]);
        let scorer = FusedScorer::new(&vectors, 0.4, 0.6);
        let s = scorer.score("x", "y");
        assert_eq!(s.fuzzy, 0.0);
        assert!((s.semantic - 1.0).abs() < 1e-9);
        assert!((s.score - 0.6).abs() < 1e-9);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(meets(0.85, 0.85));
        assert!(!meets(0.8499, 0.85));
    }

    #[test]
    fn fused_components_landing_on_threshold_are_accepted() {
        let vectors: HashMap<String, Arc<Vec<f32>>> = HashMap::new();
        let scorer = FusedScorer::new(&vectors, 0.4, 0.6);
        let score = scorer.combine(0.7, 0.95);
        assert!(meets(score, 0.85));
        assert!(!meets(scorer.combine(0.7, 0.9498), 0.85));
    }
}
