//! Hashed character-trigram provider.
//!
//! Generates fixed-dimension vectors by hashing word tokens and character
//! trigrams into buckets. Spelling variants ("tiltrotor", "tilt-rotor")
//! share most trigrams, so they land close together. No network access.

use std::collections::HashMap;

use techcat_core::errors::TechcatResult;
use techcat_core::traits::IEmbeddingProvider;

/// Relative weight of whole-word features against trigram features.
const WORD_WEIGHT: f32 = 0.5;

pub struct HashedEmbeddingProvider {
    dimensions: usize,
}

impl HashedEmbeddingProvider {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Hash a feature into a bucket index using FNV-1a.
    fn bucket(feature: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in feature.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn features(text: &str) -> HashMap<String, f32> {
        let lower = text.to_lowercase();
        let mut features: HashMap<String, f32> = HashMap::new();

        for word in lower.split(|c: char| !c.is_alphanumeric()).filter(|w| w.len() >= 2) {
            *features.entry(format!("w:{word}")).or_default() += WORD_WEIGHT;
        }

        // Trigrams over the text with separators squashed, so hyphenation
        // and spacing differences do not change the features.
        let squashed: Vec<char> = format!(
            " {} ",
            lower
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        )
        .chars()
        .collect();
        for window in squashed.windows(3) {
            let gram: String = window.iter().collect();
            *features.entry(format!("t:{gram}")).or_default() += 1.0;
        }

        features
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        for (feature, weight) in Self::features(text) {
            vec[Self::bucket(&feature, self.dimensions)] += weight;
        }

        // L2 normalize.
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbeddingProvider for HashedEmbeddingProvider {
    fn embed(&self, text: &str) -> TechcatResult<Vec<f32>> {
        Ok(self.vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> TechcatResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashed-trigram"
    }

    fn is_available(&self) -> bool {
        true
    }
}
