//! Deterministic hash-based embedding strategy.

use crate::embedding::Embedder;
use enrich_core::AppResult;
use std::collections::HashMap;

/// Embedding built from character trigram frequencies.
///
/// Nowhere near the semantic quality of a trained model, but it is
/// deterministic and content-dependent: the same text always maps to the
/// same unit vector, and different texts usually diverge. That is enough
/// for development seeding and for ranking tests that must not flake.
#[derive(Debug)]
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];
        let chars: Vec<char> = text.to_lowercase().chars().collect();

        if chars.is_empty() || self.dimensions == 0 {
            return embedding;
        }

        // Count trigram occurrences; texts shorter than one trigram hash
        // as a single token so they still produce a usable vector.
        let mut counts: HashMap<u64, u32> = HashMap::new();
        if chars.len() < 3 {
            *counts.entry(fold_hash(&chars)).or_insert(0) += 1;
        } else {
            for window in chars.windows(3) {
                *counts.entry(fold_hash(window)).or_insert(0) += 1;
            }
        }

        for (hash, count) in counts {
            let bucket = (hash as usize) % self.dimensions;
            // sqrt scaling keeps frequent trigrams from dominating
            embedding[bucket] += (count as f32).sqrt();
        }

        // L2 normalize, cosine-ready
        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut embedding {
                *value /= norm;
            }
        }

        embedding
    }
}

fn fold_hash(chars: &[char]) -> u64 {
    chars
        .iter()
        .fold(0u64, |acc, c| acc.wrapping_mul(31).wrapping_add(*c as u64))
}

#[async_trait::async_trait]
impl Embedder for HashEmbedder {
    fn strategy_name(&self) -> &str {
        "hash"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        Ok(self.embed_text(text))
    }
}
