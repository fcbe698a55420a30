//! Deterministic offline embedder based on trigram and word hashing.
//!
//! Produces the same normalized vector for the same text on every call,
//! with no network access. Useful for tests and demo corpora; real
//! deployments use [`RemoteEmbedder`](crate::RemoteEmbedder).

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use async_trait::async_trait;

use triagex_core::{Embedding, EmbeddingProvider, Result};

/// Default embedding dimension.
pub const DEFAULT_HASH_DIM: usize = 64;

/// Hash-based embedding provider.
///
/// Text is lowercased, split into character trigrams and whitespace
/// words, and each token is hashed to a vector position. Words
/// contribute more than trigrams. The result is L2-normalized, so no
/// non-empty text ever produces a zero vector; the empty string does,
/// and scoring it reports the undefined-similarity error downstream.
#[derive(Debug, Clone)]
pub struct HashEmbedder {
    dim: usize,
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_DIM)
    }
}

impl HashEmbedder {
    #[must_use]
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    fn hash_to_vector(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in generate_trigrams(&normalized) {
            let mut hasher = DefaultHasher::new();
            trigram.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            vector[pos] += 1.0;
        }

        for word in normalized.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.hash(&mut hasher);
            let pos = (hasher.finish() as usize) % self.dim;
            vector[pos] += 2.0;
        }

        let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if magnitude > 0.0 {
            for v in &mut vector {
                *v /= magnitude;
            }
        }

        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        Ok(Embedding::new(self.hash_to_vector(text)))
    }
}

fn generate_trigrams(s: &str) -> HashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    if chars.len() < 3 {
        return HashSet::new();
    }

    chars
        .windows(3)
        .map(|w| w.iter().collect::<String>())
        .collect()
}
