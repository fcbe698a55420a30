use serde::{Deserialize, Serialize};

/// A fixed-length embedding vector produced by an [`EmbeddingProvider`].
///
/// All embeddings participating in one similarity computation must share
/// the same dimension; that is a precondition of the provider, not
/// enforced here.
///
/// [`EmbeddingProvider`]: crate::EmbeddingProvider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    data: Vec<f32>,
}

impl Embedding {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn from_slice(data: &[f32]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl From<Vec<f32>> for Embedding {
    fn from(data: Vec<f32>) -> Self {
        Self::new(data)
    }
}
