//! Capability traits for the external text-model service.
//!
//! The engine never computes embeddings or completions itself; both come
//! from a remote collaborator reached through these traits. Passing the
//! provider in explicitly (rather than holding a global client) is what
//! lets the scoring core run against a deterministic fake in tests.

use async_trait::async_trait;

use crate::{Embedding, Result};

/// Converts one text string into a fixed-length embedding vector.
///
/// Implementations own their transport, timeout, and retry policy; the
/// core calls `embed` once per text field per record and propagates any
/// failure as-is.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Provider`](crate::Error::Provider) on transport,
    /// auth, quota, or malformed-response failures.
    async fn embed(&self, text: &str) -> Result<Embedding>;
}

/// Produces a free-text completion for a prompt.
///
/// Only used by the few-shot completion output mode; similarity scoring
/// never touches this trait.
#[async_trait]
pub trait TextCompleter: Send + Sync {
    /// Complete the given prompt, stopping at sentence punctuation.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
