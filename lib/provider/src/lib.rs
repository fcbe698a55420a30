//! # triagex Provider
//!
//! Implementations of the [`EmbeddingProvider`] and [`TextCompleter`]
//! capability traits:
//!
//! - [`RemoteEmbedder`] - async HTTP client for OpenAI-compatible
//!   embeddings and completions endpoints
//! - [`HashEmbedder`] - deterministic offline embedder for tests and
//!   demos
//!
//! [`EmbeddingProvider`]: triagex_core::EmbeddingProvider
//! [`TextCompleter`]: triagex_core::TextCompleter

pub mod hash;
pub mod remote;

pub use hash::{HashEmbedder, DEFAULT_HASH_DIM};
pub use remote::RemoteEmbedder;
