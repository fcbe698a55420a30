//! # triagex Core
//!
//! Core library for the triagex recommendation engine.
//!
//! This crate provides the fundamental types and scoring routines:
//!
//! - [`Embedding`] - Fixed-length embedding vector
//! - [`TicketFields`] / [`IssueRecord`] - A ticket with per-field embeddings
//! - [`cosine_similarity`] / [`record_similarity`] - Similarity scoring
//! - [`EmbeddingProvider`] / [`TextCompleter`] - Capability traits for the
//!   external text-model service
//!
//! ## Example
//!
//! ```rust
//! use triagex_core::{cosine_similarity, Embedding};
//!
//! let a = Embedding::new(vec![1.0, 0.0]);
//! let b = Embedding::new(vec![1.0, 0.0]);
//! let score = cosine_similarity(&a, &b).unwrap();
//! assert!((score - 1.0).abs() < 1e-6);
//! ```

pub mod embedding;
pub mod error;
pub mod provider;
pub mod record;
pub mod similarity;

pub use embedding::Embedding;
pub use error::{Error, Result};
pub use provider::{EmbeddingProvider, TextCompleter};
pub use record::{IssueRecord, TicketFields};
pub use similarity::{cosine_similarity, record_similarity};
