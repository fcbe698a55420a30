//! # triagex
//!
//! A semantic recommendation engine for IT support tickets.
//!
//! triagex ingests a folder of previously resolved tickets, embeds each
//! ticket's text fields through an external embedding service, and
//! recommends a resolution for a new ticket by ranking the corpus by
//! cosine similarity.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triagex::prelude::*;
//!
//! # async fn run() -> triagex::Result<()> {
//! let provider = Arc::new(RemoteEmbedder::new(
//!     "sk-...",
//!     "https://api.example.com/v1",
//!     "embed-small",
//! )?);
//!
//! let engine = EngineBuilder::new(provider)
//!     .corpus_dir("./data/tickets")
//!     .examples_path("./data/examples.csv")
//!     .build()
//!     .await?;
//!
//! let query = TicketFields::new("VPN drops", "network", "tunnel dies hourly");
//! let recommendation = engine.recommend(query, Mode::Value).await?;
//! println!("{recommendation}"); // e.g. "Restart the VPN client (87%)"
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`triagex-core`](https://docs.rs/triagex-core) - Embeddings, similarity scoring, ticket records
//! - [`triagex-provider`](https://docs.rs/triagex-provider) - Remote and offline embedding providers
//! - [`triagex-ingest`](https://docs.rs/triagex-ingest) - CSV/TSV/JSON corpus readers
//! - [`triagex-engine`](https://docs.rs/triagex-engine) - Corpus store, ranking, output modes

// Re-export core types
pub use triagex_core::{
    cosine_similarity, record_similarity,
    Embedding, EmbeddingProvider, Error, IssueRecord, Result, TextCompleter, TicketFields,
};

// Re-export ingestion
pub use triagex_ingest::{load_query_examples, load_rows, preprocess, CorpusRow, QueryRow};

// Re-export providers
pub use triagex_provider::{HashEmbedder, RemoteEmbedder};

// Re-export engine
pub use triagex_engine::{
    CorpusStore, EngineBuilder, Mode, Recommendation, RecommendationEngine, ScoredCandidate,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        cosine_similarity, record_similarity,
        CorpusStore, Embedding, EmbeddingProvider, EngineBuilder, Error, HashEmbedder,
        IssueRecord, Mode, Recommendation, RecommendationEngine, RemoteEmbedder, Result,
        ScoredCandidate, TextCompleter, TicketFields,
    };
}
