//! # triagex Engine
//!
//! The recommendation engine: corpus store, exhaustive similarity
//! ranking, and the output modes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use triagex_core::TicketFields;
//! use triagex_engine::{EngineBuilder, Mode};
//! use triagex_provider::HashEmbedder;
//!
//! # async fn run() -> triagex_core::Result<()> {
//! let engine = EngineBuilder::new(Arc::new(HashEmbedder::default()))
//!     .corpus_dir("./data/tickets")
//!     .build()
//!     .await?;
//!
//! let query = TicketFields::new("VPN drops", "network", "tunnel dies hourly");
//! let recommendation = engine.recommend(query, Mode::Value).await?;
//! println!("{recommendation}");
//! # Ok(())
//! # }
//! ```

pub mod corpus;
pub mod engine;

pub use corpus::{CorpusStore, ScoredCandidate, DEFAULT_EMBED_CONCURRENCY};
pub use engine::{EngineBuilder, Mode, Recommendation, RecommendationEngine};
