//! The recommendation engine and its output modes.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{debug, info};

use triagex_core::{
    EmbeddingProvider, Error, IssueRecord, Result, TextCompleter, TicketFields,
};
use triagex_ingest::{load_query_examples, load_rows, preprocess, QueryRow};

use crate::corpus::{CorpusStore, ScoredCandidate, DEFAULT_EMBED_CONCURRENCY};

/// The requested shape of a recommendation response.
///
/// A closed enumeration resolved once at the boundary; unsupported mode
/// strings fail there with [`Error::InvalidMode`] instead of being
/// re-checked ad hoc downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The top-ranked resolution text alone.
    Solution,
    /// The top-ranked resolution with its score as an integer
    /// percentage, e.g. `"Restart the VPN client (87%)"`.
    Value,
    /// The full ranked candidate list.
    Ranked,
    /// A free-text resolution from few-shot completion instead of
    /// similarity ranking.
    Complete,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "solution" => Ok(Mode::Solution),
            "value" => Ok(Mode::Value),
            "df" => Ok(Mode::Ranked),
            "complete" => Ok(Mode::Complete),
            other => Err(Error::InvalidMode(other.to_string())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Solution => "solution",
            Mode::Value => "value",
            Mode::Ranked => "df",
            Mode::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// One recommendation response, one variant per [`Mode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Recommendation {
    Solution(String),
    Value(String),
    Ranked(Vec<ScoredCandidate>),
    Completion(String),
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::Solution(text)
            | Recommendation::Value(text)
            | Recommendation::Completion(text) => f.write_str(text),
            Recommendation::Ranked(candidates) => {
                for candidate in candidates {
                    writeln!(f, "{:.4}  {}", candidate.score, candidate.resolution)?;
                }
                Ok(())
            }
        }
    }
}

/// Builder for [`RecommendationEngine`].
///
/// The provider is mandatory; corpus directory, example batch, and
/// completer are optional. `build` performs the whole ingestion, so the
/// returned engine is always ready to answer queries.
pub struct EngineBuilder {
    provider: Arc<dyn EmbeddingProvider>,
    completer: Option<Arc<dyn TextCompleter>>,
    corpus_dir: Option<PathBuf>,
    examples_path: Option<PathBuf>,
    concurrency: usize,
}

impl EngineBuilder {
    #[must_use]
    pub fn new(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            completer: None,
            corpus_dir: None,
            examples_path: None,
            concurrency: DEFAULT_EMBED_CONCURRENCY,
        }
    }

    /// Directory holding the historical ticket source files.
    #[must_use]
    pub fn corpus_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.corpus_dir = Some(dir.into());
        self
    }

    /// File with query-shaped example rows for demo use.
    #[must_use]
    pub fn examples_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.examples_path = Some(path.into());
        self
    }

    /// Completer backing [`Mode::Complete`].
    #[must_use]
    pub fn completer(mut self, completer: Arc<dyn TextCompleter>) -> Self {
        self.completer = Some(completer);
        self
    }

    /// How many records to embed concurrently during ingestion.
    #[must_use]
    pub fn embed_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Ingest the corpus and example batch and return a ready engine.
    pub async fn build(self) -> Result<RecommendationEngine> {
        let rows = match &self.corpus_dir {
            Some(dir) => preprocess(load_rows(dir)?),
            None => Vec::new(),
        };
        let corpus = CorpusStore::load(self.provider.as_ref(), rows, self.concurrency).await?;

        let examples = match &self.examples_path {
            Some(path) => load_query_examples(path)?,
            None => Vec::new(),
        };

        info!(
            records = corpus.len(),
            examples = examples.len(),
            "recommendation engine ready"
        );
        Ok(RecommendationEngine {
            corpus,
            provider: self.provider,
            completer: self.completer,
            examples,
        })
    }
}

/// Recommends a resolution for a new ticket by ranking the resolutions
/// of previously solved tickets by embedding similarity.
///
/// The corpus is built once at construction and never mutated; the
/// engine supports any number of concurrent read-only queries.
pub struct RecommendationEngine {
    corpus: CorpusStore,
    provider: Arc<dyn EmbeddingProvider>,
    completer: Option<Arc<dyn TextCompleter>>,
    examples: Vec<QueryRow>,
}

impl RecommendationEngine {
    /// Assemble an engine from already-built parts.
    #[must_use]
    pub fn from_parts(
        corpus: CorpusStore,
        provider: Arc<dyn EmbeddingProvider>,
        completer: Option<Arc<dyn TextCompleter>>,
        examples: Vec<QueryRow>,
    ) -> Self {
        Self {
            corpus,
            provider,
            completer,
            examples,
        }
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    /// The held-out query-shaped example batch. Demo input only, never
    /// scored.
    pub fn examples(&self) -> &[QueryRow] {
        &self.examples
    }

    /// Compute a recommendation for the query ticket.
    ///
    /// For the similarity modes the query is embedded exactly like a
    /// corpus record (three provider calls, no resolution), scored
    /// against every stored record, and the candidates are ranked by
    /// score descending with corpus order breaking ties.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCorpus`] with no historical records,
    /// [`Error::MissingCompleter`] for [`Mode::Complete`] without a
    /// configured completer, plus any provider or scoring error.
    pub async fn recommend(&self, query: TicketFields, mode: Mode) -> Result<Recommendation> {
        debug!(%mode, title = %query.title, "recommend");
        if let Mode::Complete = mode {
            return self.recommend_completion(&query).await;
        }

        let record = IssueRecord::embed(self.provider.as_ref(), query, None).await?;
        let ranked = self.corpus.rank(&record)?;

        // rank() guarantees a non-empty result.
        match mode {
            Mode::Solution => Ok(Recommendation::Solution(ranked[0].resolution.clone())),
            Mode::Value => Ok(Recommendation::Value(format!(
                "{} ({:.0}%)",
                ranked[0].resolution,
                ranked[0].score * 100.0
            ))),
            Mode::Ranked => Ok(Recommendation::Ranked(ranked)),
            Mode::Complete => unreachable!("handled above"),
        }
    }

    async fn recommend_completion(&self, query: &TicketFields) -> Result<Recommendation> {
        let completer = self.completer.as_ref().ok_or(Error::MissingCompleter)?;
        if self.corpus.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let prompt = self.few_shot_prompt(query);
        let completion = completer.complete(&prompt).await?;
        Ok(Recommendation::Completion(completion.trim().to_string()))
    }

    /// Assemble the few-shot prompt: one block per corpus record, then
    /// the query triple with a dangling `Resolution:` for the model to
    /// fill in.
    fn few_shot_prompt(&self, query: &TicketFields) -> String {
        let mut prompt = String::from("Recommend a resolution for an issue.\n");
        for record in self.corpus.records() {
            prompt.push_str(&format!(
                "Issue: {},{},{}\nResolution: {}.\n###\n",
                record.title(),
                record.category(),
                record.description(),
                record.resolution().unwrap_or_default(),
            ));
        }
        prompt.push_str(&format!(
            "Issue: {},{},{}\nResolution:",
            query.title, query.category, query.description
        ));
        prompt
    }
}
