//! The historical ticket corpus and exhaustive ranking.

use futures_util::stream::{self, StreamExt, TryStreamExt};
use tracing::info;

use triagex_core::{
    record_similarity, EmbeddingProvider, Error, IssueRecord, Result,
};
use triagex_ingest::CorpusRow;

/// Default number of records embedded concurrently during a corpus load.
pub const DEFAULT_EMBED_CONCURRENCY: usize = 8;

/// One ranked answer: the stored resolution and its similarity score.
///
/// Scores are dimensionless similarity values; they are not clamped to
/// [0, 1].
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoredCandidate {
    pub resolution: String,
    pub score: f32,
}

/// An ordered, immutable set of historical resolved tickets.
///
/// Built once per engine lifetime and never mutated afterward; any
/// number of concurrent queries may read it without synchronization.
/// Record order is insertion order from ingestion and carries no
/// semantic meaning, but it is the tie-breaker for equal scores.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    records: Vec<IssueRecord>,
}

impl CorpusStore {
    /// Embed each preprocessed row and collect the records.
    ///
    /// Up to `concurrency` records embed in flight at once; the buffered
    /// stream preserves row order, and each record's three field
    /// embeddings complete before the record is considered constructed.
    /// Any provider failure fails the whole load.
    pub async fn load(
        provider: &dyn EmbeddingProvider,
        rows: Vec<CorpusRow>,
        concurrency: usize,
    ) -> Result<Self> {
        let total = rows.len();
        let records: Vec<IssueRecord> = stream::iter(rows)
            .map(|row| async move {
                IssueRecord::embed(provider, row.fields, Some(row.resolution)).await
            })
            .buffered(concurrency.max(1))
            .try_collect()
            .await?;

        info!(records = total, "corpus embedded");
        Ok(Self { records })
    }

    /// Wrap already-embedded records.
    #[must_use]
    pub fn from_records(records: Vec<IssueRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[IssueRecord] {
        &self.records
    }

    /// The sorted, deduplicated category labels of the corpus.
    ///
    /// Furnished to surrounding UI layers (for example a dropdown of
    /// known categories); not used in scoring.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.records.iter().map(IssueRecord::category).collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    /// Score the query against every record and return the candidates
    /// sorted by score descending. The sort is stable, so equal scores
    /// keep corpus order and the top-1 result is reproducible.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCorpus`] when there is nothing to rank; scoring
    /// errors from [`record_similarity`] propagate.
    pub fn rank(&self, query: &IssueRecord) -> Result<Vec<ScoredCandidate>> {
        if self.records.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        let mut candidates = Vec::with_capacity(self.records.len());
        for record in &self.records {
            let score = record_similarity(query, record)?;
            candidates.push(ScoredCandidate {
                resolution: record.resolution().unwrap_or_default().to_string(),
                score,
            });
        }

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(candidates)
    }
}
