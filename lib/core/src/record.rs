//! Ticket records and their embedding pipeline.

use futures_util::try_join;
use serde::{Deserialize, Serialize};

use crate::{Embedding, EmbeddingProvider, Result};

/// The text fields shared by historical and query tickets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketFields {
    /// Short free text, the theme of the issue.
    pub title: String,
    /// Single-token classification label.
    pub category: String,
    /// Extensive free-text description.
    pub description: String,
}

impl TicketFields {
    pub fn new(
        title: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            description: description.into(),
        }
    }
}

/// A ticket with embeddings for each of its text fields.
///
/// Historical records additionally carry the resolution that closed the
/// ticket; query records have none. The embeddings are stored in fixed
/// field order (title, category, description) and the resolution text is
/// never embedded. Records are immutable once constructed.
#[derive(Debug, Clone)]
pub struct IssueRecord {
    fields: TicketFields,
    resolution: Option<String>,
    embeddings: Vec<Embedding>,
}

impl IssueRecord {
    /// Number of embedded text fields per record.
    pub const EMBEDDED_FIELDS: usize = 3;

    /// Construct a record by embedding each text field through the
    /// provider.
    ///
    /// All three embedding calls must succeed; any failure fails the
    /// construction as a whole and no partially embedded record is
    /// retained. There is no retry here, the provider owns that policy.
    pub async fn embed(
        provider: &dyn EmbeddingProvider,
        fields: TicketFields,
        resolution: Option<String>,
    ) -> Result<Self> {
        let (title, category, description) = try_join!(
            provider.embed(&fields.title),
            provider.embed(&fields.category),
            provider.embed(&fields.description),
        )?;

        Ok(Self {
            fields,
            resolution,
            embeddings: vec![title, category, description],
        })
    }

    /// Assemble a record from already-computed embeddings.
    pub fn from_parts(
        fields: TicketFields,
        resolution: Option<String>,
        embeddings: Vec<Embedding>,
    ) -> Self {
        Self {
            fields,
            resolution,
            embeddings,
        }
    }

    pub fn fields(&self) -> &TicketFields {
        &self.fields
    }

    pub fn title(&self) -> &str {
        &self.fields.title
    }

    pub fn category(&self) -> &str {
        &self.fields.category
    }

    pub fn description(&self) -> &str {
        &self.fields.description
    }

    pub fn resolution(&self) -> Option<&str> {
        self.resolution.as_deref()
    }

    /// The field embeddings in fixed order: title, category, description.
    pub fn embeddings(&self) -> &[Embedding] {
        &self.embeddings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Table-free stub: embeds text as byte-sum vectors, so identical
    /// texts get identical embeddings.
    struct StubProvider {
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    impl StubProvider {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn failing_on(text: &'static str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_on: Some(text),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for StubProvider {
        async fn embed(&self, text: &str) -> Result<Embedding> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(text) {
                return Err(Error::Provider("stub failure".to_string()));
            }
            let sum = text.bytes().map(f32::from).sum::<f32>();
            Ok(Embedding::new(vec![sum, 1.0]))
        }
    }

    #[tokio::test]
    async fn test_embed_calls_provider_once_per_field() {
        let provider = StubProvider::new();
        let record = IssueRecord::embed(
            &provider,
            TicketFields::new("VPN down", "network", "cannot connect"),
            Some("restart the client".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
        assert_eq!(record.embeddings().len(), IssueRecord::EMBEDDED_FIELDS);
        assert_eq!(record.resolution(), Some("restart the client"));
    }

    #[tokio::test]
    async fn test_resolution_is_never_embedded() {
        let provider = StubProvider::new();
        let with_resolution = IssueRecord::embed(
            &provider,
            TicketFields::new("a", "b", "c"),
            Some("unique resolution text".to_string()),
        )
        .await
        .unwrap();
        let without = IssueRecord::embed(
            &provider,
            TicketFields::new("a", "b", "c"),
            None,
        )
        .await
        .unwrap();

        assert_eq!(with_resolution.embeddings(), without.embeddings());
    }

    #[tokio::test]
    async fn test_failed_embedding_fails_whole_construction() {
        let provider = StubProvider::failing_on("network");
        let result = IssueRecord::embed(
            &provider,
            TicketFields::new("VPN down", "network", "cannot connect"),
            None,
        )
        .await;
        assert!(matches!(result, Err(Error::Provider(_))));
    }
}
