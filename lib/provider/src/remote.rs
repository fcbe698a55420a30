//! Remote embedding and completion client for OpenAI-compatible endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use triagex_core::{Embedding, EmbeddingProvider, Error, Result, TextCompleter};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Async client that turns text into embeddings (and, optionally,
/// completions) by calling an OpenAI-compatible HTTP service.
///
/// The client does not retry; failures surface as
/// [`Error::Provider`] and the caller decides what to do with them.
#[derive(Clone)]
pub struct RemoteEmbedder {
    client: Client,
    embeddings_endpoint: String,
    completions_endpoint: String,
    model: String,
    completion_model: String,
    dimensions: Option<usize>,
}

impl RemoteEmbedder {
    /// Build a new client for the given base URL, model, and API key.
    pub fn new(
        api_key: &str,
        base_url: &str,
        model: impl Into<String>,
    ) -> Result<Self> {
        Self::with_timeout(api_key, base_url, model, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        api_key: &str,
        base_url: &str,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::Provider("missing API key".to_string()));
        }

        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|_| Error::Provider("invalid API key".to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Provider(format!("failed to build HTTP client: {e}")))?;

        let base = base_url.trim_end_matches('/');
        let model = model.into();
        Ok(Self {
            client,
            embeddings_endpoint: format!("{base}/embeddings"),
            completions_endpoint: format!("{base}/completions"),
            completion_model: model.clone(),
            model,
            dimensions: None,
        })
    }

    /// Request embeddings of a fixed dimension from the service.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Use a different model for completions than for embeddings.
    #[must_use]
    pub fn with_completion_model(mut self, model: impl Into<String>) -> Self {
        self.completion_model = model.into();
        self
    }
}

#[async_trait]
impl EmbeddingProvider for RemoteEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding> {
        let request = EmbeddingRequest {
            model: &self.model,
            input: text,
            dimensions: self.dimensions,
        };

        let response = self
            .client
            .post(&self.embeddings_endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("embeddings request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::Provider(format!(
                "embeddings request failed ({status}): {body}"
            )));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("malformed embedding response: {e}")))?;
        let entry = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider("empty embedding response".to_string()))?;
        Ok(Embedding::new(entry.embedding))
    }
}

#[async_trait]
impl TextCompleter for RemoteEmbedder {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = CompletionRequest {
            model: &self.completion_model,
            prompt,
            max_tokens: 16,
            stop: &[".", ",", "?", "!", "###"],
        };

        let response = self
            .client
            .post(&self.completions_endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("completion request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(Error::Provider(format!(
                "completion request failed ({status}): {body}"
            )));
        }

        let parsed: CompletionResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("malformed completion response: {e}")))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Provider("empty completion response".to_string()))?;
        Ok(choice.text)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    stop: &'a [&'a str],
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}
