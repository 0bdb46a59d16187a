use crate::config::Config;
use crate::error::ensure_success;
use anyhow::Context;
use async_trait::async_trait;
use domain::ports::Embedder;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;

const SERVICE: &str = "Embedding service";

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

/// Sentence embedder served by an Ollama-compatible `/api/embeddings` endpoint.
#[derive(Clone)]
pub struct OllamaEmbedder {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaEmbedder {
    pub fn new(client: Client, base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            config.embedding_base_url.clone(),
            config.embedding_model.clone(),
        )
    }

    fn url(&self) -> String {
        format!("{}/api/embeddings", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            model: &self.model,
            prompt: text,
        };
        let response = self
            .client
            .post(self.url())
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Could not reach {} at {}", SERVICE, self.base_url))?;
        let response = ensure_success(SERVICE, response).await?;
        let body: EmbeddingResponse = response.json().await?;
        if body.embedding.is_empty() {
            return Err(crate::error::ServiceError::EmptyResponse(SERVICE).into());
        }
        Ok(body.embedding)
    }
}
