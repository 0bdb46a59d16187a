use crate::prompt::{assemble_context, build_prompt, DEFAULT_TOP_K};
use anyhow::{bail, Context};
use domain::models::Exchange;
use domain::ports::{Embedder, Generator, VectorIndex};
use shared::telemetry::Telemetry;
use shared::types::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Retrieve-then-generate pipeline shared by every front-end.
///
/// Holds read-only collaborator handles; one instance serves any number of
/// concurrent questions.
pub struct RagService {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
    generator: Arc<dyn Generator>,
    top_k: usize,
}

impl RagService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
        generator: Arc<dyn Generator>,
    ) -> Self {
        Self {
            embedder,
            index,
            generator,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Embed `query`, fetch its `k` nearest chunks and join their texts.
    pub async fn retrieve_context(&self, query: &str, k: usize) -> Result<String> {
        if query.is_empty() {
            bail!("Query must not be empty");
        }
        if k == 0 {
            bail!("Number of neighbours must be positive");
        }

        let vector = self
            .embedder
            .encode(query)
            .await
            .context("Failed to embed query")?;
        debug!(dimensions = vector.len(), "Query embedded");

        let matches = self
            .index
            .query(&vector, k)
            .await
            .context("Vector index query failed")?;
        debug!(matches = matches.len(), top_k = k, "Index returned matches");

        assemble_context(&matches)
    }

    /// Ask the generator once with the filled template and trim its reply.
    pub async fn generate_answer(&self, query: &str, context: &str) -> Result<String> {
        let prompt = build_prompt(query, context);
        let raw = self
            .generator
            .generate_content(&prompt)
            .await
            .context("Answer generation failed")?;
        Ok(raw.trim().to_string())
    }

    /// Run the full pipeline for one question.
    pub async fn answer(&self, query: &str) -> Result<Exchange> {
        let telemetry = Telemetry::new();
        let context = self.retrieve_context(query, self.top_k).await?;
        debug!(
            context_chars = context.len(),
            elapsed_ms = telemetry.elapsed_ms() as u64,
            "Context retrieved"
        );
        let answer = self.generate_answer(query, &context).await?;
        info!(
            elapsed_ms = telemetry.elapsed_ms() as u64,
            answer_chars = answer.len(),
            "Question answered"
        );
        Ok(Exchange {
            query: query.to_string(),
            answer,
        })
    }
}
