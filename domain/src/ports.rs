//! Collaborator contracts the pipeline is composed from.
//!
//! Every handle is built once at startup and shared read-only, so implementations
//! must be `Send + Sync` and take `&self`.

use crate::models::RetrievalMatch;
use async_trait::async_trait;
use shared::types::Result;

/// Turns text into a fixed-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn encode(&self, text: &str) -> Result<Vec<f32>>;
}

/// Nearest-neighbour search over stored vectors.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Returns at most `top_k` matches with their metadata, most similar first.
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<RetrievalMatch>>;
}

/// Single-shot text completion.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String>;
}
