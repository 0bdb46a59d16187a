//! Recording test doubles for the pipeline's collaborator ports.

use anyhow::anyhow;
use application::rag_service::RagService;
use async_trait::async_trait;
use domain::models::RetrievalMatch;
use domain::ports::{Embedder, Generator, VectorIndex};
use shared::types::Result;
use std::sync::{Arc, Mutex};

pub struct FakeEmbedder {
    vector: Option<Vec<f32>>,
    texts: Mutex<Vec<String>>,
}

impl FakeEmbedder {
    pub fn returning(vector: Vec<f32>) -> Self {
        Self {
            vector: Some(vector),
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            vector: None,
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Embedder for FakeEmbedder {
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        self.texts.lock().unwrap().push(text.to_string());
        self.vector
            .clone()
            .ok_or_else(|| anyhow!("embedding service unavailable"))
    }
}

pub struct FakeIndex {
    matches: Option<Vec<RetrievalMatch>>,
    requests: Mutex<Vec<(Vec<f32>, usize)>>,
}

impl FakeIndex {
    pub fn returning(matches: Vec<RetrievalMatch>) -> Self {
        Self {
            matches: Some(matches),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Matches carrying the given texts, scores descending.
    pub fn with_texts(texts: &[&str]) -> Self {
        let matches = texts
            .iter()
            .enumerate()
            .map(|(i, text)| {
                RetrievalMatch::with_text(format!("chunk-{i}"), 1.0 - i as f32 * 0.1, *text)
            })
            .collect();
        Self::returning(matches)
    }

    pub fn failing() -> Self {
        Self {
            matches: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(Vec<f32>, usize)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for FakeIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<RetrievalMatch>> {
        self.requests.lock().unwrap().push((vector.to_vec(), top_k));
        let matches = self
            .matches
            .clone()
            .ok_or_else(|| anyhow!("index query rejected: 401 Unauthorized"))?;
        Ok(matches.into_iter().take(top_k).collect())
    }
}

pub struct FakeGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for FakeGenerator {
    async fn generate_content(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .ok_or_else(|| anyhow!("generation quota exceeded"))
    }
}

/// The three doubles plus the service wired from them.
pub struct Harness {
    pub embedder: Arc<FakeEmbedder>,
    pub index: Arc<FakeIndex>,
    pub generator: Arc<FakeGenerator>,
}

impl Harness {
    pub fn new(embedder: FakeEmbedder, index: FakeIndex, generator: FakeGenerator) -> Self {
        Self {
            embedder: Arc::new(embedder),
            index: Arc::new(index),
            generator: Arc::new(generator),
        }
    }

    pub fn service(&self) -> RagService {
        RagService::new(
            self.embedder.clone(),
            self.index.clone(),
            self.generator.clone(),
        )
    }
}
