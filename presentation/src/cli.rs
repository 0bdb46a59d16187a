use crate::interactive;
use crate::web::{self, AppState};
use anyhow::Context;
use application::rag_service::RagService;
use clap::Parser;
use infrastructure::{
    config::Config, embedder::OllamaEmbedder, gemini::GeminiClient, pinecone::PineconeIndex,
};
use shared::types::Result;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::info;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Parser, Debug)]
#[command(name = "medibot")]
#[command(about = "Medical question answering over a Pinecone index with Gemini", long_about = None)]
pub struct Cli {
    /// Start an interactive question session instead of the web server
    #[arg(long)]
    pub chat: bool,

    /// Address the web server binds to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port the web server listens on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Chunks retrieved per question (overrides RAG_TOP_K)
    #[arg(long)]
    pub top_k: Option<NonZeroUsize>,

    /// Ask a single question, print the answer and exit
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,
}

impl Cli {
    pub fn apply(&self, config: &mut Config) {
        if let Some(top_k) = self.top_k {
            config.top_k = top_k.get();
        }
    }
}

/// Owns the pipeline for the whole process and hands it to whichever front-end runs.
pub struct CliApp {
    rag_service: Arc<RagService>,
}

impl CliApp {
    /// Build every collaborator handle once.
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("medibot/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        let service = RagService::new(
            Arc::new(OllamaEmbedder::from_config(client.clone(), config)),
            Arc::new(PineconeIndex::from_config(client.clone(), config)),
            Arc::new(GeminiClient::from_config(client, config)),
        )
        .with_top_k(config.top_k);

        info!(
            index = %config.pinecone_index,
            model = %config.gemini_model,
            embedding_model = %config.embedding_model,
            top_k = config.top_k,
            "Pipeline ready"
        );
        Ok(Self::from_service(Arc::new(service)))
    }

    pub fn from_service(rag_service: Arc<RagService>) -> Self {
        Self { rag_service }
    }

    pub fn service(&self) -> Arc<RagService> {
        Arc::clone(&self.rag_service)
    }

    pub async fn run(&self, cli: Cli) -> Result<()> {
        let question = cli.question.join(" ");
        if cli.chat {
            interactive::run(&self.rag_service).await
        } else if !question.trim().is_empty() {
            self.handle_question(&question).await
        } else {
            web::serve(AppState::new(self.service()), &cli.host, cli.port).await
        }
    }

    async fn handle_question(&self, question: &str) -> Result<()> {
        let exchange = self.rag_service.answer(question).await?;
        println!("{}", exchange.answer);
        Ok(())
    }
}
