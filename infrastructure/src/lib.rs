pub mod config;
pub mod embedder;
pub mod error;
pub mod gemini;
pub mod pinecone;
