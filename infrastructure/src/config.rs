use dotenvy::dotenv;
use std::env;

pub const PINECONE_API_KEY: &str = "PINECONE_API_KEY";
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

const DEFAULT_TOP_K: usize = 5;

/// Process-wide settings, read once at startup.
///
/// Credentials are optional here: a missing key only fails when the client that
/// needs it is first used.
#[derive(Debug, Clone)]
pub struct Config {
    pub pinecone_api_key: Option<String>,
    pub pinecone_index: String,
    pub pinecone_index_host: Option<String>,
    pub pinecone_control_url: String,
    pub google_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub embedding_base_url: String,
    pub embedding_model: String,
    pub top_k: usize,
}

impl Config {
    pub fn load() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        Self {
            pinecone_api_key: get(PINECONE_API_KEY),
            pinecone_index: or("PINECONE_INDEX", "medicalbot"),
            pinecone_index_host: get("PINECONE_INDEX_HOST"),
            pinecone_control_url: or("PINECONE_CONTROL_URL", "https://api.pinecone.io"),
            google_api_key: get(GOOGLE_API_KEY),
            gemini_model: or("GEMINI_MODEL", "gemini-1.5-pro-latest"),
            gemini_base_url: or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com",
            ),
            embedding_base_url: or("EMBEDDING_BASE_URL", "http://localhost:11434"),
            // all-MiniLM-L6-v2, 384 dimensions; must match the vectors stored in the index.
            embedding_model: or("EMBEDDING_MODEL", "all-minilm"),
            top_k: get("RAG_TOP_K")
                .and_then(|value| value.trim().parse::<usize>().ok())
                .filter(|k| *k > 0)
                .unwrap_or(DEFAULT_TOP_K),
        }
    }
}
