use crate::config::{Config, PINECONE_API_KEY};
use crate::error::{ensure_success, ServiceError};
use anyhow::Context;
use async_trait::async_trait;
use domain::models::RetrievalMatch;
use domain::ports::VectorIndex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use shared::types::Result;
use tokio::sync::OnceCell;
use tracing::info;

const SERVICE: &str = "Pinecone";
const API_VERSION: &str = "2024-07";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RetrievalMatch>,
}

#[derive(Deserialize)]
struct IndexDescription {
    host: String,
}

/// Data-plane client for one Pinecone index.
///
/// The index host is either configured or looked up once through the control
/// plane, then reused for every query.
pub struct PineconeIndex {
    client: Client,
    api_key: Option<String>,
    index_name: String,
    control_url: String,
    host: OnceCell<String>,
}

impl PineconeIndex {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        index_name: impl Into<String>,
        control_url: impl Into<String>,
        host: Option<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            index_name: index_name.into(),
            control_url: control_url.into(),
            host: OnceCell::new_with(host),
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            config.pinecone_api_key.clone(),
            config.pinecone_index.clone(),
            config.pinecone_control_url.clone(),
            config.pinecone_index_host.clone(),
        )
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingCredential(PINECONE_API_KEY).into())
    }

    async fn host(&self) -> Result<&str> {
        let host = self
            .host
            .get_or_try_init(|| self.describe_index())
            .await?;
        Ok(host.as_str())
    }

    async fn describe_index(&self) -> Result<String> {
        let url = format!(
            "{}/indexes/{}",
            self.control_url.trim_end_matches('/'),
            self.index_name
        );
        let response = self
            .client
            .get(&url)
            .header("Api-Key", self.api_key()?)
            .header("X-Pinecone-API-Version", API_VERSION)
            .send()
            .await
            .with_context(|| format!("Could not reach {} control plane", SERVICE))?;
        let response = ensure_success(SERVICE, response).await?;
        let description: IndexDescription = response.json().await?;
        info!(index = %self.index_name, host = %description.host, "Resolved index host");
        Ok(description.host)
    }
}

fn query_url(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        format!("{}/query", host)
    } else {
        format!("https://{}/query", host)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<RetrievalMatch>> {
        let api_key = self.api_key()?;
        let url = query_url(self.host().await?);
        let request = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
        };
        let response = self
            .client
            .post(&url)
            .header("Api-Key", api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Could not reach {} index '{}'", SERVICE, self.index_name))?;
        let response = ensure_success(SERVICE, response).await?;
        let body: QueryResponse = response.json().await?;
        Ok(body.matches)
    }
}
