use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::catalog::ResourceKey;
use crate::config::ContentConfig;
use crate::error::{FetchError, FetchResult};
use crate::source::{endpoint_path, ContentSource, Envelope};

/// Live content API over HTTP(S).
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base: String,
}

impl HttpSource {
    pub fn new(config: &ContentConfig) -> Result<Self> {
        // Timeouts are enforced per request by the orchestrator.
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, base: config.api_base().to_string() })
    }

    pub fn url_for(&self, key: &ResourceKey) -> String { format!("{}{}", self.base, endpoint_path(key)) }
}

#[async_trait]
impl ContentSource for HttpSource {
    async fn fetch(&self, key: &ResourceKey) -> FetchResult<Value> {
        let url = self.url_for(key);
        debug!(%key, %url, "GET");
        let resp = self.client.get(&url).header(reqwest::header::ACCEPT, "application/json").send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16() });
        }
        let envelope: Envelope = resp.json().await?;
        envelope.into_data()
    }
}
