use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::catalog::ResourceKey;
use crate::error::{FetchError, FetchResult};

/// Envelope every content endpoint responds with.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Envelope {
    /// Unwrap `data`, treating `success: false` or a missing/null `data` as malformed.
    pub fn into_data(self) -> FetchResult<Value> {
        if !self.success {
            return Err(FetchError::malformed(self.message.unwrap_or_else(|| "success: false".to_string())));
        }
        match self.data {
            Some(Value::Null) | None => Err(FetchError::malformed("missing data")),
            Some(v) => Ok(v),
        }
    }
}

/// Where resource payloads come from. The orchestrator only ever talks to this.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetch the raw `data` member for `key`.
    async fn fetch(&self, key: &ResourceKey) -> FetchResult<Value>;
}

/// Endpoint path for a key, relative to the API base URL.
pub fn endpoint_path(key: &ResourceKey) -> String {
    match key {
        ResourceKey::Hero => "/api/admin/homepage/settings".to_string(),
        ResourceKey::Company => "/api/admin/company/settings".to_string(),
        ResourceKey::Converter(id) => format!("/api/admin/converters/{id}/settings"),
        ResourceKey::Ads => "/api/adsense/settings".to_string(),
    }
}
