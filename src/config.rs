use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://setting-panel.vercel.app";
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Orchestrator settings. Passed explicitly at construction; the loader below
/// only decides where the values come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub base_url: String,
    pub ttl_ms: u64,
    pub request_timeout_ms: u64,
    pub user_agent: String,
    pub log_level: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ttl_ms: DEFAULT_TTL_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: concat!("foxbeep-content/", env!("CARGO_PKG_VERSION")).to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl ContentConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }

    pub fn ttl(&self) -> Duration { Duration::from_millis(self.ttl_ms) }
    pub fn request_timeout(&self) -> Duration { Duration::from_millis(self.request_timeout_ms) }

    /// Base URL without a trailing slash, ready for joining endpoint paths.
    pub fn api_base(&self) -> &str { self.base_url.trim_end_matches('/') }

    /// Load from `path` if given (must exist), else from the default config
    /// location if a file is there, else defaults. Env overrides are applied
    /// last and the result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path().filter(|p| p.exists()),
        };
        let mut cfg = match file {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        cfg.apply_overrides(|k| std::env::var(k).ok())?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config: {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config: {}", path.display()))
    }

    /// Apply `FOXBEEP_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FOXBEEP_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            self.base_url = v.trim().to_string();
        }
        if let Some(v) = lookup("FOXBEEP_CONTENT_TTL_MS") {
            self.ttl_ms = v.trim().parse().with_context(|| format!("FOXBEEP_CONTENT_TTL_MS is not a number: {v}"))?;
        }
        if let Some(v) = lookup("FOXBEEP_REQUEST_TIMEOUT_MS") {
            self.request_timeout_ms =
                v.trim().parse().with_context(|| format!("FOXBEEP_REQUEST_TIMEOUT_MS is not a number: {v}"))?;
        }
        if let Some(v) = lookup("FOXBEEP_LOG").filter(|v| !v.trim().is_empty()) {
            self.log_level = v.trim().to_string();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).with_context(|| format!("invalid base URL: {}", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("base URL must be http(s): {}", self.base_url);
        }
        if self.request_timeout_ms == 0 {
            bail!("request_timeout_ms must be greater than zero");
        }
        Ok(())
    }
}

/// `<config dir>/content.toml` for this application, when the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "foxbeep", "foxbeep-content").map(|d| d.config_dir().join("content.toml"))
}
