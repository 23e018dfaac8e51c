use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::video::youtube::MAX_PAGE_SIZE;

/// Configuration for the highlight service
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener settings
    pub server: ServerConfig,

    /// Video index (YouTube Data API) settings
    pub youtube: YouTubeConfig,

    /// Classification, filtering and result caps
    pub pipeline: PipelineConfig,

    /// Search result cache
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// API key; without one every search returns nothing
    pub api_key: Option<String>,

    /// API root, overridable to point at a mock server
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// `maxResults` per page (the API caps this at 50)
    pub page_size: usize,

    /// JSON override of the official channel registry
    pub official_channels_json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Videos up to this many seconds are short-form
    pub short_max_seconds: u64,

    /// Candidates gathered per request
    pub result_limit: usize,

    /// Cap per official channel
    pub max_channel_results: usize,

    /// Cap for the generic highlight search
    pub max_query_results: usize,

    /// Score and sort results; when off the two-team rule drops instead
    pub ranking_enabled: bool,

    /// Extra keyword tables (TOML)
    pub keywords_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache TTL in seconds (0 disables caching)
    pub ttl_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://www.googleapis.com/youtube/v3/".to_string(),
            timeout_seconds: 10,
            page_size: MAX_PAGE_SIZE,
            official_channels_json: None,
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            short_max_seconds: 75,
            result_limit: 60,
            max_channel_results: 50,
            max_query_results: 50,
            ranking_enabled: true,
            keywords_file: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_seconds: 60 }
    }
}

fn parse_or_keep<T: FromStr>(name: &str, raw: &str, current: T) -> T {
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            tracing::warn!("Ignoring invalid value for {}: {:?}", name, raw);
            current
        }
    }
}

impl Config {
    /// Load configuration: an explicit file, else the first default location
    /// found, else built-in defaults. Environment variables are applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::from_default_locations(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let config_str = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::info!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    fn from_default_locations() -> Self {
        let config_paths = ["kbo-highlights.toml", "config/kbo-highlights.toml"];

        for path in &config_paths {
            let path = Path::new(path);
            if !path.exists() {
                continue;
            }
            match Self::from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("{:#}", e),
            }
        }

        Self::default()
    }

    /// Override fields from environment-style variables
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = var("YT_API_KEY").or_else(|| var("YOUTUBE_API_KEY")) {
            self.youtube.api_key = Some(key.trim().to_string());
        }
        if let Some(url) = var("YT_API_BASE_URL") {
            self.youtube.base_url = url;
        }
        if let Some(json) = var("OFFICIAL_CHANNELS_JSON") {
            self.youtube.official_channels_json = Some(json);
        }
        if let Some(raw) = var("SEARCH_CACHE_TTL") {
            self.cache.ttl_seconds = parse_or_keep("SEARCH_CACHE_TTL", &raw, self.cache.ttl_seconds);
        }
        if let Some(raw) = var("SHORT_MAX_SEC") {
            self.pipeline.short_max_seconds =
                parse_or_keep("SHORT_MAX_SEC", &raw, self.pipeline.short_max_seconds);
        }
        if let Some(raw) = var("MAX_CHANNEL_RESULTS") {
            self.pipeline.max_channel_results =
                parse_or_keep("MAX_CHANNEL_RESULTS", &raw, self.pipeline.max_channel_results);
        }
        if let Some(raw) = var("MAX_QUERY_RESULTS") {
            self.pipeline.max_query_results =
                parse_or_keep("MAX_QUERY_RESULTS", &raw, self.pipeline.max_query_results);
        }
        if let Some(raw) = var("PORT") {
            self.server.port = parse_or_keep("PORT", &raw, self.server.port);
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.result_limit == 0 {
            return Err(anyhow!("result_limit must be greater than 0"));
        }

        if self.youtube.page_size == 0 || self.youtube.page_size > MAX_PAGE_SIZE {
            return Err(anyhow!(
                "page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            ));
        }

        url::Url::parse(&self.youtube.base_url)
            .with_context(|| format!("Invalid YouTube base URL: {}", self.youtube.base_url))?;

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "KBO Highlights Configuration:\n\
            - Listen: {}:{}\n\
            - API key configured: {}\n\
            - Short-form threshold: {}s\n\
            - Result limit: {} (channel cap {}, query cap {})\n\
            - Ranking enabled: {}\n\
            - Cache TTL: {}s",
            self.server.host,
            self.server.port,
            self.youtube.api_key.is_some(),
            self.pipeline.short_max_seconds,
            self.pipeline.result_limit,
            self.pipeline.max_channel_results,
            self.pipeline.max_query_results,
            self.pipeline.ranking_enabled,
            self.cache.ttl_seconds
        )
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.config.youtube.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.config.youtube.base_url = base_url.to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.config.youtube.page_size = page_size;
        self
    }

    pub fn with_short_max_seconds(mut self, seconds: u64) -> Self {
        self.config.pipeline.short_max_seconds = seconds;
        self
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.config.pipeline.result_limit = limit;
        self
    }

    pub fn with_cache_ttl(mut self, seconds: u64) -> Self {
        self.config.cache.ttl_seconds = seconds;
        self
    }

    pub fn enable_ranking(mut self, enable: bool) -> Self {
        self.config.pipeline.ranking_enabled = enable;
        self
    }

    pub fn with_official_channels_json(mut self, json: &str) -> Self {
        self.config.youtube.official_channels_json = Some(json.to_string());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
