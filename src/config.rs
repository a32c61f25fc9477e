/*!
Configuration types for pressbox.

Provides serde structs deserialized from TOML, an async loader, and a
default/override merge so a shipped `config.default.toml` can be adjusted
by a local `config.toml` without copying the whole file.
*/

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::pipeline::OutputMode;
use crate::quotes::{self, ExtractionMode};

/// Feed source configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// RSS/Atom feed URL to poll
    pub url: String,
    /// Hard cap on articles processed per fetch cycle
    pub max_articles: Option<usize>,
    /// User agent sent with feed and article requests; some news sites
    /// refuse requests without a browser-like UA
    pub user_agent: Option<String>,
}

impl FeedConfig {
    pub fn max_articles(&self) -> usize {
        self.max_articles.unwrap_or(5)
    }

    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
    }
}

/// Fetching configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub timeout_seconds: Option<u64>,
}

impl FetchConfig {
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(10)
    }
}

/// Quote extraction configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// "paragraph" keeps whole paragraphs, "span" extracts inner quotes
    pub mode: Option<ExtractionMode>,
    /// "quotes" returns the raw quote list, "summary" returns a bounded
    /// summary with attributed quotes appended
    pub output: Option<OutputMode>,
    /// Attach best-effort speaker names to quotes
    pub attribute_speakers: Option<bool>,
    pub summary_limit: Option<usize>,
    pub min_paragraph_len: Option<usize>,
}

/// HTTP server configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Top-level application configuration (deserialized from config.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub feed: FeedConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl Config {
    /// Load configuration from a TOML file asynchronously.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = tokio::fs::read_to_string(path.as_ref())
            .await
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let cfg: Config = toml::from_str(&data).context("Failed to parse TOML configuration")?;
        Ok(cfg)
    }

    /// Load configuration with an optional default file and an optional
    /// override file. If both are present they are merged, override winning.
    pub async fn load_with_defaults(
        default_path: Option<&Path>,
        override_path: Option<&Path>,
    ) -> Result<Self> {
        let mut config_value = toml::Value::Table(toml::map::Map::new());

        if let Some(path) = default_path {
            if path.exists() {
                let data = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read default config: {}", path.display()))?;
                let val: toml::Value =
                    toml::from_str(&data).context("Failed to parse default configuration")?;
                merge_toml(&mut config_value, val);
            }
        }

        if let Some(path) = override_path {
            if path.exists() {
                let data = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("Failed to read override config: {}", path.display()))?;
                let val: toml::Value =
                    toml::from_str(&data).context("Failed to parse override configuration")?;
                merge_toml(&mut config_value, val);
            }
        }

        let cfg: Config = config_value
            .try_into()
            .context("Failed to parse merged configuration")?;
        Ok(cfg)
    }
}

fn merge_toml(a: &mut toml::Value, b: toml::Value) {
    match (a, b) {
        (toml::Value::Table(a_map), toml::Value::Table(b_map)) => {
            for (k, v) in b_map {
                if let Some(a_val) = a_map.get_mut(&k) {
                    merge_toml(a_val, v);
                } else {
                    a_map.insert(k, v);
                }
            }
        }
        (a_val, b_val) => *a_val = b_val,
    }
}

impl ExtractionConfig {
    pub fn mode(&self) -> ExtractionMode {
        self.mode.unwrap_or(ExtractionMode::Paragraph)
    }

    pub fn output(&self) -> OutputMode {
        self.output.unwrap_or(OutputMode::Quotes)
    }

    pub fn attribute_speakers(&self) -> bool {
        self.attribute_speakers.unwrap_or(false)
    }

    pub fn summary_limit(&self) -> usize {
        self.summary_limit.unwrap_or(crate::summarize::DEFAULT_LIMIT)
    }

    pub fn min_paragraph_len(&self) -> usize {
        self.min_paragraph_len
            .unwrap_or(quotes::DEFAULT_MIN_PARAGRAPH_LEN)
    }
}
