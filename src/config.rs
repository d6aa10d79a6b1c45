use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Result, anyhow};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where ingestion reads its JSON from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Http { base_url: String, token: String },
    Dir(PathBuf),
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub source: SourceConfig,
    pub timeout: Duration,
    /// Upper bound on concurrent player fetches. `None` runs one worker per player.
    pub fetch_parallelism: Option<usize>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self> {
        let timeout_secs = env::var("API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .clamp(1, 120);
        let fetch_parallelism = env::var("FETCH_PARALLELISM")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0);

        let source = match opt_env("DATA_DIR") {
            Some(dir) => SourceConfig::Dir(PathBuf::from(dir)),
            None => {
                let base_url = opt_env("API_URL")
                    .ok_or_else(|| anyhow!("API_URL is not set (or set DATA_DIR for offline data)"))?;
                let token = opt_env("API_TOKEN").ok_or_else(|| anyhow!("API_TOKEN is not set"))?;
                SourceConfig::Http {
                    base_url: normalize_base_url(&base_url),
                    token: authorization_value(&token),
                }
            }
        };

        Ok(Self {
            source,
            timeout: Duration::from_secs(timeout_secs),
            fetch_parallelism,
        })
    }
}

fn opt_env(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|val| {
        let trimmed = val.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

/// Tokens already carrying a scheme (`Bearer abc`, `Token abc`) are sent as-is.
fn authorization_value(token: &str) -> String {
    let token = token.trim();
    if token.contains(char::is_whitespace) {
        token.to_string()
    } else {
        format!("Bearer {token}")
    }
}
