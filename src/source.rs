//! JSON sources feeding ingestion.
//!
//! A source never fails loudly: transport errors, non-2xx statuses, timeouts
//! and malformed bodies are logged and come back as `None`.

use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ApiConfig, SourceConfig};
use crate::http_client::http_client;

pub trait JsonSource: Sync {
    /// Fetches `path` (e.g. `/teams`) and decodes it as JSON.
    fn fetch_json(&self, path: &str) -> Option<Value>;
}

pub fn source_from_config(config: &ApiConfig) -> Result<Box<dyn JsonSource>> {
    match &config.source {
        SourceConfig::Http { base_url, token } => {
            let client = http_client(token, config.timeout)?;
            Ok(Box::new(HttpSource::new(client, base_url.clone())))
        }
        SourceConfig::Dir(dir) => Ok(Box::new(FileSource::new(dir.clone()))),
    }
}

pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }
}

impl JsonSource for HttpSource {
    fn fetch_json(&self, path: &str) -> Option<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let resp = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(err) if err.is_timeout() => {
                warn!(%url, "request timed out");
                return None;
            }
            Err(err) => {
                warn!(%url, error = %err, "request failed");
                return None;
            }
        };
        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "unexpected status");
            return None;
        }
        match resp.json::<Value>() {
            Ok(v) => Some(v),
            Err(err) => {
                warn!(%url, error = %err, "invalid json body");
                None
            }
        }
    }
}

/// Reads `teams.json`, `matches.json` and `players/{id}.json` from a directory.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl JsonSource for FileSource {
    fn fetch_json(&self, path: &str) -> Option<Value> {
        let mut file = self.root.join(path.trim_start_matches('/'));
        file.set_extension("json");
        let raw = match fs::read_to_string(&file) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(path = %file.display(), error = %err, "read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(v) => Some(v),
            Err(err) => {
                warn!(path = %file.display(), error = %err, "invalid json file");
                None
            }
        }
    }
}

/// Fetches a single record; an undecodable body counts as absent.
pub fn fetch_record<T: DeserializeOwned>(
    source: &(impl JsonSource + ?Sized),
    path: &str,
) -> Option<T> {
    let value = source.fetch_json(path)?;
    match serde_json::from_value(value) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!(path, error = %err, "malformed record");
            None
        }
    }
}

/// Fetches a JSON array of records. A non-array body is absent; elements that
/// fail to decode are dropped individually.
pub fn fetch_records<T: DeserializeOwned>(
    source: &(impl JsonSource + ?Sized),
    path: &str,
) -> Option<Vec<T>> {
    let value = source.fetch_json(path)?;
    let Value::Array(items) = value else {
        warn!(path, "expected a json array");
        return None;
    };
    let mut out = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        match serde_json::from_value(item) {
            Ok(record) => out.push(record),
            Err(err) => warn!(path, idx, error = %err, "dropping malformed record"),
        }
    }
    Some(out)
}
