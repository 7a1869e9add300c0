//! Consul KV adapter.
//!
//! Reads go to the agent's HTTP API:
//!
//! ```text
//! GET /v1/kv/<root><key>                      -> [{"Key": "...", "Value": "<base64>"}]
//! GET /v1/kv/<root><prefix>?keys&separator=/  -> ["<root><prefix>child", "<root><prefix>dir/"]
//! ```
//!
//! A 404 means "nothing there" for both forms. Every other failure is reported
//! as [`DomainError::StoreUnavailable`] so the caller can fail just the one
//! request that triggered it.

use async_trait::async_trait;
use base64::Engine;
use pipedns_application::ports::{KeyValueStore, KEY_SEPARATOR};
use pipedns_domain::config::StoreConfig;
use pipedns_domain::DomainError;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

const TOKEN_HEADER: &str = "X-Consul-Token";

#[derive(Debug, Deserialize)]
struct KvPair {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Value")]
    value: Option<String>,
}

pub struct ConsulKeyValueStore {
    client: reqwest::Client,
    base_url: Url,
    root: String,
    token: Option<String>,
    datacenter: Option<String>,
}

impl ConsulKeyValueStore {
    pub fn new(config: &StoreConfig) -> Result<Self, DomainError> {
        let base_url = Url::parse(&config.base_url()).map_err(|e| {
            DomainError::ConfigError(format!("Invalid store address {}: {}", config.address, e))
        })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            root: config.key_root(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            datacenter: config.datacenter.clone().filter(|dc| !dc.is_empty()),
        })
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    fn kv_url(&self, key: &str, list_keys: bool) -> Result<Url, DomainError> {
        let full_key = format!("{}{}", self.root, key);
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                DomainError::ConfigError(format!("Store URL {} cannot be a base", self.base_url))
            })?;
            segments.pop_if_empty().extend(["v1", "kv"]);
            segments.extend(full_key.split(KEY_SEPARATOR));
        }

        if list_keys || self.datacenter.is_some() {
            let mut query = url.query_pairs_mut();
            if list_keys {
                query
                    .append_key_only("keys")
                    .append_pair("separator", &KEY_SEPARATOR.to_string());
            }
            if let Some(dc) = &self.datacenter {
                query.append_pair("dc", dc);
            }
        }

        Ok(url)
    }

    /// Body of a KV request, or `None` on 404.
    async fn fetch(&self, key: &str, list_keys: bool) -> Result<Option<Vec<u8>>, DomainError> {
        let url = self.kv_url(key, list_keys)?;
        debug!(url = %url, "Consul KV request");

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.token {
            request = request.header(TOKEN_HEADER, token);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, key, "Consul request failed");
            DomainError::StoreUnavailable(format!("request for {} failed: {}", key, e))
        })?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let body = response.bytes().await.map_err(|e| {
                    DomainError::StoreUnavailable(format!("reading {} failed: {}", key, e))
                })?;
                Ok(Some(body.to_vec()))
            }
            status => {
                warn!(status = status.as_u16(), key, "Consul returned an error status");
                Err(DomainError::StoreUnavailable(format!(
                    "HTTP {} for {}",
                    status.as_u16(),
                    key
                )))
            }
        }
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, DomainError> {
        match self.fetch(prefix, true).await? {
            Some(body) => serde_json::from_slice(&body).map_err(|e| {
                DomainError::InvalidStoreResponse(format!("key listing for {}: {}", prefix, e))
            }),
            None => Ok(vec![]),
        }
    }
}

#[async_trait]
impl KeyValueStore for ConsulKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        let Some(body) = self.fetch(key, false).await? else {
            return Ok(None);
        };

        let pairs: Vec<KvPair> = serde_json::from_slice(&body).map_err(|e| {
            DomainError::InvalidStoreResponse(format!("value for {}: {}", key, e))
        })?;

        let full_key = format!("{}{}", self.root, key);
        match pairs.into_iter().find(|pair| pair.key == full_key) {
            Some(pair) => decode_value(&pair).map(Some),
            None => Ok(None),
        }
    }

    async fn list_children(
        &self,
        prefix: &str,
        separator: char,
    ) -> Result<Vec<String>, DomainError> {
        let keys = self.list_keys(prefix).await?;
        let full_prefix = format!("{}{}", self.root, prefix);
        Ok(child_segments(&keys, &full_prefix, separator))
    }

    async fn exists(&self, prefix: &str) -> Result<bool, DomainError> {
        let keys = self.list_keys(prefix).await?;
        let full_key = format!("{}{}", self.root, prefix);
        Ok(contains_key_or_descendant(&keys, &full_key))
    }
}

fn decode_value(pair: &KvPair) -> Result<Vec<u8>, DomainError> {
    match &pair.value {
        Some(encoded) => base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| {
                DomainError::InvalidStoreResponse(format!("value for {} is not base64: {}", pair.key, e))
            }),
        None => Ok(Vec::new()),
    }
}

/// Strips `full_prefix` and the trailing separator from each listed key,
/// dropping empties and repeats. A key and a "directory" of the same name both
/// come back from a separator listing, so repeats are expected.
fn child_segments(keys: &[String], full_prefix: &str, separator: char) -> Vec<String> {
    let mut children: Vec<String> = Vec::with_capacity(keys.len());
    for key in keys {
        let Some(rest) = key.strip_prefix(full_prefix) else {
            continue;
        };
        let segment = rest.trim_end_matches(separator);
        if segment.is_empty() || segment.contains(separator) {
            continue;
        }
        if !children.iter().any(|existing| existing == segment) {
            children.push(segment.to_string());
        }
    }
    children
}

/// A separator listing of `full_key` also returns siblings that merely share
/// the text prefix (`example.com.au/` for `example.com`).
fn contains_key_or_descendant(keys: &[String], full_key: &str) -> bool {
    keys.iter().any(|key| match key.strip_prefix(full_key) {
        Some(rest) => rest.is_empty() || rest.starts_with(KEY_SEPARATOR),
        None => false,
    })
}
