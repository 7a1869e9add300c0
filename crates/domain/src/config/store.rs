use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Consul agent host name or IP. Required.
    #[serde(default)]
    pub address: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_scheme")]
    pub scheme: String,

    /// Environment served by this instance; the last segment of the key root.
    /// Required.
    #[serde(default)]
    pub environment: String,

    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub datacenter: Option<String>,
}

impl StoreConfig {
    /// Key root every lookup is scoped under, always ending in `/`.
    pub fn key_root(&self) -> String {
        let prefix = self.key_prefix.trim_matches('/');
        let environment = self.environment.trim_matches('/');
        if prefix.is_empty() {
            format!("{}/", environment)
        } else {
            format!("{}/{}/", prefix, environment)
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.address, self.port)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            port: default_port(),
            scheme: default_scheme(),
            environment: String::new(),
            key_prefix: default_key_prefix(),
            timeout_secs: default_timeout_secs(),
            token: None,
            datacenter: None,
        }
    }
}

fn default_port() -> u16 {
    8500
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_key_prefix() -> String {
    "services/dns".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}
