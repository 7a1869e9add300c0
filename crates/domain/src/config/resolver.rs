use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// TTL echoed on every answer, in seconds. Kept as text because it goes to
    /// the wire verbatim.
    #[serde(default = "default_ttl")]
    pub default_ttl: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_ttl: default_ttl(),
        }
    }
}

fn default_ttl() -> String {
    "1".to_string()
}
