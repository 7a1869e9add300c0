use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipeConfig {
    /// ABI version the `HELO` line must announce (1-4).
    #[serde(default = "default_abi_version")]
    pub abi_version: u8,

    /// Identity sent back in the `OK` handshake reply.
    #[serde(default = "default_identity")]
    pub identity: String,

    /// Longest accepted request line in bytes, terminator excluded.
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

impl Default for PipeConfig {
    fn default() -> Self {
        Self {
            abi_version: default_abi_version(),
            identity: default_identity(),
            max_line_length: default_max_line_length(),
        }
    }
}

fn default_abi_version() -> u8 {
    4
}

fn default_identity() -> String {
    "pipedns".to_string()
}

fn default_max_line_length() -> usize {
    4096
}
