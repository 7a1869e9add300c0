use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::pipe::PipeConfig;
use super::resolver::ResolverConfig;
use super::store::StoreConfig;
use crate::AbiVersion;

const LOCAL_CONFIG_PATH: &str = "pipedns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/pipedns/config.toml";

/// Main configuration structure for pipedns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Key-value store connection and namespace
    #[serde(default)]
    pub store: StoreConfig,

    /// Record synthesis settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Pipe protocol settings
    #[serde(default)]
    pub pipe: PipeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. pipedns.toml in current directory
    /// 3. /etc/pipedns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(environment) = overrides.environment {
            self.store.environment = environment;
        }
        if let Some(address) = overrides.address {
            self.store.address = address;
        }
        if let Some(port) = overrides.port {
            self.store.port = port;
        }
        if let Some(ttl) = overrides.ttl {
            self.resolver.default_ttl = ttl;
        }
        if let Some(version) = overrides.abi_version {
            self.pipe.abi_version = version;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration. Any failure here is fatal at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.address.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No key-value store address configured".to_string(),
            ));
        }

        if self.store.environment.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "No environment configured".to_string(),
            ));
        }

        if self.store.port == 0 {
            return Err(ConfigError::Validation(
                "Store port cannot be 0".to_string(),
            ));
        }

        self.abi_version()?;

        if self.resolver.default_ttl.parse::<u32>().is_err() {
            return Err(ConfigError::Validation(format!(
                "TTL '{}' is not a number of seconds",
                self.resolver.default_ttl
            )));
        }

        if self.pipe.max_line_length == 0 {
            return Err(ConfigError::Validation(
                "Maximum line length cannot be 0".to_string(),
            ));
        }

        if self.pipe.identity.contains(['\t', '\n']) {
            return Err(ConfigError::Validation(
                "Identity cannot contain tabs or newlines".to_string(),
            ));
        }

        Ok(())
    }

    pub fn abi_version(&self) -> Result<AbiVersion, ConfigError> {
        AbiVersion::new(self.pipe.abi_version)
            .map_err(|e| ConfigError::Validation(e.to_string()))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub environment: Option<String>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub ttl: Option<String>,
    pub abi_version: Option<u8>,
    pub log_level: Option<String>,
}
