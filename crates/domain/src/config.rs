pub mod errors;
pub mod logging;
pub mod pipe;
pub mod resolver;
pub mod root;
pub mod store;

pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use pipe::PipeConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
pub use store::StoreConfig;
