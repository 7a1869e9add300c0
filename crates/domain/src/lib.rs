//! pipedns Domain Layer
pub mod answer;
pub mod config;
pub mod errors;
pub mod protocol;
pub mod query_type;
pub mod question;
pub mod zone_id;

pub use answer::{fits_in_field, DnsAnswer};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use protocol::AbiVersion;
pub use query_type::QueryType;
pub use question::{Question, QuestionTag};
pub use zone_id::{domain_id, zone_discriminator};
