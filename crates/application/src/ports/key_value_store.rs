use async_trait::async_trait;
use pipedns_domain::DomainError;

pub const KEY_SEPARATOR: char = '/';

/// Read-only view of the record namespace.
///
/// Every key is relative to the namespace root the adapter was built with; the
/// resolver never sees the root itself.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored at exactly `key`, or `None` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;

    /// Immediate child segments under `prefix`, without the prefix or trailing
    /// separator, deduplicated in store order. `""` lists the top level.
    async fn list_children(&self, prefix: &str, separator: char)
        -> Result<Vec<String>, DomainError>;

    /// True when `prefix` itself is a key or has any key beneath it.
    async fn exists(&self, prefix: &str) -> Result<bool, DomainError>;
}
