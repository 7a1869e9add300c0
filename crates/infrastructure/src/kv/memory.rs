use async_trait::async_trait;
use pipedns_application::ports::{KeyValueStore, KEY_SEPARATOR};
use pipedns_domain::DomainError;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// In-process store with the same listing semantics as the Consul adapter.
///
/// Keys are kept sorted, which is also the order Consul lists them in.
#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
        I: IntoIterator<Item = (K, V)>,
    {
        let store = Self::new();
        for (key, value) in entries {
            store.insert(key, value);
        }
        store
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.write().insert(key.into(), value.into());
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        Ok(self.read().get(key).cloned())
    }

    async fn list_children(
        &self,
        prefix: &str,
        separator: char,
    ) -> Result<Vec<String>, DomainError> {
        let entries = self.read();
        let mut children: Vec<String> = Vec::new();
        for key in entries
            .range(prefix.to_string()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
        {
            let rest = &key[prefix.len()..];
            let segment = rest.split(separator).next().unwrap_or_default();
            if !segment.is_empty() && !children.iter().any(|existing| existing == segment) {
                children.push(segment.to_string());
            }
        }
        Ok(children)
    }

    async fn exists(&self, prefix: &str) -> Result<bool, DomainError> {
        let nested = format!("{}{}", prefix, KEY_SEPARATOR);
        let entries = self.read();
        Ok(entries.contains_key(prefix)
            || entries
                .range(nested.clone()..)
                .next()
                .is_some_and(|(key, _)| key.starts_with(&nested)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> InMemoryKeyValueStore {
        InMemoryKeyValueStore::from_entries([
            ("example.com", ""),
            ("example.com/NS/ns2.example.com", ""),
            ("example.com/NS/ns1.example.com", ""),
            ("example.com/A/www.example.com", "192.0.2.10"),
            ("example.com.au/NS/ns.example.com.au", ""),
            ("other.org/A/www.other.org", "198.51.100.1"),
        ])
    }

    #[tokio::test]
    async fn test_get() {
        let store = seeded();
        assert_eq!(
            store.get("example.com/A/www.example.com").await.unwrap(),
            Some(b"192.0.2.10".to_vec())
        );
        assert_eq!(store.get("example.com/A/missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_children_top_level() {
        let store = seeded();
        let children = store.list_children("", '/').await.unwrap();
        assert_eq!(children, vec!["example.com", "example.com.au", "other.org"]);
    }

    #[tokio::test]
    async fn test_list_children_sorted() {
        let store = seeded();
        let children = store.list_children("example.com/NS/", '/').await.unwrap();
        assert_eq!(children, vec!["ns1.example.com", "ns2.example.com"]);
    }

    #[tokio::test]
    async fn test_exists() {
        let store = seeded();
        assert!(store.exists("example.com").await.unwrap());
        assert!(store.exists("other.org").await.unwrap());
        assert!(!store.exists("example.co").await.unwrap());
        assert!(!store.exists("missing.test").await.unwrap());
    }

    #[tokio::test]
    async fn test_insert_overwrites() {
        let store = InMemoryKeyValueStore::new();
        store.insert("a/b", "c");
        store.insert("a/b", "d");
        assert_eq!(store.get("a/b").await.unwrap(), Some(b"d".to_vec()));
    }
}
