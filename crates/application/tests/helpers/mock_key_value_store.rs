#![allow(dead_code)]

use async_trait::async_trait;
use pipedns_application::ports::KeyValueStore;
use pipedns_domain::DomainError;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

/// Ordered key list with Consul-like listing semantics.
#[derive(Clone, Default)]
pub struct MockKeyValueStore {
    entries: Arc<RwLock<Vec<(String, Vec<u8>)>>>,
    should_fail: Arc<AtomicBool>,
    calls: Arc<AtomicUsize>,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&self, key: &str, value: &str) {
        self.put_bytes(key, value.as_bytes().to_vec());
    }

    pub fn put_bytes(&self, key: &str, value: Vec<u8>) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|(existing, _)| existing != key);
        entries.push((key.to_string(), value));
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::StoreUnavailable(
                "mock store unreachable".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MockKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        self.check()?;
        let entries = self.entries.read().unwrap();
        Ok(entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value.clone()))
    }

    async fn list_children(
        &self,
        prefix: &str,
        separator: char,
    ) -> Result<Vec<String>, DomainError> {
        self.check()?;
        let entries = self.entries.read().unwrap();
        let mut children: Vec<String> = Vec::new();
        for (key, _) in entries.iter() {
            let Some(rest) = key.strip_prefix(prefix) else {
                continue;
            };
            let segment = rest.split(separator).next().unwrap_or_default();
            if !segment.is_empty() && !children.iter().any(|c| c == segment) {
                children.push(segment.to_string());
            }
        }
        Ok(children)
    }

    async fn exists(&self, prefix: &str) -> Result<bool, DomainError> {
        self.check()?;
        let nested = format!("{}/", prefix);
        let entries = self.entries.read().unwrap();
        Ok(entries
            .iter()
            .any(|(key, _)| key == prefix || key.starts_with(&nested)))
    }
}
