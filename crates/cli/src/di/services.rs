use pipedns_application::ports::KeyValueStore;
use pipedns_application::use_cases::ResolveRecordsUseCase;
use pipedns_domain::{Config, DomainError};
use pipedns_infrastructure::kv::ConsulKeyValueStore;
use pipedns_infrastructure::pipe::{PipeBackend, PipeSettings};
use std::sync::Arc;
use tracing::info;

pub struct Services {
    pub resolver: Arc<ResolveRecordsUseCase>,
    pub backend: PipeBackend,
}

impl Services {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let consul = ConsulKeyValueStore::new(&config.store)?;
        info!(
            address = %config.store.base_url(),
            root = consul.root(),
            "Using Consul key-value store"
        );
        let store: Arc<dyn KeyValueStore> = Arc::new(consul);

        let resolver = Arc::new(ResolveRecordsUseCase::new(
            store,
            config.resolver.default_ttl.as_str(),
        ));

        let settings = PipeSettings::from_config(&config.pipe)?;
        let backend = PipeBackend::new(Arc::clone(&resolver), settings);

        Ok(Self {
            resolver,
            backend,
        })
    }
}
