pub mod consul;
pub mod memory;

pub use consul::ConsulKeyValueStore;
pub use memory::InMemoryKeyValueStore;
