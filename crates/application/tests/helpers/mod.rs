mod mock_key_value_store;

pub use mock_key_value_store::MockKeyValueStore;
