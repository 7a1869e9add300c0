mod key_value_store;

pub use key_value_store::{KeyValueStore, KEY_SEPARATOR};
