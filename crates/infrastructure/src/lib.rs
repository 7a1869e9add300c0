//! pipedns Infrastructure Layer
pub mod kv;
pub mod pipe;
