mod consul_stub;

pub use consul_stub::ConsulStub;
