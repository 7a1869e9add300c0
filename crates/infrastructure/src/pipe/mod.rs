//! Pipe backend ABI: line framing, response encoding and the session loop.
pub mod codec;
pub mod framing;
pub mod session;

pub use framing::{Frame, LineReader};
pub use session::{PipeBackend, PipeSettings, SessionSummary};
