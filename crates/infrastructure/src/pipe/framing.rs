use pipedns_domain::protocol::LINE_TERMINATOR;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// One unit read off the request stream.
#[derive(Debug, PartialEq, Eq)]
pub enum Frame {
    /// A complete line, terminator stripped.
    Line(Vec<u8>),
    /// The line ran past the length limit; its bytes up to the next terminator
    /// have been discarded.
    TooLong,
    /// Bytes left over when the stream ended without a terminator.
    Unterminated(Vec<u8>),
    /// End of input at a line boundary.
    Eof,
}

/// Newline-delimited reader with a hard per-line limit.
pub struct LineReader<R> {
    inner: R,
    max_line_length: usize,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(inner: R, max_line_length: usize) -> Self {
        Self {
            inner,
            max_line_length,
        }
    }

    pub async fn next_frame(&mut self) -> io::Result<Frame> {
        let mut line = Vec::new();
        let mut overflowed = false;

        loop {
            let available = self.inner.fill_buf().await?;
            if available.is_empty() {
                return Ok(match (overflowed, line.is_empty()) {
                    (true, _) => Frame::TooLong,
                    (false, true) => Frame::Eof,
                    (false, false) => Frame::Unterminated(line),
                });
            }

            let (chunk_len, terminated) = match available.iter().position(|b| *b == LINE_TERMINATOR)
            {
                Some(pos) => (pos, true),
                None => (available.len(), false),
            };

            if !overflowed {
                if line.len() + chunk_len > self.max_line_length {
                    overflowed = true;
                    line.clear();
                } else {
                    line.extend_from_slice(&available[..chunk_len]);
                }
            }

            let consumed = if terminated { chunk_len + 1 } else { chunk_len };
            self.inner.consume(consumed);

            if terminated {
                return Ok(if overflowed {
                    Frame::TooLong
                } else {
                    Frame::Line(line)
                });
            }
        }
    }
}
