//! Newline-delimited message framing for the stdio transport.
//!
//! ```text
//! {"jsonrpc":"2.0","id":1,"method":"ping"}\n
//! {"jsonrpc":"2.0","id":2,"method":"tools/list"}\n
//! ```
//!
//! A line longer than [`MAX_MESSAGE_SIZE`] is discarded up to its newline and
//! reported as [`ProtocolError::MessageTooLarge`]; the stream stays aligned on
//! the next message.

use serde::{Serialize, de::DeserializeOwned};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::MAX_MESSAGE_SIZE;
use crate::error::{ProtocolError, ProtocolResult};

/// Encodes a message as one JSON line, newline included.
pub fn encode_message<T: Serialize>(message: &T) -> ProtocolResult<Vec<u8>> {
    let mut line = serde_json::to_vec(message)?;

    if line.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: line.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }

    line.push(b'\n');
    Ok(line)
}

/// Decodes one JSON line. A trailing `\n` or `\r\n` is ignored.
pub fn decode_message<T: DeserializeOwned>(line: &[u8]) -> ProtocolResult<T> {
    let line = trim_line_ending(line);

    if line.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge {
            size: line.len(),
            max: MAX_MESSAGE_SIZE,
        });
    }

    if line.iter().all(u8::is_ascii_whitespace) {
        return Err(ProtocolError::EmptyMessage);
    }

    Ok(serde_json::from_slice(line)?)
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Reads newline-delimited lines from an async byte stream.
pub struct LineReader<R> {
    reader: R,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    /// Creates a new LineReader wrapping the given reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Reads the next line without its line ending.
    ///
    /// Returns `Ok(None)` at EOF. A final line without a trailing newline is
    /// still returned.
    pub async fn read_line(&mut self) -> ProtocolResult<Option<Vec<u8>>> {
        let mut line = Vec::new();
        let mut total = 0usize;
        let mut saw_any = false;

        loop {
            let available = self.reader.fill_buf().await?;
            if available.is_empty() {
                if !saw_any {
                    return Ok(None);
                }
                break;
            }
            saw_any = true;

            let (chunk_len, used, done) = match available.iter().position(|b| *b == b'\n') {
                Some(pos) => (pos, pos + 1, true),
                None => (available.len(), available.len(), false),
            };

            total += chunk_len;
            if total <= MAX_MESSAGE_SIZE {
                line.extend_from_slice(&available[..chunk_len]);
            } else if !line.is_empty() {
                line = Vec::new();
            }

            self.reader.consume(used);
            if done {
                break;
            }
        }

        if total > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: total,
                max: MAX_MESSAGE_SIZE,
            });
        }

        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Unwraps this LineReader, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Writes newline-delimited messages to an async byte stream.
pub struct LineWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    /// Creates a new LineWriter wrapping the given writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Writes a single message and flushes it.
    pub async fn write_message<T: Serialize>(&mut self, message: &T) -> ProtocolResult<()> {
        let data = encode_message(message)?;
        self.writer.write_all(&data).await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Returns a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Unwraps this LineWriter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}
