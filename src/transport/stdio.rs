//! Frame reader and writer over the pipe handles.
//!
//! The worker talks to the host over whatever duplex byte stream the host
//! provides; in production that is stdin/stdout used as a raw pipe. Both
//! halves are generic over `AsyncRead`/`AsyncWrite` so tests can drive the
//! loop through `tokio::io::duplex`.
//!
//! # Important
//!
//! - **stdout is the protocol channel**: responses only, never logs
//! - **stderr**: logs and diagnostics (not parsed by the host)
//! - Reads are bounded to [`READ_CHUNK_SIZE`] bytes; only the received
//!   range is appended to the accumulation buffer

use bytes::Bytes;
use std::collections::VecDeque;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::protocol::{FrameBuffer, END_MARKER, READ_CHUNK_SIZE};
use crate::response::Response;

/// Failure modes of [`FrameReader::read_command`].
///
/// `Io` and `Closed` are transport-level: the iteration is skipped and no
/// response is written. `Malformed` must be answered with a fixed failure
/// envelope; the raw accumulated text is preserved for diagnostics.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Low-level read failure on the input handle.
    #[error("pipe read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The input handle reported end-of-stream.
    #[error("pipe closed by host")]
    Closed,

    /// A complete frame arrived but was not valid JSON (or not UTF-8).
    #[error("malformed frame: {detail}")]
    Malformed {
        /// Raw accumulated frame text, lossily decoded.
        raw: String,
        /// Decode error description.
        detail: String,
    },
}

/// Reads framed JSON commands from the input handle.
///
/// Performs bounded reads into a fixed chunk buffer and feeds only the
/// received byte range to a [`FrameBuffer`]; complete frames are parsed as
/// JSON one per [`read_command`](Self::read_command) call. Frames that
/// arrive coalesced are queued and handed out in order.
pub struct FrameReader<R> {
    input: R,
    buffer: FrameBuffer,
    ready: VecDeque<Bytes>,
    chunk: Vec<u8>,
}

impl<R: AsyncRead + Unpin> FrameReader<R> {
    /// Create a reader over the given input handle.
    pub fn new(input: R) -> Self {
        Self {
            input,
            buffer: FrameBuffer::new(),
            ready: VecDeque::new(),
            chunk: vec![0u8; READ_CHUNK_SIZE],
        }
    }

    /// Read until one complete command is available and decode it as JSON.
    ///
    /// Blocks (asynchronously) for as long as the host takes to deliver a
    /// full frame; the host drives pacing.
    pub async fn read_command(&mut self) -> std::result::Result<serde_json::Value, ReadError> {
        loop {
            if let Some(frame) = self.ready.pop_front() {
                return decode_frame(&frame);
            }

            let n = self.input.read(&mut self.chunk).await?;
            if n == 0 {
                return Err(ReadError::Closed);
            }

            self.ready.extend(self.buffer.push(&self.chunk[..n]));
        }
    }
}

/// Decode one complete frame as a JSON value.
fn decode_frame(frame: &Bytes) -> std::result::Result<serde_json::Value, ReadError> {
    let text = std::str::from_utf8(frame).map_err(|e| ReadError::Malformed {
        raw: String::from_utf8_lossy(frame).into_owned(),
        detail: format!("invalid UTF-8: {e}"),
    })?;

    serde_json::from_str(text).map_err(|e| ReadError::Malformed {
        raw: text.to_string(),
        detail: e.to_string(),
    })
}

/// Writes framed JSON responses to the output handle.
pub struct FrameWriter<W> {
    output: W,
}

impl<W: AsyncWrite + Unpin> FrameWriter<W> {
    /// Create a writer over the given output handle.
    pub fn new(output: W) -> Self {
        Self { output }
    }

    /// Serialize a response, append the end marker, and write it out.
    ///
    /// The whole frame goes out in one `write_all` followed by a flush.
    /// Callers treat failures as best-effort: the dispatch loop logs and
    /// continues, it never crashes on a write error.
    pub async fn write_response(&mut self, response: &Response) -> Result<()> {
        let mut bytes = serde_json::to_vec(response)?;
        bytes.extend_from_slice(END_MARKER);

        self.output.write_all(&bytes).await?;
        self.output.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_read_single_command() {
        let (mut host, worker) = duplex(256);
        let mut reader = FrameReader::new(worker);

        host.write_all(b"{\"tool_calls\":[]}<<END>>").await.unwrap();

        let value = reader.read_command().await.unwrap();
        assert_eq!(value, json!({ "tool_calls": [] }));
    }

    #[tokio::test]
    async fn test_read_command_split_across_writes() {
        let (mut host, worker) = duplex(256);
        let mut reader = FrameReader::new(worker);

        let read = tokio::spawn(async move { reader.read_command().await });

        host.write_all(b"{\"tool_calls\"").await.unwrap();
        host.write_all(b":[]}<<EN").await.unwrap();
        host.write_all(b"D>>").await.unwrap();

        let value = read.await.unwrap().unwrap();
        assert_eq!(value, json!({ "tool_calls": [] }));
    }

    #[tokio::test]
    async fn test_coalesced_commands_read_in_order() {
        let (mut host, worker) = duplex(256);
        let mut reader = FrameReader::new(worker);

        host.write_all(b"{\"a\":1}<<END>>{\"a\":2}<<END>>")
            .await
            .unwrap();

        assert_eq!(reader.read_command().await.unwrap(), json!({ "a": 1 }));
        assert_eq!(reader.read_command().await.unwrap(), json!({ "a": 2 }));
    }

    #[tokio::test]
    async fn test_malformed_json_preserves_raw() {
        let (mut host, worker) = duplex(256);
        let mut reader = FrameReader::new(worker);

        host.write_all(b"{not json<<END>>").await.unwrap();

        match reader.read_command().await {
            Err(ReadError::Malformed { raw, .. }) => assert_eq!(raw, "{not json"),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_closed_pipe() {
        let (host, worker) = duplex(256);
        let mut reader = FrameReader::new(worker);
        drop(host);

        assert!(matches!(
            reader.read_command().await,
            Err(ReadError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_write_response_appends_marker() {
        let (worker, mut host) = duplex(256);
        let mut writer = FrameWriter::new(worker);

        writer
            .write_response(&Response::success_message("initialize success."))
            .await
            .unwrap();

        let mut buf = vec![0u8; 256];
        let n = host.read(&mut buf).await.unwrap();
        let text = std::str::from_utf8(&buf[..n]).unwrap();

        assert!(text.ends_with("<<END>>"));
        let json_part = text.trim_end_matches("<<END>>");
        let value: serde_json::Value = serde_json::from_str(json_part).unwrap();
        assert_eq!(value["success"], json!(true));
    }
}
