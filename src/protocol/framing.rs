//! Frame accumulation for partial reads.
//!
//! The pipe delivers data in arbitrary-sized chunks; a single command may
//! arrive split across several reads, and several commands may arrive
//! coalesced into one. [`FrameBuffer`] accumulates raw bytes in a
//! `bytes::BytesMut` and extracts complete frames as they become available.
//!
//! A frame is the UTF-8 JSON text of one envelope followed by the literal
//! end-of-message marker [`END_MARKER`]. The same convention applies in both
//! directions: the reader strips the marker, the writer appends it.
//!
//! # Example
//!
//! ```
//! use rivals_plugin::protocol::FrameBuffer;
//!
//! let mut buffer = FrameBuffer::new();
//!
//! // Data arrives in chunks from the pipe
//! let frames = buffer.push(b"{\"success\":true}<<END>>");
//! assert_eq!(frames.len(), 1);
//! assert_eq!(&frames[0][..], b"{\"success\":true}");
//! ```

use bytes::{Bytes, BytesMut};

/// End-of-message marker, appended to every frame in both directions.
pub const END_MARKER: &[u8] = b"<<END>>";

/// Size of each bounded read from the input handle.
pub const READ_CHUNK_SIZE: usize = 4096;

/// Buffer for accumulating incoming bytes and extracting complete frames.
///
/// Partial data is retained between pushes; data after a marker is kept
/// for the next frame.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    /// Accumulated bytes from pipe reads.
    buffer: BytesMut,
}

impl FrameBuffer {
    /// Create a new empty frame buffer.
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(READ_CHUNK_SIZE),
        }
    }

    /// Push data into the buffer and extract all complete frames.
    ///
    /// Returns the payload bytes of each complete frame, marker stripped,
    /// in arrival order. May be empty if no marker has arrived yet.
    pub fn push(&mut self, data: &[u8]) -> Vec<Bytes> {
        self.buffer.extend_from_slice(data);

        let mut frames = Vec::new();
        while let Some(pos) = find_marker(&self.buffer) {
            let frame = self.buffer.split_to(pos).freeze();
            // Discard the marker itself.
            let _ = self.buffer.split_to(END_MARKER.len());
            frames.push(frame);
        }

        frames
    }

    /// Number of buffered (incomplete) bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer holds no partial data.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drop any partial data.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

/// Find the byte offset of the first end marker, if present.
fn find_marker(buf: &[u8]) -> Option<usize> {
    if buf.len() < END_MARKER.len() {
        return None;
    }
    buf.windows(END_MARKER.len()).position(|w| w == END_MARKER)
}
