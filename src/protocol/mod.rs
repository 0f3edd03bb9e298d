//! Protocol module - wire framing and envelope types.
//!
//! One frame = the UTF-8 JSON text of one envelope + the `<<END>>` marker,
//! in both directions. See [`framing`] for the accumulation buffer and
//! [`envelope`] for the decoded command shapes.

mod envelope;
mod framing;

pub use envelope::{
    CommandEnvelope, Invocation, ToolCall, INITIALIZE_COMMAND, SHUTDOWN_COMMAND,
};
pub use framing::{FrameBuffer, END_MARKER, READ_CHUNK_SIZE};
