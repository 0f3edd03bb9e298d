//! Transport module - framed reader/writer over the host-provided handles.

mod stdio;

pub use stdio::{FrameReader, FrameWriter, ReadError};
