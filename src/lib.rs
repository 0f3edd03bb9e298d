//! # rivals-plugin
//!
//! A Marvel Rivals assistant plugin: a long-lived worker process driven by
//! a controlling host over a duplex byte pipe (stdin/stdout). The host
//! sends framed JSON commands; the worker dispatches them to registered
//! handlers and writes framed JSON responses until `shutdown` arrives.
//!
//! ## Wire contract
//!
//! Every frame, in both directions, is the UTF-8 JSON text of one envelope
//! followed by the literal `<<END>>` marker. Requests carry a `tool_calls`
//! array of `{ "func": ..., "params": ... }` sub-commands; responses are
//! `{ "success": bool, "message"?: string }`.
//!
//! ## Example
//!
//! ```ignore
//! use rivals_plugin::Worker;
//! use rivals_plugin::response::message_payload;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> rivals_plugin::Result<()> {
//!     Worker::builder()
//!         .handle("echo", |invocation| async move {
//!             let text = invocation.param_str("text").unwrap_or("").to_string();
//!             Ok(message_payload(text))
//!         })
//!         .build()
//!         .run(tokio::io::stdin(), tokio::io::stdout())
//!         .await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod handler;
pub mod protocol;
pub mod response;
pub mod transport;

mod worker;

pub use error::{PluginError, Result};
pub use response::Response;
pub use worker::{Worker, WorkerBuilder, MALFORMED_INPUT_MESSAGE};
