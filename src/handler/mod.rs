//! Handler module - command handling and dispatch.
//!
//! A handler is a pure function of one [`Invocation`] returning a tagged
//! result: `Ok(payload)` becomes a success envelope, `Err(HandlerError)`
//! becomes a failure envelope with the error's display text as `message`.
//! Handlers never write to the pipe themselves and never escape with a
//! panic-style failure; the dispatch boundary converts every `Err`
//! uniformly.
//!
//! # Example
//!
//! ```
//! use rivals_plugin::handler::CommandRegistry;
//! use rivals_plugin::response::message_payload;
//!
//! let mut registry = CommandRegistry::new();
//! registry.register_fn("echo", |invocation| async move {
//!     let text = invocation.param_str("text").unwrap_or("").to_string();
//!     Ok(message_payload(text))
//! });
//!
//! assert!(registry.get("echo").is_some());
//! ```

mod registry;

pub use registry::CommandRegistry;

use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::api::ApiError;
use crate::protocol::Invocation;

/// Boxed future for handler results.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result type for handler functions: success payload or classified error.
pub type HandlerResult = std::result::Result<Map<String, Value>, HandlerError>;

/// Any fault inside a handler, caught at the dispatch boundary.
///
/// The display text doubles as the host-facing failure `message`, so every
/// variant reads as a complete human sentence.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A required parameter was absent from the tool call.
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    /// No API key available from the environment or the config file.
    #[error("Missing API key. Add 'api_key' to config.json next to the executable.")]
    MissingApiKey,

    /// The remote API call failed; the classification carries the message.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Any other handler fault.
    #[error("{0}")]
    Failed(String),
}

/// Trait for command handlers.
pub trait CommandHandler: Send + Sync {
    /// Handle one sub-command invocation.
    fn call(&self, invocation: Invocation) -> BoxFuture<'static, HandlerResult>;
}

/// Adapter turning an async closure into a [`CommandHandler`].
pub struct FnHandler<F> {
    handler: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    /// Wrap an async closure.
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Invocation) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, invocation: Invocation) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self.handler)(invocation))
    }
}
