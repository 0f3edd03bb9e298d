//! Worker builder and dispatch loop.
//!
//! The [`WorkerBuilder`] provides a fluent API for registering command
//! handlers; [`Worker::run`] owns the loop:
//! 1. Read one framed command from the input handle
//! 2. Resolve each sub-command against the registry and invoke its handler
//! 3. Write one framed response per sub-command
//! 4. Stop once the last processed command in a batch was `shutdown`
//!
//! The loop is strictly sequential: one command is read, dispatched, and
//! answered to completion before the next read begins. Transport failures
//! are logged and skipped; protocol and handler failures are answered with
//! failure envelopes. Nothing short of dropping the handles at startup is
//! fatal.
//!
//! # Example
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

use std::future::Future;

use tokio::io::{AsyncRead, AsyncWrite};

use crate::error::Result;
use crate::handler::{CommandHandler, CommandRegistry, HandlerResult};
use crate::protocol::{
    CommandEnvelope, Invocation, INITIALIZE_COMMAND, SHUTDOWN_COMMAND,
};
use crate::response::Response;
use crate::transport::{FrameReader, FrameWriter, ReadError};

/// Fixed prefix for host-facing error messages.
const ERROR_PREFIX: &str = "Plugin Error!";

/// Fixed diagnostic message for malformed input (bad JSON, missing
/// `tool_calls`, missing `func`).
pub const MALFORMED_INPUT_MESSAGE: &str = "Plugin Error! Malformed input.";

/// Dispatch loop states. `Stopping` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    Running,
    Stopping,
}

/// Builder for configuring and creating a [`Worker`].
pub struct WorkerBuilder {
    registry: CommandRegistry,
}

impl WorkerBuilder {
    /// Create a new builder; `initialize` and `shutdown` come pre-registered.
    pub fn new() -> Self {
        Self {
            registry: CommandRegistry::new(),
        }
    }

    /// Register an async closure as a command handler.
    pub fn handle<F, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.registry.register_fn(name, handler);
        self
    }

    /// Register a boxed handler.
    pub fn register(mut self, name: &str, handler: Box<dyn CommandHandler>) -> Self {
        self.registry.register(name, handler);
        self
    }

    /// Build the worker.
    pub fn build(self) -> Worker {
        Worker {
            registry: self.registry,
        }
    }
}

impl Default for WorkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The command-dispatch loop.
pub struct Worker {
    registry: CommandRegistry,
}

impl Worker {
    /// Create a new worker builder.
    pub fn builder() -> WorkerBuilder {
        WorkerBuilder::new()
    }

    /// Run the dispatch loop over the given handles until shutdown.
    ///
    /// Returns `Ok(())` when the shutdown command terminates the loop.
    pub async fn run<R, W>(self, input: R, output: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = FrameReader::new(input);
        let mut writer = FrameWriter::new(output);

        // Survives iterations only for the shutdown check.
        let mut current_command = String::new();
        let mut state = LoopState::Running;

        tracing::info!("worker loop started");

        while state == LoopState::Running {
            let value = match reader.read_command().await {
                Ok(value) => value,
                Err(err @ (ReadError::Io(_) | ReadError::Closed)) => {
                    // Best-effort service: host-side reconnection is out of
                    // scope, so the loop stays up even on a broken handle.
                    tracing::error!(error = %err, "error reading command");
                    continue;
                }
                Err(ReadError::Malformed { raw, detail }) => {
                    tracing::error!(raw = %raw, detail = %detail, "failed to decode JSON input");
                    Self::write_best_effort(
                        &mut writer,
                        &Response::failure_message(MALFORMED_INPUT_MESSAGE),
                    )
                    .await;
                    continue;
                }
            };

            tracing::info!(input = %value, "received input");

            let envelope: CommandEnvelope = match serde_json::from_value(value) {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::warn!(error = %err, "malformed input: missing tool_calls property");
                    Self::write_best_effort(
                        &mut writer,
                        &Response::failure_message(MALFORMED_INPUT_MESSAGE),
                    )
                    .await;
                    continue;
                }
            };

            for call in &envelope.tool_calls {
                let response = match &call.func {
                    None => {
                        tracing::warn!("malformed input: missing function property");
                        Response::failure_message(MALFORMED_INPUT_MESSAGE)
                    }
                    Some(name) => {
                        current_command = name.clone();
                        tracing::info!(command = %name, "processing command");
                        self.dispatch(name, call.params.clone(), &envelope).await
                    }
                };

                tracing::info!(success = response.success, "sending response");
                Self::write_best_effort(&mut writer, &response).await;
            }

            // Last-command-wins: only the final named sub-command of the
            // batch decides termination, even if an earlier one was
            // `shutdown`.
            if current_command == SHUTDOWN_COMMAND {
                tracing::info!("shutdown command received, terminating worker");
                state = LoopState::Stopping;
            }
        }

        tracing::info!("worker loop stopped");
        Ok(())
    }

    /// Resolve one sub-command and invoke its handler.
    async fn dispatch(
        &self,
        name: &str,
        params: Option<serde_json::Map<String, serde_json::Value>>,
        envelope: &CommandEnvelope,
    ) -> Response {
        let Some(handler) = self.registry.get(name) else {
            tracing::warn!(command = %name, "unknown command");
            return Response::failure_message(format!("{ERROR_PREFIX} Unknown command: {name}"));
        };

        // Lifecycle commands take no arguments.
        let invocation = if name == INITIALIZE_COMMAND || name == SHUTDOWN_COMMAND {
            Invocation::default()
        } else {
            Invocation {
                params: params.unwrap_or_default(),
                messages: envelope.messages.clone(),
                system_info: envelope.system_info.clone(),
            }
        };

        match handler.call(invocation).await {
            Ok(payload) => Response::success(payload),
            Err(err) => {
                tracing::error!(command = %name, error = %err, "handler failed");
                Response::failure_message(err.to_string())
            }
        }
    }

    /// Write a response, logging and swallowing any failure.
    async fn write_best_effort<W: AsyncWrite + Unpin>(
        writer: &mut FrameWriter<W>,
        response: &Response,
    ) {
        if let Err(err) = writer.write_response(response).await {
            tracing::error!(error = %err, "failed to write response");
        }
    }
}
