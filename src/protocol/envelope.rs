//! Wire envelope types.
//!
//! The host wraps every request in a JSON envelope:
//!
//! ```json
//! {
//!   "tool_calls": [{ "func": "get_character_info", "params": { "character_name": "ironman" } }],
//!   "messages": [...],
//!   "system_info": {...}
//! }
//! ```
//!
//! `messages` and `system_info` are opaque to the loop and forwarded to
//! handlers unchanged. Individual tool calls may spell their parameter map
//! as either `params` or `properties`; both observed host variants are
//! accepted.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Built-in lifecycle command: acknowledge readiness.
pub const INITIALIZE_COMMAND: &str = "initialize";

/// Built-in lifecycle command: answer, then exit the loop.
pub const SHUTDOWN_COMMAND: &str = "shutdown";

/// A decoded host request. One envelope carries an ordered batch of
/// sub-commands, usually exactly one.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandEnvelope {
    /// Ordered sub-commands; processed in array order.
    pub tool_calls: Vec<ToolCall>,
    /// Opaque conversation context, forwarded to handlers.
    #[serde(default)]
    pub messages: Option<Value>,
    /// Opaque host/system information, forwarded to handlers.
    #[serde(default)]
    pub system_info: Option<Value>,
}

/// One sub-command inside an envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    /// Command name. A missing name is a protocol error answered with a
    /// failure envelope, not a decode failure.
    #[serde(default)]
    pub func: Option<String>,
    /// Command parameters (`params` or `properties` on the wire).
    #[serde(default, alias = "properties")]
    pub params: Option<Map<String, Value>>,
}

/// Everything a handler receives for one sub-command.
///
/// Lifecycle commands are invoked with `Invocation::default()` (no
/// arguments); domain commands get the parameter map plus the envelope's
/// opaque context fields.
#[derive(Debug, Clone, Default)]
pub struct Invocation {
    /// Parameters from the tool call, empty if absent.
    pub params: Map<String, Value>,
    /// Opaque `messages` field from the envelope.
    pub messages: Option<Value>,
    /// Opaque `system_info` field from the envelope.
    pub system_info: Option<Value>,
}

impl Invocation {
    /// Look up a string parameter.
    pub fn param_str(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(Value::as_str)
    }
}
