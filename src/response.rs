//! Response envelope builder.
//!
//! Every command is answered with a JSON object carrying a boolean
//! `success` flag and an optional payload, typically a `message` string:
//!
//! ```json
//! { "success": true, "message": "Summary: ..." }
//! ```
//!
//! The canonical `success` flag always wins: a `success` key smuggled in
//! through the payload is stripped at construction time.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SUCCESS_KEY: &str = "success";
const MESSAGE_KEY: &str = "message";

/// The worker → host response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub success: bool,
    /// Additional payload keys, merged shallowly into the envelope.
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl Response {
    fn with_flag(success: bool, mut body: Map<String, Value>) -> Self {
        // The builder's flag is canonical.
        body.remove(SUCCESS_KEY);
        Self { success, body }
    }

    /// Build a success envelope with the given payload.
    pub fn success(body: Map<String, Value>) -> Self {
        Self::with_flag(true, body)
    }

    /// Build a failure envelope with the given payload.
    pub fn failure(body: Map<String, Value>) -> Self {
        Self::with_flag(false, body)
    }

    /// Build a success envelope carrying only a `message`.
    pub fn success_message(message: impl Into<String>) -> Self {
        Self::success(message_payload(message))
    }

    /// Build a failure envelope carrying only a `message`.
    pub fn failure_message(message: impl Into<String>) -> Self {
        Self::failure(message_payload(message))
    }

    /// The `message` payload key, if present and a string.
    pub fn message(&self) -> Option<&str> {
        self.body.get(MESSAGE_KEY).and_then(Value::as_str)
    }
}

/// Build a payload map holding a single `message` key.
pub fn message_payload(message: impl Into<String>) -> Map<String, Value> {
    let mut body = Map::new();
    body.insert(MESSAGE_KEY.to_string(), Value::String(message.into()));
    body
}
