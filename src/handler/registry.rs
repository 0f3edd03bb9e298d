//! Command registry mapping command names to handlers.
//!
//! The registry ships with the two lifecycle commands (`initialize`,
//! `shutdown`) pre-registered; the embedding application adds its domain
//! commands on top. Lookups are checked: an unregistered name yields
//! `None`, which the dispatch loop answers with an unknown-command failure
//! envelope.

use std::collections::HashMap;
use std::future::Future;

use super::{CommandHandler, FnHandler, HandlerResult};
use crate::protocol::{INITIALIZE_COMMAND, SHUTDOWN_COMMAND};
use crate::response::message_payload;

/// Registry mapping command names to handlers.
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn CommandHandler>>,
}

impl CommandRegistry {
    /// Create a registry with the built-in lifecycle commands.
    pub fn new() -> Self {
        let mut registry = Self {
            commands: HashMap::new(),
        };

        registry.register_fn(INITIALIZE_COMMAND, |_invocation| async {
            tracing::info!("initializing plugin");
            Ok(message_payload("initialize success."))
        });
        registry.register_fn(SHUTDOWN_COMMAND, |_invocation| async {
            tracing::info!("shutting down plugin");
            Ok(message_payload("shutdown success."))
        });

        registry
    }

    /// Register a boxed handler under the given command name.
    ///
    /// Re-registering a name replaces the previous handler, including the
    /// built-in lifecycle handlers.
    pub fn register(&mut self, name: &str, handler: Box<dyn CommandHandler>) {
        self.commands.insert(name.to_string(), handler);
    }

    /// Register an async closure under the given command name.
    pub fn register_fn<F, Fut>(&mut self, name: &str, handler: F)
    where
        F: Fn(crate::protocol::Invocation) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(name, Box::new(FnHandler::new(handler)));
    }

    /// Look up a handler by command name.
    pub fn get(&self, name: &str) -> Option<&dyn CommandHandler> {
        self.commands.get(name).map(|h| h.as_ref())
    }

    /// Check whether a command name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the registry is empty (never true: lifecycle commands are
    /// always present).
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Invocation;

    #[test]
    fn test_lifecycle_commands_preregistered() {
        let registry = CommandRegistry::new();

        assert!(registry.contains(INITIALIZE_COMMAND));
        assert!(registry.contains(SHUTDOWN_COMMAND));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = CommandRegistry::new();

        registry.register_fn("get_character_info", |_invocation| async {
            Ok(message_payload("ok"))
        });

        assert!(registry.get("get_character_info").is_some());
        assert!(registry.get("nonexistent").is_none());
    }

    #[tokio::test]
    async fn test_builtin_initialize_payload() {
        let registry = CommandRegistry::new();
        let handler = registry.get(INITIALIZE_COMMAND).unwrap();

        let payload = handler.call(Invocation::default()).await.unwrap();
        assert_eq!(payload.get("message").unwrap(), "initialize success.");
    }

    #[tokio::test]
    async fn test_builtin_shutdown_payload() {
        let registry = CommandRegistry::new();
        let handler = registry.get(SHUTDOWN_COMMAND).unwrap();

        let payload = handler.call(Invocation::default()).await.unwrap();
        assert_eq!(payload.get("message").unwrap(), "shutdown success.");
    }
}
