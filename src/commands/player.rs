//! `get_player_stats` command handler.

use std::sync::Arc;

use crate::api::{ApiError, RivalsApi};
use crate::commands::summarize::summarize_player_stats;
use crate::config::PluginConfig;
use crate::handler::{BoxFuture, CommandHandler, HandlerError, HandlerResult};
use crate::protocol::Invocation;
use crate::response::message_payload;

/// Parameter carrying the player name.
pub const PLAYER_NAME_PARAM: &str = "player_name";

/// Looks up a player by name and answers with a stats summary.
pub struct GetPlayerStats {
    api: Arc<dyn RivalsApi>,
    config: Arc<PluginConfig>,
}

impl GetPlayerStats {
    /// Create the handler with its collaborators injected.
    pub fn new(api: Arc<dyn RivalsApi>, config: Arc<PluginConfig>) -> Self {
        Self { api, config }
    }
}

impl CommandHandler for GetPlayerStats {
    fn call(&self, invocation: Invocation) -> BoxFuture<'static, HandlerResult> {
        let api = Arc::clone(&self.api);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let name = invocation
                .param_str(PLAYER_NAME_PARAM)
                .ok_or(HandlerError::MissingParam(PLAYER_NAME_PARAM))?
                .to_string();
            let api_key = config
                .api_key()
                .ok_or(HandlerError::MissingApiKey)?
                .to_string();

            tracing::info!(player = %name, "fetching player stats");

            let data = api
                .fetch_player(&api_key, &name)
                .await
                .map_err(|err| match err {
                    ApiError::NotFound => {
                        HandlerError::Failed(format!("Player '{name}' was not found."))
                    }
                    other => HandlerError::Api(other),
                })?;

            let summary = summarize_player_stats(&data, &name);
            Ok(message_payload(format!("Summary: {summary}")))
        })
    }
}
