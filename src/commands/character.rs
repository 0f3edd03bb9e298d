//! `get_character_info` command handler.

use std::sync::Arc;

use crate::api::{ApiError, RivalsApi};
use crate::commands::summarize::summarize_character;
use crate::config::PluginConfig;
use crate::handler::{BoxFuture, CommandHandler, HandlerError, HandlerResult};
use crate::protocol::Invocation;
use crate::response::message_payload;

/// Parameter carrying the hero slug.
pub const CHARACTER_NAME_PARAM: &str = "character_name";

/// Looks up a hero by name and answers with a spoken-style summary.
pub struct GetCharacterInfo {
    api: Arc<dyn RivalsApi>,
    config: Arc<PluginConfig>,
}

impl GetCharacterInfo {
    /// Create the handler with its collaborators injected.
    pub fn new(api: Arc<dyn RivalsApi>, config: Arc<PluginConfig>) -> Self {
        Self { api, config }
    }
}

impl CommandHandler for GetCharacterInfo {
    fn call(&self, invocation: Invocation) -> BoxFuture<'static, HandlerResult> {
        let api = Arc::clone(&self.api);
        let config = Arc::clone(&self.config);

        Box::pin(async move {
            let name = invocation
                .param_str(CHARACTER_NAME_PARAM)
                .ok_or(HandlerError::MissingParam(CHARACTER_NAME_PARAM))?
                .to_string();
            let api_key = config
                .api_key()
                .ok_or(HandlerError::MissingApiKey)?
                .to_string();

            tracing::info!(character = %name, "fetching character info");

            let data = api.fetch_hero(&api_key, &name).await.map_err(|err| match err {
                ApiError::NotFound => {
                    HandlerError::Failed(format!("Character '{name}' was not found."))
                }
                other => HandlerError::Api(other),
            })?;

            let summary = summarize_character(&data, &name);
            Ok(message_payload(format!("Summary: {summary}")))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map, Value};

    struct StubApi {
        hero: Result<Value, ApiError>,
    }

    impl RivalsApi for StubApi {
        fn fetch_hero(
            &self,
            _api_key: &str,
            _slug: &str,
        ) -> BoxFuture<'static, Result<Value, ApiError>> {
            let result = self.hero.clone();
            Box::pin(async move { result })
        }

        fn fetch_player(
            &self,
            _api_key: &str,
            _name: &str,
        ) -> BoxFuture<'static, Result<Value, ApiError>> {
            Box::pin(async move { Err(ApiError::NotFound) })
        }
    }

    fn handler_with(hero: Result<Value, ApiError>, api_key: Option<&str>) -> GetCharacterInfo {
        GetCharacterInfo::new(
            Arc::new(StubApi { hero }),
            Arc::new(PluginConfig {
                api_key: api_key.map(str::to_string),
            }),
        )
    }

    fn invocation_for(character: &str) -> Invocation {
        let mut params = Map::new();
        params.insert(CHARACTER_NAME_PARAM.into(), json!(character));
        Invocation {
            params,
            ..Invocation::default()
        }
    }

    #[tokio::test]
    async fn test_success_summary_contains_hero_name() {
        let handler = handler_with(Ok(json!({ "name": "Iron Man" })), Some("key"));

        let payload = handler.call(invocation_for("ironman")).await.unwrap();
        let message = payload.get("message").unwrap().as_str().unwrap();

        assert!(message.starts_with("Summary: "));
        assert!(message.contains("Iron Man"));
    }

    #[tokio::test]
    async fn test_missing_param() {
        let handler = handler_with(Ok(json!({})), Some("key"));

        let err = handler.call(Invocation::default()).await.unwrap_err();
        assert!(matches!(err, HandlerError::MissingParam("character_name")));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let handler = handler_with(Ok(json!({})), None);

        let err = handler.call(invocation_for("ironman")).await.unwrap_err();
        assert!(matches!(err, HandlerError::MissingApiKey));
    }

    #[tokio::test]
    async fn test_not_found_names_character() {
        let handler = handler_with(Err(ApiError::NotFound), Some("key"));

        let err = handler.call(invocation_for("nobody")).await.unwrap_err();
        assert_eq!(err.to_string(), "Character 'nobody' was not found.");
    }

    #[tokio::test]
    async fn test_other_api_errors_pass_through() {
        let handler = handler_with(Err(ApiError::RateLimited), Some("key"));

        let err = handler.call(invocation_for("ironman")).await.unwrap_err();
        assert!(err.to_string().contains("Rate limited"));
    }
}
