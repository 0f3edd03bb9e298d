//! Plugin entry point.
//!
//! Wires the domain commands to the dispatch loop and runs it over the
//! process stdio handles. Logs go to stderr only; stdout belongs to the
//! protocol.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use rivals_plugin::api::{HttpRivalsApi, RivalsApi};
use rivals_plugin::commands::{
    GetCharacterInfo, GetPlayerStats, GET_CHARACTER_INFO_COMMAND, GET_PLAYER_STATS_COMMAND,
};
use rivals_plugin::config::PluginConfig;
use rivals_plugin::Worker;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(PluginConfig::load(&PluginConfig::default_path()));
    if config.api_key().is_none() {
        tracing::warn!("no API key configured; lookup commands will answer with failures");
    }

    let api: Arc<dyn RivalsApi> = match HttpRivalsApi::new() {
        Ok(api) => Arc::new(api),
        Err(err) => {
            tracing::error!(error = %err, "failed to build HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let worker = Worker::builder()
        .register(
            GET_CHARACTER_INFO_COMMAND,
            Box::new(GetCharacterInfo::new(Arc::clone(&api), Arc::clone(&config))),
        )
        .register(
            GET_PLAYER_STATS_COMMAND,
            Box::new(GetPlayerStats::new(api, config)),
        )
        .build();

    tracing::info!("Marvel Rivals plugin started");

    match worker.run(tokio::io::stdin(), tokio::io::stdout()).await {
        Ok(()) => {
            tracing::info!("Marvel Rivals plugin stopped");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "worker loop failed");
            ExitCode::FAILURE
        }
    }
}
