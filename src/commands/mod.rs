//! Domain command handlers.
//!
//! Each handler is constructed with its collaborators (API client and
//! configuration) injected, then registered on the worker under its
//! command name.

mod character;
mod player;
mod summarize;

pub use character::{GetCharacterInfo, CHARACTER_NAME_PARAM};
pub use player::{GetPlayerStats, PLAYER_NAME_PARAM};
pub use summarize::{summarize_character, summarize_player_stats};

/// Command name for the hero lookup.
pub const GET_CHARACTER_INFO_COMMAND: &str = "get_character_info";

/// Command name for the player-stats lookup.
pub const GET_PLAYER_STATS_COMMAND: &str = "get_player_stats";
