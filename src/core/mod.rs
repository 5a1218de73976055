//! Core game module - states, events, configuration.
//!
//! This module provides the foundation that all other game systems build upon.

mod config;
mod error;
mod events;
mod plugin;
mod states;

pub use config::{hex_color, insert_game_config, GameConfig, InteractionConfig, CONFIG_PATH};
pub use error::{read_data_file, DataLoadError};
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
