//! Gameplay configuration loaded from an external RON file.
//!
//! Allows tweaking reach distances, colours and movement without
//! recompilation.

use bevy::prelude::*;
use serde::Deserialize;

use super::error::{read_data_file, DataLoadError};
use crate::player::PlayerConfig;

/// Default location of the gameplay config.
pub const CONFIG_PATH: &str = "assets/data/config.ron";

/// Top-level config file layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub interaction: InteractionConfig,
}

/// Ray-cast distances and switch colours.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Far distance of the forward ray used to pick a switch
    pub switch_reach: f32,
    /// Far distance of each ray in the end-detection fan
    pub end_reach: f32,
    /// Number of rays in the end-detection fan, spread evenly over a full turn
    pub end_fan_rays: u32,
    /// Switch colour when not targeted (0xRRGGBB)
    pub idle_color: u32,
    /// Switch colour while targeted (0xRRGGBB)
    pub highlight_color: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            switch_reach: 30.0,
            end_reach: 10.0,
            end_fan_rays: 8,
            idle_color: 0xffffff,
            highlight_color: 0xadd8e6,
        }
    }
}

impl InteractionConfig {
    pub fn idle(&self) -> Color {
        hex_color(self.idle_color)
    }

    pub fn highlight(&self) -> Color {
        hex_color(self.highlight_color)
    }
}

/// Convert a 0xRRGGBB value into an sRGB colour.
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

impl GameConfig {
    /// Parse and validate a config from RON text. `origin` is only used for error messages.
    pub fn from_ron_str(contents: &str, origin: &str) -> Result<Self, DataLoadError> {
        let config: Self = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        config.validate(origin)?;
        Ok(config)
    }

    /// Check every distance and speed is usable.
    pub fn validate(&self, origin: &str) -> Result<(), DataLoadError> {
        let invalid = |reason: String| DataLoadError::InvalidConfig {
            path: origin.to_string(),
            reason,
        };

        let interaction = &self.interaction;
        let player = &self.player;
        for (what, value) in [
            ("interaction.switch_reach", interaction.switch_reach),
            ("interaction.end_reach", interaction.end_reach),
            ("player.move_speed", player.move_speed),
            ("player.gravity", player.gravity),
            ("player.reorient_speed", player.reorient_speed),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{what} must be positive, got {value}")));
            }
        }

        // Without rays the end marker can never be reached
        if interaction.end_fan_rays == 0 {
            return Err(invalid("interaction.end_fan_rays must be at least 1".to_string()));
        }

        if !(player.eye_height.is_finite() && player.eye_height >= 0.0) {
            return Err(invalid(format!(
                "player.eye_height must not be negative, got {}",
                player.eye_height
            )));
        }

        Ok(())
    }

    /// Load config from a RON file.
    pub fn load_from(path: &str) -> Result<Self, DataLoadError> {
        let contents = read_data_file(path)?;
        Self::from_ron_str(&contents, path)
    }

    /// Load the default config file, falling back to built-in defaults.
    pub fn load() -> Self {
        match Self::load_from(CONFIG_PATH) {
            Ok(config) => {
                info!("Loaded game config from {}", CONFIG_PATH);
                config
            }
            Err(e) if e.is_missing() => {
                warn!("{}. Using default config.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using default config.", e);
                Self::default()
            }
        }
    }
}

/// Load config and split it into resources.
pub fn insert_game_config(app: &mut App) {
    let config = GameConfig::load();
    app.insert_resource(config.player)
        .insert_resource(config.interaction);
}
