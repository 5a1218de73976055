//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Player movement
//! and switch interaction only run in `InGame`; the menus own the others.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Loading` to read config and level data
/// - `InGame` while the level is being played
/// - `Paused` freezes gameplay but keeps the world visible
/// - `LevelComplete` once the end marker has been reached
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Game is paused (overlay on gameplay)
    Paused,
    /// The end marker was reached
    LevelComplete,
}
