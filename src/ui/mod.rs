//! UI module - HUD and menus.

mod hud;
mod plugin;

pub use hud::{prompt_text, HudRoot, SwitchPrompt};
pub use plugin::UiPlugin;
