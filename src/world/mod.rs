//! World module - level data and scene assembly.

mod builder;
mod data;
mod materials;
mod plugin;

pub use builder::{build_level, BoundingBox, EndMarker, GravitySwitch, Level, LevelGeometry, Platform};
pub use data::{EndMarkerDef, LevelDefinition, SwitchDef, TextureSet, LEVEL_PATH};
pub use materials::{LevelTextures, SwitchMaterials};
pub use plugin::{setup_level, WorldPlugin};
