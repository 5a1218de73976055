//! Level data structures and RON loading.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{read_data_file, DataLoadError};
use crate::player::Gravity;

/// Default location of the level file.
pub const LEVEL_PATH: &str = "assets/data/levels/level1.ron";

/// A gravity switch placement.
#[derive(Debug, Clone, Deserialize)]
pub struct SwitchDef {
    pub position: (f32, f32, f32),
    /// Rotation about the Z axis, in degrees
    #[serde(default)]
    pub rotation_degrees: f32,
    pub gravity: Gravity,
}

/// The end-of-level marker.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndMarkerDef {
    pub position: (f32, f32, f32),
    pub radius: f32,
    pub light_intensity: f32,
    pub light_range: f32,
}

impl Default for EndMarkerDef {
    fn default() -> Self {
        Self {
            position: (100.0, -240.0, 0.0),
            radius: 10.0,
            light_intensity: 4_000_000.0,
            light_range: 50.0,
        }
    }
}

/// Texture asset paths, relative to the asset folder.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextureSet {
    pub platform: String,
    pub switch_crate: String,
    pub switch_arrow: String,
}

impl Default for TextureSet {
    fn default() -> Self {
        Self {
            platform: "textures/ftex.png".to_string(),
            switch_crate: "textures/crate.png".to_string(),
            switch_arrow: "textures/arrow.png".to_string(),
        }
    }
}

/// Global ambient light settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GlobalAmbientDef {
    pub color: (f32, f32, f32),
    pub brightness: f32,
}

impl Default for GlobalAmbientDef {
    fn default() -> Self {
        Self {
            color: (1.0, 1.0, 1.0),
            brightness: 300.0,
        }
    }
}

/// Complete description of a playable level.
///
/// Every field has a default, and the defaults describe the shipped level,
/// so a level file only needs to list what it changes.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelDefinition {
    pub name: String,
    /// Edge length of the cube enclosing the level
    pub bounds_size: f32,
    /// Edge length of each platform cube
    pub platform_size: f32,
    pub platforms: Vec<(f32, f32, f32)>,
    /// Edge length of each switch cube
    pub switch_size: f32,
    pub switches: Vec<SwitchDef>,
    pub end_marker: EndMarkerDef,
    pub player_start: (f32, f32, f32),
    pub start_gravity: Gravity,
    pub textures: TextureSet,
    pub global_ambient: GlobalAmbientDef,
}

impl Default for LevelDefinition {
    fn default() -> Self {
        let switch = |position, rotation_degrees, gravity| SwitchDef {
            position,
            rotation_degrees,
            gravity,
        };

        Self {
            name: "level1".to_string(),
            bounds_size: 500.0,
            platform_size: 100.0,
            platforms: vec![
                (0.0, -200.0, -200.0),
                (0.0, -200.0, 200.0),
                (0.0, -200.0, 0.0),
            ],
            switch_size: 10.0,
            switches: vec![
                switch((110.0, -245.0, -150.0), 0.0, Gravity::Left),
                switch((130.0, 245.0, -150.0), 180.0, Gravity::Right),
                switch((245.0, -245.0, -150.0), 90.0, Gravity::Down),
                switch((170.0, -245.0, -150.0), -90.0, Gravity::Up),
            ],
            end_marker: EndMarkerDef::default(),
            player_start: (0.0, -130.0, 0.0),
            start_gravity: Gravity::Down,
            textures: TextureSet::default(),
            global_ambient: GlobalAmbientDef::default(),
        }
    }
}

impl SwitchDef {
    pub fn translation(&self) -> Vec3 {
        Vec3::from(self.position)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.rotation_degrees.to_radians())
    }
}

impl LevelDefinition {
    /// Parse and validate a level from RON text. `origin` is only used for error messages.
    pub fn from_ron_str(contents: &str, origin: &str) -> Result<Self, DataLoadError> {
        let level: Self = ron::from_str(contents).map_err(|e| DataLoadError::ParseError {
            path: origin.to_string(),
            details: e.to_string(),
        })?;
        level.validate()?;
        Ok(level)
    }

    /// Load a level from a RON file.
    pub fn load_from(path: &str) -> Result<Self, DataLoadError> {
        let contents = read_data_file(path)?;
        Self::from_ron_str(&contents, path)
    }

    /// Load the default level file, falling back to the built-in level.
    pub fn load() -> Self {
        match Self::load_from(LEVEL_PATH) {
            Ok(level) => {
                info!("Loaded level '{}' from {}", level.name, LEVEL_PATH);
                level
            }
            Err(e) if e.is_missing() => {
                warn!("{}. Using built-in level.", e);
                Self::default()
            }
            Err(e) => {
                error!("{}. Using built-in level.", e);
                Self::default()
            }
        }
    }

    /// Half the edge length of the enclosing cube.
    pub fn half_extent(&self) -> f32 {
        self.bounds_size / 2.0
    }

    /// Whether a point lies inside the enclosing cube.
    pub fn contains(&self, point: Vec3) -> bool {
        point.abs().max_element() <= self.half_extent()
    }

    /// Check the level is buildable.
    pub fn validate(&self) -> Result<(), DataLoadError> {
        let invalid = |reason: String| DataLoadError::InvalidLevel {
            level: self.name.clone(),
            reason,
        };

        for (what, size) in [
            ("bounds_size", self.bounds_size),
            ("platform_size", self.platform_size),
            ("switch_size", self.switch_size),
            ("end_marker.radius", self.end_marker.radius),
        ] {
            if !(size.is_finite() && size > 0.0) {
                return Err(invalid(format!("{what} must be positive, got {size}")));
            }
        }

        if !self.contains(Vec3::from(self.player_start)) {
            return Err(invalid(format!(
                "player start {:?} is outside the level bounds",
                self.player_start
            )));
        }

        if !self.contains(Vec3::from(self.end_marker.position)) {
            return Err(invalid(format!(
                "end marker {:?} is outside the level bounds",
                self.end_marker.position
            )));
        }

        if let Some(switch) = self.switches.iter().find(|s| !self.contains(s.translation())) {
            return Err(invalid(format!(
                "switch at {:?} is outside the level bounds",
                switch.position
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_level_layout() {
        let level = LevelDefinition::default();
        assert!(level.validate().is_ok());
        assert_eq!(level.platforms.len(), 3);
        assert_eq!(level.switches.len(), 4);

        let gravities: Vec<Gravity> = level.switches.iter().map(|s| s.gravity).collect();
        assert_eq!(
            gravities,
            vec![Gravity::Left, Gravity::Right, Gravity::Down, Gravity::Up]
        );
        assert_eq!(level.end_marker.radius, 10.0);
    }

    #[test]
    fn test_default_textures_are_shipped() {
        let textures = TextureSet::default();
        for path in [&textures.platform, &textures.switch_crate, &textures.switch_arrow] {
            let file = std::path::Path::new("assets").join(path);
            assert!(file.is_file(), "missing texture {}", file.display());
        }

        let shipped = LevelDefinition::load_from(LEVEL_PATH).expect("shipped level should load");
        assert_eq!(shipped.textures.platform, textures.platform);
        assert_eq!(shipped.textures.switch_crate, textures.switch_crate);
        assert_eq!(shipped.textures.switch_arrow, textures.switch_arrow);
    }

    #[test]
    fn test_switch_rotation_is_about_z() {
        let switch = SwitchDef {
            position: (0.0, 0.0, 0.0),
            rotation_degrees: 90.0,
            gravity: Gravity::Down,
        };
        let rotated = switch.rotation() * Vec3::X;
        assert!(rotated.abs_diff_eq(Vec3::Y, 1e-5));
    }

    #[test]
    fn test_parse_level_file() {
        let ron = r#"(
            name: "test",
            platforms: [(0.0, -200.0, 0.0)],
            switches: [
                (position: (10.0, -245.0, 0.0), rotation_degrees: 180.0, gravity: Right),
                (position: (20.0, -245.0, 0.0), gravity: Up),
            ],
            end_marker: (position: (50.0, -240.0, 0.0)),
            start_gravity: Left,
        )"#;

        let level = LevelDefinition::from_ron_str(ron, "inline").expect("level should parse");
        assert_eq!(level.name, "test");
        assert_eq!(level.platforms.len(), 1);
        assert_eq!(level.switches[0].gravity, Gravity::Right);
        assert_eq!(level.switches[1].rotation_degrees, 0.0);
        assert_eq!(level.start_gravity, Gravity::Left);
        // Unlisted fields keep their defaults
        assert_eq!(level.bounds_size, 500.0);
        assert_eq!(level.end_marker.radius, 10.0);
    }

    #[test]
    fn test_unknown_gravity_is_parse_error() {
        let ron = r#"(switches: [(position: (0.0, 0.0, 0.0), gravity: Sideways)])"#;
        let err = LevelDefinition::from_ron_str(ron, "inline").unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { .. }));
    }

    #[test]
    fn test_switch_outside_bounds_is_rejected() {
        let ron = r#"(switches: [(position: (400.0, 0.0, 0.0), gravity: Up)])"#;
        let err = LevelDefinition::from_ron_str(ron, "inline").unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidLevel { .. }));
    }

    #[test]
    fn test_non_positive_size_is_rejected() {
        let level = LevelDefinition {
            switch_size: 0.0,
            ..default()
        };
        assert!(matches!(level.validate(), Err(DataLoadError::InvalidLevel { .. })));
    }
}
