//! Materials for level geometry.

use bevy::prelude::*;

/// Texture handles shared by the level's materials.
#[derive(Resource, Default, Clone)]
pub struct LevelTextures {
    pub platform: Handle<Image>,
    pub switch_crate: Handle<Image>,
    pub switch_arrow: Handle<Image>,
}

impl LevelTextures {
    pub fn load(asset_server: &AssetServer, textures: &super::data::TextureSet) -> Self {
        Self {
            platform: asset_server.load(&textures.platform),
            switch_crate: asset_server.load(&textures.switch_crate),
            switch_arrow: asset_server.load(&textures.switch_arrow),
        }
    }
}

/// The two materials of a single switch. Each switch owns its own pair so
/// highlighting one never tints the others.
#[derive(Component, Debug, Clone)]
pub struct SwitchMaterials {
    /// Crate texture, used on five faces
    pub crate_faces: Handle<StandardMaterial>,
    /// Arrow texture on the -Z face
    pub arrow_face: Handle<StandardMaterial>,
}

impl SwitchMaterials {
    pub fn new(
        materials: &mut Assets<StandardMaterial>,
        textures: &LevelTextures,
        color: Color,
    ) -> Self {
        Self {
            crate_faces: materials.add(unlit_textured(textures.switch_crate.clone(), color)),
            arrow_face: materials.add(unlit_textured(textures.switch_arrow.clone(), color)),
        }
    }

    pub fn handles(&self) -> [&Handle<StandardMaterial>; 2] {
        [&self.crate_faces, &self.arrow_face]
    }

    /// Set the tint of both materials. Assets are only touched when the colour changes.
    pub fn paint(&self, materials: &mut Assets<StandardMaterial>, color: Color) {
        for handle in self.handles() {
            let needs_paint = materials.get(handle).is_some_and(|m| m.base_color != color);
            if needs_paint {
                if let Some(material) = materials.get_mut(handle) {
                    material.base_color = color;
                }
            }
        }
    }

    /// Current tint of both materials, if loaded.
    pub fn colors(&self, materials: &Assets<StandardMaterial>) -> [Option<Color>; 2] {
        self.handles().map(|handle| materials.get(handle).map(|m| m.base_color))
    }
}

fn unlit_textured(texture: Handle<Image>, color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color,
        base_color_texture: Some(texture),
        unlit: true,
        ..default()
    }
}

/// Black, shiny, visible from inside.
pub fn bounds_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::BLACK,
        perceptual_roughness: 0.3,
        reflectance: 1.0,
        double_sided: true,
        cull_mode: None,
        ..default()
    })
}

pub fn platform_material(
    materials: &mut Assets<StandardMaterial>,
    textures: &LevelTextures,
) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: Some(textures.platform.clone()),
        perceptual_roughness: 0.3,
        reflectance: 1.0,
        ..default()
    })
}

pub fn end_marker_material(materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    })
}
