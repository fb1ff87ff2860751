// src/setup.rs

use crate::render::canvas::Canvas;
use crate::render::compositor::CanvasTarget;
use crate::render::noise::NoiseTexture;
use crate::sim::lifecycle;
use crate::sim::metaball::MetaballSet;
use crate::sim::resources::SimulationConfig;
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

/// Kantenlänge der Leinwand in Pixeln.
pub const CANVAS_SIZE: usize = 800;

/// Baut die Szene auf: Kamera, Leinwand-Sprite, Rauschtextur und die
/// initiale Metaball-Population.
pub fn setup_scene(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut metaballs: ResMut<MetaballSet>,
    mut config: ResMut<SimulationConfig>,
) {
    commands.spawn(Camera2dBundle::default());

    let canvas = Canvas::new(CANVAS_SIZE, CANVAS_SIZE);
    let image = Image::new(
        Extent3d {
            width: CANVAS_SIZE as u32,
            height: CANVAS_SIZE as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        canvas.data().to_vec(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let handle = images.add(image);
    commands.spawn(SpriteBundle {
        texture: handle.clone(),
        ..default()
    });
    commands.insert_resource(CanvasTarget { handle, canvas });

    let mut rng = rand::rng();
    commands.insert_resource(NoiseTexture::generate(CANVAS_SIZE, CANVAS_SIZE, &mut rng));

    let receipt = lifecycle::restart(&mut metaballs, &mut config, None, &mut rng);
    info!("{}", receipt.message);
}
