// src/main.rs

use bevy::prelude::*;
use bevy::window::WindowResolution;
use bevy_egui::EguiPlugin;

pub mod math;
pub mod render;
pub mod setup;
pub mod sim;
pub mod ui;

use render::compositor::{composite_frame_system, FrameGeometry};
use setup::setup_scene;
use sim::metaball::MetaballSet;
use sim::resources::{
    AmbienceState, FpsCounter, LifecycleRequests, OverlayVisibility, SimClock, SimulationConfig,
};
use sim::state::AnimationState;
use sim::systems::{handle_lifecycle_requests_system, keyboard_input_system};
use ui::panel::parameter_panel_system;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Metaball Slices".to_string(),
                resolution: WindowResolution::new(800.0, 800.0),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin)
        .init_resource::<SimulationConfig>()
        .init_resource::<MetaballSet>()
        .init_resource::<LifecycleRequests>()
        .init_resource::<SimClock>()
        .init_resource::<FpsCounter>()
        .init_resource::<OverlayVisibility>()
        .init_resource::<AmbienceState>()
        .init_resource::<FrameGeometry>()
        .init_state::<AnimationState>()
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                parameter_panel_system,
                keyboard_input_system,
                handle_lifecycle_requests_system,
                composite_frame_system.run_if(in_state(AnimationState::Running)),
            )
                .chain(),
        )
        .run();
}
