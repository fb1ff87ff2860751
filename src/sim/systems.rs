// src/sim/systems.rs

use crate::render::compositor::FrameGeometry;
use crate::render::noise::NoiseTexture;
use crate::render::svg_export;
use crate::sim::lifecycle;
use crate::sim::metaball::MetaballSet;
use crate::sim::resources::{
    AmbienceState, FpsCounter, LifecycleRequests, OverlayVisibility, SimClock, SimulationConfig,
};
use crate::sim::state::AnimationState;
use bevy::prelude::*;

/// Tastatursteuerung: setzt nur Request-Flags, die Verarbeitung passiert
/// gesammelt in `handle_lifecycle_requests_system`.
pub fn keyboard_input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut requests: ResMut<LifecycleRequests>,
) {
    if keys.just_pressed(KeyCode::Space) {
        requests.toggle_pause = true;
    }
    if keys.just_pressed(KeyCode::Tab) {
        requests.restart = true;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        requests.randomize_parameters = true;
    }
    if keys.just_pressed(KeyCode::KeyS) {
        requests.save_still = true;
    }
    if keys.just_pressed(KeyCode::KeyV) {
        requests.toggle_capture = true;
    }
    if keys.just_pressed(KeyCode::KeyT) {
        requests.jump_to_zero = true;
    }
    if keys.just_pressed(KeyCode::KeyM) {
        requests.toggle_music = true;
    }
    if keys.just_pressed(KeyCode::KeyZ) {
        requests.toggle_overlay = true;
    }
}

/// Verarbeitet alle in diesem Frame angesammelten Lifecycle-Requests.
#[allow(clippy::too_many_arguments)]
pub fn handle_lifecycle_requests_system(
    mut requests: ResMut<LifecycleRequests>,
    mut config: ResMut<SimulationConfig>,
    mut metaballs: ResMut<MetaballSet>,
    mut clock: ResMut<SimClock>,
    mut fps: ResMut<FpsCounter>,
    mut noise: ResMut<NoiseTexture>,
    mut overlay: ResMut<OverlayVisibility>,
    mut ambience: ResMut<AmbienceState>,
    frame_geometry: Res<FrameGeometry>,
    time: Res<Time<Real>>,
    current_state: Res<State<AnimationState>>,
    mut next_state: ResMut<NextState<AnimationState>>,
) {
    let taken = std::mem::take(&mut *requests);
    let now_ms = time.elapsed_seconds_f64() * 1000.0;
    let mut rng = rand::rng();

    if taken.reset_defaults {
        *config = SimulationConfig::default();
    }

    if taken.restart || taken.reset_defaults {
        let receipt = lifecycle::restart(&mut metaballs, &mut config, None, &mut rng);
        noise.regenerate(&mut rng);
        next_state.set(AnimationState::Running);
        info!("{}", receipt.message);
    }

    if taken.randomize_parameters {
        let receipt = lifecycle::randomize_parameters(&mut metaballs, &mut config, &mut rng);
        noise.regenerate(&mut rng);
        next_state.set(AnimationState::Running);
        info!("{}", receipt.message);
    }

    if taken.randomize_colors {
        metaballs.randomize_colors(&mut rng);
    }

    if taken.toggle_pause {
        match current_state.get() {
            AnimationState::Running => next_state.set(AnimationState::Paused),
            AnimationState::Paused => next_state.set(AnimationState::Running),
        }
    }

    if taken.jump_to_zero {
        clock.reset(now_ms);
        fps.reset(now_ms);
        next_state.set(AnimationState::Running);
    }

    if taken.save_still {
        let filename = format!("metaball_still_{}.svg", now_ms as u64);
        match svg_export::export_still(&filename, &frame_geometry) {
            Ok(()) => info!("Saved still frame to {}", filename),
            Err(err) => warn!("Failed to save still frame: {}", err),
        }
    }

    if taken.toggle_capture {
        if ambience.capturing {
            ambience.capturing = false;
            info!("Capture stopped after {} frames", ambience.capture_frame);
        } else {
            match std::fs::create_dir_all("capture") {
                Ok(()) => {
                    ambience.capturing = true;
                    ambience.capture_frame = 0;
                    info!("Capture started, writing frames to capture/");
                }
                Err(err) => warn!("Cannot create capture directory: {}", err),
            }
        }
    }

    if taken.toggle_music {
        ambience.music_playing = !ambience.music_playing;
        if ambience.music_playing {
            info!("Ambient audio enabled");
        } else {
            info!("Ambient audio disabled");
        }
    }

    if taken.toggle_overlay {
        overlay.visible = !overlay.visible;
    }
}
