// src/ui/panel.rs

use crate::sim::resources::{
    AmbienceState, FpsCounter, LifecycleRequests, OverlayVisibility, SimulationConfig,
};
use crate::sim::state::AnimationState;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

/// Das Parameter-Overlay. Slider-Bereiche entsprechen `SimulationConfig::SCHEMA`;
/// Änderungen an Parametern, die die Population betreffen, lösen sofort einen
/// Neustart aus.
pub fn parameter_panel_system(
    mut contexts: EguiContexts,
    mut config: ResMut<SimulationConfig>,
    mut requests: ResMut<LifecycleRequests>,
    overlay: Res<OverlayVisibility>,
    ambience: Res<AmbienceState>,
    fps: Res<FpsCounter>,
    state: Res<State<AnimationState>>,
) {
    if !overlay.visible {
        return;
    }

    egui::Window::new("Metaball Slices")
        .default_width(300.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.label(format!("FPS: {}", fps.fps));
            ui.separator();

            ui.horizontal(|ui| {
                let pause_label = match state.get() {
                    AnimationState::Running => "Pause",
                    AnimationState::Paused => "Play",
                };
                if ui.button(pause_label).clicked() {
                    requests.toggle_pause = true;
                }
                if ui.button("Restart").clicked() {
                    requests.restart = true;
                }
                if ui.button("Randomize").clicked() {
                    requests.randomize_parameters = true;
                }
            });
            ui.horizontal(|ui| {
                if ui.button("Reset Defaults").clicked() {
                    requests.reset_defaults = true;
                }
                if ui.button("Jump to 0").clicked() {
                    requests.jump_to_zero = true;
                }
            });

            egui::CollapsingHeader::new("Animation")
                .default_open(true)
                .show(ui, |ui| {
                    if ui
                        .add(egui::Slider::new(&mut config.num_spheres, 1..=30).text("Spheres"))
                        .changed()
                    {
                        requests.restart = true;
                    }
                    ui.add(egui::Slider::new(&mut config.slices, 5..=60).text("Slices"));
                    ui.add(
                        egui::Slider::new(&mut config.x_rotation, 0.0..=std::f32::consts::TAU)
                            .text("X Rotation"),
                    );
                    ui.add(
                        egui::Slider::new(&mut config.center_force, 0.0001..=0.005)
                            .logarithmic(true)
                            .text("Center Force"),
                    );
                });

            egui::CollapsingHeader::new("Spheres")
                .default_open(false)
                .show(ui, |ui| {
                    let mut needs_restart = false;
                    needs_restart |= ui
                        .add(egui::Slider::new(&mut config.radius_min, 5.0..=50.0).text("Radius Min"))
                        .changed();
                    needs_restart |= ui
                        .add(
                            egui::Slider::new(&mut config.radius_max, 50.0..=200.0)
                                .text("Radius Max"),
                        )
                        .changed();
                    needs_restart |= ui
                        .add(egui::Slider::new(&mut config.speed_min, 0.0..=0.5).text("Speed Min"))
                        .changed();
                    needs_restart |= ui
                        .add(egui::Slider::new(&mut config.speed_max, 0.0..=1.0).text("Speed Max"))
                        .changed();
                    if needs_restart {
                        requests.restart = true;
                    }
                });

            egui::CollapsingHeader::new("Rendering")
                .default_open(false)
                .show(ui, |ui| {
                    ui.add(egui::Slider::new(&mut config.iso_level, 0.1..=1.5).text("Iso Level"));
                    ui.add(egui::Slider::new(&mut config.y_min, -800.0..=0.0).text("Y Min"));
                    ui.add(egui::Slider::new(&mut config.y_max, 0.0..=800.0).text("Y Max"));
                    ui.add(
                        egui::Slider::new(&mut config.render_scale, 0.1..=2.0).text("Render Scale"),
                    );
                    ui.add(
                        egui::Slider::new(&mut config.noise_intensity, 0.0..=1.0)
                            .text("Noise Intensity"),
                    );
                    ui.add(
                        egui::Slider::new(&mut config.fill_opacity, 0.0..=1.0).text("Fill Opacity"),
                    );
                    if ui.button("Randomize Colors").clicked() {
                        requests.randomize_colors = true;
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                if ui.button("Save SVG").clicked() {
                    requests.save_still = true;
                }
                let capture_label = if ambience.capturing {
                    "Stop Capture"
                } else {
                    "Start Capture"
                };
                if ui.button(capture_label).clicked() {
                    requests.toggle_capture = true;
                }
                let music_label = if ambience.music_playing {
                    "Music Off"
                } else {
                    "Music On"
                };
                if ui.button(music_label).clicked() {
                    requests.toggle_music = true;
                }
            });
        });
}
