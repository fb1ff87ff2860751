// src/sim/resources.rs

use crate::math::utils::constants::TAU;
use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Beschreibung eines einzelnen Parameters für die UI:
/// Name, dokumentierter Wertebereich und ob eine Änderung einen
/// vollständigen Neustart (Metaball-Neubesetzung) erfordert.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
    pub requires_restart: bool,
}

/// Flache Abbildung aller Simulations- und Render-Parameter.
/// Wird von der UI jederzeit mutiert und von jeder Kernkomponente pro
/// Frame am Verwendungsort gelesen (kein Snapshotting; ein mitten im
/// Frame geänderter Wert darf einen gemischten Frame erzeugen).
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub num_spheres: usize,
    pub slices: usize,
    pub iso_level: f32,
    pub x_rotation: f32,
    pub center_force: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub render_scale: f32,
    pub noise_intensity: f32,
    pub fill_opacity: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_spheres: 14,
            slices: 30,
            iso_level: 0.5,
            x_rotation: 0.0,
            center_force: 0.0012,
            radius_min: 10.0,
            radius_max: 90.0,
            speed_min: 0.0,
            speed_max: 0.2,
            y_min: -400.0,
            y_max: 400.0,
            render_scale: 0.7,
            noise_intensity: 0.35,
            fill_opacity: 1.0,
        }
    }
}

impl SimulationConfig {
    /// Aufzählbares Parameterschema für die UI, Reihenfolge wie im Struct.
    pub const SCHEMA: [ParamSpec; 14] = [
        ParamSpec {
            name: "num_spheres",
            min: 1.0,
            max: 30.0,
            requires_restart: true,
        },
        ParamSpec {
            name: "slices",
            min: 5.0,
            max: 60.0,
            requires_restart: false,
        },
        ParamSpec {
            name: "iso_level",
            min: 0.1,
            max: 1.5,
            requires_restart: false,
        },
        ParamSpec {
            name: "x_rotation",
            min: 0.0,
            max: TAU as f64,
            requires_restart: false,
        },
        ParamSpec {
            name: "center_force",
            min: 0.0001,
            max: 0.005,
            requires_restart: false,
        },
        ParamSpec {
            name: "radius_min",
            min: 5.0,
            max: 50.0,
            requires_restart: true,
        },
        ParamSpec {
            name: "radius_max",
            min: 50.0,
            max: 200.0,
            requires_restart: true,
        },
        ParamSpec {
            name: "speed_min",
            min: 0.0,
            max: 0.5,
            requires_restart: true,
        },
        ParamSpec {
            name: "speed_max",
            min: 0.0,
            max: 1.0,
            requires_restart: true,
        },
        ParamSpec {
            name: "y_min",
            min: -800.0,
            max: 0.0,
            requires_restart: false,
        },
        ParamSpec {
            name: "y_max",
            min: 0.0,
            max: 800.0,
            requires_restart: false,
        },
        ParamSpec {
            name: "render_scale",
            min: 0.1,
            max: 2.0,
            requires_restart: false,
        },
        ParamSpec {
            name: "noise_intensity",
            min: 0.0,
            max: 1.0,
            requires_restart: false,
        },
        ParamSpec {
            name: "fill_opacity",
            min: 0.0,
            max: 1.0,
            requires_restart: false,
        },
    ];

    /// Klemmt alle Werte auf die dokumentierten Bereiche und stellt die
    /// Ordnungsinvarianten radius_min <= radius_max, speed_min <= speed_max
    /// und y_min <= y_max wieder her. Fehlkonfiguration führt nie zu einem
    /// Fehler, schlimmstenfalls zu einem degenerierten Feld.
    pub fn clamp_to_schema(&mut self) {
        self.num_spheres = self.num_spheres.clamp(1, 30);
        self.slices = self.slices.clamp(5, 60);
        self.iso_level = self.iso_level.clamp(0.1, 1.5);
        self.x_rotation = self.x_rotation.clamp(0.0, TAU);
        self.center_force = self.center_force.clamp(0.0001, 0.005);
        self.radius_min = self.radius_min.clamp(5.0, 50.0);
        self.radius_max = self.radius_max.clamp(50.0, 200.0);
        self.speed_min = self.speed_min.clamp(0.0, 0.5);
        self.speed_max = self.speed_max.clamp(0.0, 1.0);
        self.y_min = self.y_min.clamp(-800.0, 0.0);
        self.y_max = self.y_max.clamp(0.0, 800.0);
        self.render_scale = self.render_scale.clamp(0.1, 2.0);
        self.noise_intensity = self.noise_intensity.clamp(0.0, 1.0);
        self.fill_opacity = self.fill_opacity.clamp(0.0, 1.0);

        self.radius_max = self.radius_max.max(self.radius_min);
        self.speed_max = self.speed_max.max(self.speed_min);
        self.y_max = self.y_max.max(self.y_min);
    }

    /// Würfelt alle Parameter neu innerhalb ihrer dokumentierten Bereiche.
    /// Der Aufrufer löst anschließend einen Neustart aus.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        self.num_spheres = rng.random_range(1..=30);
        self.slices = rng.random_range(5..=60);
        self.iso_level = rng.random_range(0.1..=1.5);
        self.x_rotation = rng.random_range(0.0..TAU);
        self.center_force = rng.random_range(0.0001..=0.005);
        self.radius_min = rng.random_range(5.0..=50.0);
        self.radius_max = rng.random_range(50.0..=200.0);
        self.speed_min = rng.random_range(0.0..=0.5);
        self.speed_max = rng.random_range(0.0..=1.0);
        self.y_min = rng.random_range(-800.0..=0.0);
        self.y_max = rng.random_range(0.0..=800.0);
        self.render_scale = rng.random_range(0.1..=2.0);
        self.noise_intensity = rng.random_range(0.0..=1.0);
        self.fill_opacity = rng.random_range(0.0..=1.0);
        self.clamp_to_schema();
    }
}

/// Partielle Konfigurationsüberschreibung für `restart(overrides)`.
/// Nur gesetzte Felder werden übernommen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub num_spheres: Option<usize>,
    pub slices: Option<usize>,
    pub iso_level: Option<f32>,
    pub x_rotation: Option<f32>,
    pub center_force: Option<f32>,
    pub radius_min: Option<f32>,
    pub radius_max: Option<f32>,
    pub speed_min: Option<f32>,
    pub speed_max: Option<f32>,
    pub y_min: Option<f32>,
    pub y_max: Option<f32>,
    pub render_scale: Option<f32>,
    pub noise_intensity: Option<f32>,
    pub fill_opacity: Option<f32>,
}

impl ConfigPatch {
    pub fn apply_to(&self, config: &mut SimulationConfig) {
        if let Some(v) = self.num_spheres {
            config.num_spheres = v;
        }
        if let Some(v) = self.slices {
            config.slices = v;
        }
        if let Some(v) = self.iso_level {
            config.iso_level = v;
        }
        if let Some(v) = self.x_rotation {
            config.x_rotation = v;
        }
        if let Some(v) = self.center_force {
            config.center_force = v;
        }
        if let Some(v) = self.radius_min {
            config.radius_min = v;
        }
        if let Some(v) = self.radius_max {
            config.radius_max = v;
        }
        if let Some(v) = self.speed_min {
            config.speed_min = v;
        }
        if let Some(v) = self.speed_max {
            config.speed_max = v;
        }
        if let Some(v) = self.y_min {
            config.y_min = v;
        }
        if let Some(v) = self.y_max {
            config.y_max = v;
        }
        if let Some(v) = self.render_scale {
            config.render_scale = v;
        }
        if let Some(v) = self.noise_intensity {
            config.noise_intensity = v;
        }
        if let Some(v) = self.fill_opacity {
            config.fill_opacity = v;
        }
    }
}

/// Von UI und Tastatur gesetzte Lebenszyklus-Anfragen; werden einmal pro
/// Frame vom Handler-System abgearbeitet und zurückgesetzt.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LifecycleRequests {
    pub restart: bool,
    pub toggle_pause: bool,
    pub jump_to_zero: bool,
    pub randomize_parameters: bool,
    pub randomize_colors: bool,
    pub reset_defaults: bool,
    pub save_still: bool,
    pub toggle_capture: bool,
    pub toggle_music: bool,
    pub toggle_overlay: bool,
}

/// Wanduhr der Simulation. `jump_to_zero` verschiebt nur den Ursprung;
/// die Metaball-Population bleibt unberührt.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct SimClock {
    pub origin_ms: f64,
}

impl SimClock {
    /// Millisekunden seit dem (ggf. verschobenen) Zeitursprung.
    pub fn wall_ms(&self, elapsed_ms: f64) -> f64 {
        elapsed_ms - self.origin_ms
    }

    pub fn reset(&mut self, elapsed_ms: f64) {
        self.origin_ms = elapsed_ms;
    }
}

/// FPS-Zähler mit rollierendem 1-Sekunden-Fenster.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FpsCounter {
    pub frame_count: u32,
    pub window_start_ms: f64,
    pub fps: u32,
}

impl FpsCounter {
    pub fn tick(&mut self, now_ms: f64) {
        self.frame_count += 1;
        let elapsed = now_ms - self.window_start_ms;
        if elapsed >= 1000.0 {
            self.fps = ((self.frame_count as f64 * 1000.0) / elapsed).round() as u32;
            self.frame_count = 0;
            self.window_start_ms = now_ms;
        }
    }

    pub fn reset(&mut self, now_ms: f64) {
        self.frame_count = 0;
        self.window_start_ms = now_ms;
    }
}

/// Sichtbarkeit des Parameter-Overlays (Z-Taste).
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct OverlayVisibility {
    pub visible: bool,
}

impl Default for OverlayVisibility {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Zustand der Ambiente-Hooks: Musik-Flag und SVG-Frame-Capture.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct AmbienceState {
    pub music_playing: bool,
    pub capturing: bool,
    pub capture_frame: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Liest einen Parameter namensbasiert als f64, für den Abgleich
    /// zwischen Klemmlogik und Schema.
    fn field_as_f64(config: &SimulationConfig, name: &str) -> f64 {
        match name {
            "num_spheres" => config.num_spheres as f64,
            "slices" => config.slices as f64,
            "iso_level" => config.iso_level as f64,
            "x_rotation" => config.x_rotation as f64,
            "center_force" => config.center_force as f64,
            "radius_min" => config.radius_min as f64,
            "radius_max" => config.radius_max as f64,
            "speed_min" => config.speed_min as f64,
            "speed_max" => config.speed_max as f64,
            "y_min" => config.y_min as f64,
            "y_max" => config.y_max as f64,
            "render_scale" => config.render_scale as f64,
            "noise_intensity" => config.noise_intensity as f64,
            "fill_opacity" => config.fill_opacity as f64,
            other => panic!("unknown parameter {other}"),
        }
    }

    #[test]
    fn test_clamp_matches_schema_ranges() {
        let mut config = SimulationConfig {
            num_spheres: 500,
            slices: 1,
            iso_level: -3.0,
            x_rotation: 100.0,
            center_force: 1.0,
            radius_min: 0.0,
            radius_max: 10_000.0,
            speed_min: -1.0,
            speed_max: 99.0,
            y_min: -9999.0,
            y_max: 9999.0,
            render_scale: 50.0,
            noise_intensity: 2.0,
            fill_opacity: -0.5,
        };
        config.clamp_to_schema();
        for spec in &SimulationConfig::SCHEMA {
            let v = field_as_f64(&config, spec.name);
            assert!(
                v >= spec.min - 1e-6 && v <= spec.max + 1e-6,
                "{} = {v} outside [{}, {}]",
                spec.name,
                spec.min,
                spec.max
            );
        }
    }

    #[test]
    fn test_clamp_restores_ordering_invariants() {
        let mut config = SimulationConfig {
            speed_min: 0.5,
            speed_max: 0.1,
            ..Default::default()
        };
        config.clamp_to_schema();
        assert!(config.speed_min <= config.speed_max);
        assert!(config.radius_min <= config.radius_max);
        assert!(config.y_min <= config.y_max);
    }

    #[test]
    fn test_randomize_stays_in_schema_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut config = SimulationConfig::default();
            config.randomize(&mut rng);
            for spec in &SimulationConfig::SCHEMA {
                let v = field_as_f64(&config, spec.name);
                assert!(v >= spec.min - 1e-6 && v <= spec.max + 1e-6, "{}", spec.name);
            }
            assert!(config.speed_min <= config.speed_max);
        }
    }

    #[test]
    fn test_patch_applies_only_set_fields() {
        let mut config = SimulationConfig::default();
        let patch = ConfigPatch {
            num_spheres: Some(5),
            iso_level: Some(0.8),
            ..Default::default()
        };
        patch.apply_to(&mut config);
        assert_eq!(config.num_spheres, 5);
        assert_eq!(config.iso_level, 0.8);
        assert_eq!(config.slices, 30);
    }

    #[test]
    fn test_restart_required_flags() {
        let restart_params: Vec<&str> = SimulationConfig::SCHEMA
            .iter()
            .filter(|s| s.requires_restart)
            .map(|s| s.name)
            .collect();
        assert_eq!(
            restart_params,
            vec![
                "num_spheres",
                "radius_min",
                "radius_max",
                "speed_min",
                "speed_max"
            ]
        );
    }

    #[test]
    fn test_fps_counter_window() {
        let mut fps = FpsCounter::default();
        for i in 0..60 {
            fps.tick(i as f64 * 16.0);
        }
        // Fenster von 1000 ms überschritten bei Tick 63*16 > 1000? Nein:
        // 60 Ticks enden bei 944 ms, Fenster noch offen.
        assert_eq!(fps.fps, 0);
        fps.tick(1000.0);
        assert!(fps.fps >= 59 && fps.fps <= 62);
        assert_eq!(fps.frame_count, 0);
    }

    #[test]
    fn test_sim_clock_reset() {
        let mut clock = SimClock::default();
        assert_eq!(clock.wall_ms(5000.0), 5000.0);
        clock.reset(5000.0);
        assert_eq!(clock.wall_ms(5000.0), 0.0);
        assert_eq!(clock.wall_ms(6500.0), 1500.0);
    }
}
