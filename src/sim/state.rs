// src/sim/state.rs
use bevy::prelude::*;

/// Lebenszyklus des Animationstreibers. `Paused` entspricht einem
/// abgemeldeten Frame-Callback: das Compositor-System läuft nur in `Running`.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Running,
    Paused,
}
