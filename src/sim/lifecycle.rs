// src/sim/lifecycle.rs

use crate::sim::metaball::MetaballSet;
use crate::sim::resources::{ConfigPatch, SimulationConfig};
use rand::Rng;
use serde::Serialize;

/// Bestätigung eines Neustarts inklusive Schnappschuss der danach
/// wirksamen Konfiguration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestartReceipt {
    pub message: String,
    pub config: SimulationConfig,
}

/// Reinitialisiert die Simulation: optionale Überschreibungen anwenden,
/// Werte auf die dokumentierten Bereiche klemmen, Metaball-Population
/// komplett neu erzeugen. Der Zeitursprung bleibt unberührt.
pub fn restart(
    set: &mut MetaballSet,
    config: &mut SimulationConfig,
    overrides: Option<&ConfigPatch>,
    rng: &mut impl Rng,
) -> RestartReceipt {
    if let Some(patch) = overrides {
        patch.apply_to(config);
    }
    config.clamp_to_schema();
    set.respawn(config, rng);

    RestartReceipt {
        message: format!("Animation restarted with {} metaballs", set.len()),
        config: config.clone(),
    }
}

/// Würfelt alle Parameter neu und startet anschließend neu.
pub fn randomize_parameters(
    set: &mut MetaballSet,
    config: &mut SimulationConfig,
    rng: &mut impl Rng,
) -> RestartReceipt {
    config.randomize(rng);
    restart(set, config, None, rng)
}
