// src/sim/mod.rs

pub mod lifecycle;
pub mod metaball;
pub mod resources;
pub mod sampler;
pub mod state;
pub mod systems;

pub use metaball::{Metaball, MetaballSet};
pub use resources::{
    AmbienceState, FpsCounter, LifecycleRequests, OverlayVisibility, SimClock, SimulationConfig,
};
pub use sampler::SliceField;
pub use state::AnimationState;
