// src/render/mod.rs

pub mod canvas;
pub mod compositor;
pub mod noise;
pub mod projector;
pub mod svg_export;

pub use canvas::Canvas;
pub use compositor::{CanvasTarget, FrameGeometry};
pub use noise::NoiseTexture;
