// src/math/mod.rs

pub mod algorithms;
pub mod error;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use algorithms::{MarchingSquares, SliceContours};
pub use error::{MathError, MathResult};
pub use scalar_field::ScalarField2D;
pub use types::Bounds3D;
