// src/math/algorithms/mod.rs

pub mod marching_squares;

pub use marching_squares::{MarchingSquares, SliceContours};
