// src/math/types.rs

use crate::math::error::*;
use bevy::math::Vec3;

/// Achsenparalleler Quader, der das Simulationsvolumen begrenzt.
/// Die Gitterabbildung des Samplers und die Slice-Höhen beziehen sich
/// auf diese Grenzen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3D {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds3D {
    /// Das prozessweite Simulationsvolumen: ±800 auf allen Achsen.
    pub const SIMULATION: Self = Self {
        min: Vec3::new(-800.0, -800.0, -800.0),
        max: Vec3::new(800.0, 800.0, 800.0),
    };

    /// Erstellt einen neuen Quader, validiert min <= max pro Achse.
    pub fn new(min: Vec3, max: Vec3) -> MathResult<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(MathError::InvalidConfiguration {
                message: format!("Invalid bounds: min {:?} > max {:?}", min, max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn width_x(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn width_z(&self) -> f32 {
        self.max.z - self.min.z
    }

    /// Bildet einen Gitterindex linear in die X-Ausdehnung ab.
    /// `grid_size` ist die Anzahl der Samples pro Achse (>= 2).
    pub fn grid_to_world_x(&self, x_idx: usize, grid_size: usize) -> f32 {
        self.min.x + x_idx as f32 / (grid_size.saturating_sub(1).max(1)) as f32 * self.width_x()
    }

    /// Bildet einen Gitterindex linear in die Z-Ausdehnung ab.
    pub fn grid_to_world_z(&self, z_idx: usize, grid_size: usize) -> f32 {
        self.min.z + z_idx as f32 / (grid_size.saturating_sub(1).max(1)) as f32 * self.width_z()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bounds_rejected() {
        let result = Bounds3D::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 1.0, 1.0));
        assert!(result.is_err());
    }

    #[test]
    fn test_grid_mapping_endpoints() {
        let b = Bounds3D::SIMULATION;
        assert_eq!(b.grid_to_world_x(0, 90), -800.0);
        assert_eq!(b.grid_to_world_x(89, 90), 800.0);
        assert_eq!(b.grid_to_world_z(0, 90), -800.0);
        assert_eq!(b.grid_to_world_z(89, 90), 800.0);
    }
}
