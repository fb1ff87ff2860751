// src/sim/sampler.rs

use crate::math::scalar_field::ScalarField2D;
use crate::math::types::Bounds3D;
use crate::sim::metaball::MetaballSet;
use bevy::math::{Vec2, Vec3};

/// Gittersamples eines horizontalen Slices: Skalarwerte plus paralleles
/// Gitter der dominanten Metaball-Indizes. Ephemer, wird pro Slice und
/// Frame neu erzeugt und nach der Konturextraktion verworfen.
#[derive(Debug, Clone)]
pub struct SliceField {
    values: Vec<f32>,
    dominant: Vec<usize>,
    grid_size: usize,
    y: f32,
    bounds: Bounds3D,
}

impl SliceField {
    /// Tastet das summierte Feld aller Metaballs auf einem quadratischen
    /// Gitter ab. Der Gitterindex (x, z) wird linear in die X/Z-Ausdehnung
    /// der Bounds abgebildet. Reine Funktion des Metaball-Zustands.
    pub fn sample(set: &MetaballSet, bounds: &Bounds3D, y: f32, grid_size: usize) -> Self {
        let mut values = vec![0.0; grid_size * grid_size];
        let mut dominant = vec![0; grid_size * grid_size];

        for z_idx in 0..grid_size {
            let world_z = bounds.grid_to_world_z(z_idx, grid_size);
            for x_idx in 0..grid_size {
                let world_x = bounds.grid_to_world_x(x_idx, grid_size);
                let (value, dominant_index) = set.field_at(Vec3::new(world_x, y, world_z));

                let i = z_idx * grid_size + x_idx;
                values[i] = value;
                dominant[i] = dominant_index;
            }
        }

        Self {
            values,
            dominant,
            grid_size,
            y,
            bounds: *bounds,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn dominant_index(&self, x_idx: usize, z_idx: usize) -> usize {
        if x_idx < self.grid_size && z_idx < self.grid_size {
            self.dominant[z_idx * self.grid_size + x_idx]
        } else {
            0
        }
    }
}

impl ScalarField2D for SliceField {
    fn width(&self) -> usize {
        self.grid_size
    }

    fn height(&self) -> usize {
        self.grid_size
    }

    fn cell_size(&self) -> f32 {
        self.bounds.width_x() / (self.grid_size.saturating_sub(1).max(1)) as f32
    }

    fn origin(&self) -> Vec2 {
        Vec2::new(self.bounds.min.x, self.bounds.min.z)
    }

    fn get_value(&self, x_idx: usize, y_idx: usize) -> f32 {
        if x_idx < self.grid_size && y_idx < self.grid_size {
            self.values[y_idx * self.grid_size + x_idx]
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::MarchingSquares;
    use crate::sim::metaball::{Metaball, MetaballSet};
    use bevy::prelude::Color;

    fn single_ball_set(radius: f32) -> MetaballSet {
        MetaballSet::from_balls(vec![Metaball {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            radius,
            color: Color::WHITE,
        }])
    }

    #[test]
    fn test_sample_peaks_at_ball_center() {
        let set = single_ball_set(50.0);
        let field = SliceField::sample(&set, &Bounds3D::SIMULATION, 0.0, 9);
        // Gitterindex 4 liegt bei Weltkoordinate 0
        let center = field.get_value(4, 4);
        let edge = field.get_value(0, 0);
        assert!(center > edge);
        assert_eq!(center, 2500.0);
    }

    #[test]
    fn test_dominant_grid_follows_nearest_ball() {
        let set = MetaballSet::from_balls(vec![
            Metaball {
                position: Vec3::new(-400.0, 0.0, 0.0),
                velocity: Vec3::ZERO,
                radius: 40.0,
                color: Color::WHITE,
            },
            Metaball {
                position: Vec3::new(400.0, 0.0, 0.0),
                velocity: Vec3::ZERO,
                radius: 40.0,
                color: Color::BLACK,
            },
        ]);
        let field = SliceField::sample(&set, &Bounds3D::SIMULATION, 0.0, 9);
        // x_idx 1 liegt bei -600 (nahe Ball 0), x_idx 7 bei +600 (nahe Ball 1)
        assert_eq!(field.dominant_index(1, 4), 0);
        assert_eq!(field.dominant_index(7, 4), 1);
    }

    #[test]
    fn test_world_mapping_spans_bounds() {
        let set = single_ball_set(10.0);
        let field = SliceField::sample(&set, &Bounds3D::SIMULATION, 0.0, 90);
        assert_eq!(field.origin(), Vec2::new(-800.0, -800.0));
        let world_extent = field.cell_size() * 89.0;
        assert!((world_extent - 1600.0).abs() < 1e-3);
    }

    /// End-to-End-Eigenschaft: ein einzelner Metaball mit Radius 50 bei
    /// Isolevel 0.5 ergibt eine Konturfläche von ~π·(50/√0.5)².
    #[test]
    fn test_single_slice_polygon_area_matches_circle() {
        let set = single_ball_set(50.0);
        let field = SliceField::sample(&set, &Bounds3D::SIMULATION, 0.0, 90);
        let contours = MarchingSquares::extract(&field, 0.5, 0.0);
        assert!(!contours.polygons.is_empty());

        // Die 2-Schnittpunkt-Polygone sind konstruktionsbedingt unsortiert;
        // für die Flächenmessung werden die Ecken winkelsortiert (alle
        // Zellpolygone sind konvexe Regionen, die Sortierung ist daher
        // flächentreu).
        let total: f32 = contours
            .polygons
            .iter()
            .map(|poly| {
                let mut sorted = poly.clone();
                let n = sorted.len() as f32;
                let cx = sorted.iter().map(|p| p.x).sum::<f32>() / n;
                let cz = sorted.iter().map(|p| p.z).sum::<f32>() / n;
                sorted.sort_by(|p, q| {
                    let pa = (p.z - cz).atan2(p.x - cx);
                    let qa = (q.z - cz).atan2(q.x - cx);
                    pa.partial_cmp(&qa).unwrap_or(std::cmp::Ordering::Equal)
                });
                MarchingSquares::polygon_area_xz(&sorted)
            })
            .sum();

        let expected = std::f32::consts::PI * (50.0 / 0.5_f32.sqrt()).powi(2);
        let relative_error = (total - expected).abs() / expected;
        assert!(
            relative_error < 0.10,
            "area {total} vs expected {expected} (error {relative_error})"
        );
    }
}
