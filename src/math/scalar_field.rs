// src/math/scalar_field.rs

use bevy::math::Vec2;

/// Trait für ein zweidimensionales Skalarfeld.
/// Ermöglicht es Algorithmen wie Marching Squares, auf verschiedenen
/// Feldimplementierungen zu operieren, ohne deren Speicherlayout zu kennen.
pub trait ScalarField2D {
    /// Anzahl der Samples pro Achse (quadratisches Gitter: width == height).
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Größe einer Zelle in Weltkoordinaten.
    fn cell_size(&self) -> f32;

    /// Weltkoordinate des Gitterursprungs (Sample-Index 0,0).
    /// Default: Ursprung des Koordinatensystems.
    fn origin(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Skalarwert am Sample (x_idx, y_idx). Außerhalb der Grenzen: 0.0.
    fn get_value(&self, x_idx: usize, y_idx: usize) -> f32;

    /// Konvertiert einen Sample-Index in Weltkoordinaten.
    fn cell_to_world(&self, x_idx: usize, y_idx: usize) -> Vec2 {
        self.origin()
            + Vec2::new(
                x_idx as f32 * self.cell_size(),
                y_idx as f32 * self.cell_size(),
            )
    }
}
