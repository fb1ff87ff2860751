// src/math/algorithms/marching_squares.rs

use crate::math::scalar_field::ScalarField2D;
use crate::math::utils::comparison;
use bevy::math::Vec3;

/// Konturausgabe für einen horizontalen Slice: Umriss-Segmente und
/// füllbare Polygone. Alle Punkte tragen das feste y des Slices,
/// x/z liegen in Weltkoordinaten des Feldes.
#[derive(Debug, Clone, Default)]
pub struct SliceContours {
    pub y: f32,
    pub segments: Vec<(Vec3, Vec3)>,
    pub polygons: Vec<Vec<Vec3>>,
}

impl SliceContours {
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.polygons.is_empty()
    }
}

/// Marching-Squares-Variante, die neben den klassischen Umriss-Segmenten
/// auch Füllpolygone pro Zelle produziert. Vollständig innenliegende
/// Zellen (Case 15) liefern ein Quad ohne Segmente, damit das Innere der
/// Fläche nicht nur als Umriss erscheint.
pub struct MarchingSquares;

impl MarchingSquares {
    /// Extrahiert Segmente und Füllpolygone aus einem Skalarfeld bei `level`.
    ///
    /// Bit-Konvention pro Zelle (a = Zellursprung):
    /// Bit 1: a (x, z), Bit 2: b (x+1, z), Bit 4: c (x, z+1), Bit 8: d (x+1, z+1).
    pub fn extract<F: ScalarField2D + ?Sized>(field: &F, level: f32, y: f32) -> SliceContours {
        let mut out = SliceContours {
            y,
            ..Default::default()
        };
        let width = field.width();
        let height = field.height();
        if width <= 1 || height <= 1 {
            return out;
        }

        let cell_size = field.cell_size();

        for z_idx in 0..height - 1 {
            for x_idx in 0..width - 1 {
                let a = field.get_value(x_idx, z_idx);
                let b = field.get_value(x_idx + 1, z_idx);
                let c = field.get_value(x_idx, z_idx + 1);
                let d = field.get_value(x_idx + 1, z_idx + 1);

                let mut case_index = 0usize;
                if a > level {
                    case_index |= 1;
                }
                if b > level {
                    case_index |= 2;
                }
                if c > level {
                    case_index |= 4;
                }
                if d > level {
                    case_index |= 8;
                }

                if case_index == 0 {
                    continue;
                }

                let origin = field.cell_to_world(x_idx, z_idx);
                let (wx, wz) = (origin.x, origin.y);

                if case_index == 15 {
                    // Zelle liegt komplett innen: Quad als Füllung, kein Umriss.
                    out.polygons.push(vec![
                        Vec3::new(wx, y, wz),
                        Vec3::new(wx + cell_size, y, wz),
                        Vec3::new(wx + cell_size, y, wz + cell_size),
                        Vec3::new(wx, y, wz + cell_size),
                    ]);
                    continue;
                }

                // Schnittpunkte in Kantenreihenfolge: unten, rechts, oben, links.
                let mut points: Vec<Vec3> = Vec::with_capacity(4);

                // Untere Kante (a -- b)
                if (case_index & 3) == 1 || (case_index & 3) == 2 {
                    let t = interpolate_crossing(level, a, b);
                    points.push(Vec3::new(wx + t * cell_size, y, wz));
                }
                // Rechte Kante (b -- d)
                if (case_index & 10) == 2 || (case_index & 10) == 8 {
                    let t = interpolate_crossing(level, b, d);
                    points.push(Vec3::new(wx + cell_size, y, wz + t * cell_size));
                }
                // Obere Kante (c -- d)
                if (case_index & 12) == 4 || (case_index & 12) == 8 {
                    let t = interpolate_crossing(level, c, d);
                    points.push(Vec3::new(wx + t * cell_size, y, wz + cell_size));
                }
                // Linke Kante (a -- c)
                if (case_index & 5) == 1 || (case_index & 5) == 4 {
                    let t = interpolate_crossing(level, a, c);
                    points.push(Vec3::new(wx, y, wz + t * cell_size));
                }

                if points.len() < 2 {
                    continue;
                }

                // Umriss: Schnittpunkte paarweise zu Segmenten verbinden.
                for pair in points.chunks_exact(2) {
                    out.segments.push((pair[0], pair[1]));
                }

                if points.len() >= 3 {
                    out.polygons.push(points);
                } else {
                    // Genau zwei Schnittpunkte: Füllpolygon aus den beiden
                    // Schnittpunkten plus den innenliegenden Ecken in
                    // Sammelreihenfolge. Die Reihenfolge wird bewusst nicht
                    // sortiert; bei Sattelfällen kann das Polygon entarten.
                    let mut polygon = points;
                    if case_index & 1 != 0 {
                        polygon.push(Vec3::new(wx, y, wz));
                    }
                    if case_index & 2 != 0 {
                        polygon.push(Vec3::new(wx + cell_size, y, wz));
                    }
                    if case_index & 4 != 0 {
                        polygon.push(Vec3::new(wx, y, wz + cell_size));
                    }
                    if case_index & 8 != 0 {
                        polygon.push(Vec3::new(wx + cell_size, y, wz + cell_size));
                    }
                    if polygon.len() >= 3 {
                        out.polygons.push(polygon);
                    }
                }
            }
        }

        out
    }

    /// Shoelace-Fläche eines Polygons in der X/Z-Ebene.
    pub fn polygon_area_xz(polygon: &[Vec3]) -> f32 {
        if polygon.len() < 3 {
            return 0.0;
        }
        let mut area = 0.0;
        let n = polygon.len();
        for i in 0..n {
            let p1 = polygon[i];
            let p2 = polygon[(i + 1) % n];
            area += p1.x * p2.z - p2.x * p1.z;
        }
        (area * 0.5).abs()
    }
}

/// Interpolationsparameter t für den Kantenschnitt bei `level`.
/// Gleiche Eckwerte würden auf 0/0 führen; der Schnitt wird dann auf die
/// Kantenmitte gelegt. t wird nicht geklemmt, die Case-Logik stellt den
/// Vorzeichenwechsel sicher.
pub(crate) fn interpolate_crossing(level: f32, v1: f32, v2: f32) -> f32 {
    if comparison::nearly_equal(v1, v2) {
        return 0.5;
    }
    (level - v1) / (v2 - v1)
}
