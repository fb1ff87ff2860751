// src/render/projector.rs

use crate::math::utils::constants::PI;
use bevy::math::{Vec2, Vec3};

/// Zeitskala der Rotationsanimation: Wanduhr-Millisekunden * 1e-4.
const TIME_SCALE: f64 = 0.0001;

/// Projiziert einen 3D-Punkt orthografisch auf Leinwandkoordinaten.
///
/// Um die X-Achse wirkt eine zeitveränderliche Rotation
/// `x_rotation + sin(t) * π` auf (y, z); anschließend wird (x, rot_z)
/// skaliert und auf das Leinwandzentrum verschoben. Die Rotation hängt
/// an der Wanduhr, nicht am Frame-Zähler: die Abspielgeschwindigkeit
/// folgt der realen Zeit.
pub fn project(
    point: Vec3,
    wall_ms: f64,
    x_rotation: f32,
    render_scale: f32,
    canvas_center: Vec2,
) -> Vec2 {
    let rotation = x_rotation + ((wall_ms * TIME_SCALE).sin() as f32) * PI;
    let (sin_r, cos_r) = rotation.sin_cos();

    let rot_z = point.y * sin_r + point.z * cos_r;

    Vec2::new(
        canvas_center.x + point.x * render_scale,
        canvas_center.y + rot_z * render_scale,
    )
}
