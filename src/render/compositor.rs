// src/render/compositor.rs

use crate::math::{Bounds3D, MarchingSquares};
use crate::render::canvas::Canvas;
use crate::render::noise::NoiseTexture;
use crate::render::projector::project;
use crate::render::svg_export;
use crate::sim::metaball::MetaballSet;
use crate::sim::resources::{AmbienceState, FpsCounter, SimClock, SimulationConfig};
use crate::sim::sampler::SliceField;
use bevy::prelude::*;

/// Aufloesung des Sampling-Gitters pro Slice.
pub const GRID_SIZE: usize = 90;

/// Hintergrundfarbe der Leinwand (warmes Papierweiss).
pub const BACKGROUND: [u8; 3] = [240, 234, 220];

/// Die CPU-Leinwand und das GPU-Image, in das sie pro Frame kopiert wird.
#[derive(Resource)]
pub struct CanvasTarget {
    pub handle: Handle<Image>,
    pub canvas: Canvas,
}

/// Projizierte Geometrie des zuletzt gerenderten Frames.
/// Wird fuer den SVG-Export vorgehalten.
#[derive(Resource, Debug, Default, Clone)]
pub struct FrameGeometry {
    pub width: usize,
    pub height: usize,
    pub slices: Vec<SliceDraw>,
}

#[derive(Debug, Clone)]
pub struct SliceDraw {
    pub fill_alpha: f32,
    pub stroke_width: f32,
    pub polygons: Vec<(Vec<Vec2>, [u8; 3])>,
    pub segments: Vec<(Vec2, Vec2)>,
}

/// Hoehe des Slice `index` im Weltraum, linear zwischen `y_min` und `y_max`.
pub(crate) fn slice_y(y_min: f32, y_max: f32, index: usize, slices: usize) -> f32 {
    let denom = slices.saturating_sub(1).max(1) as f32;
    y_min + (y_max - y_min) * (index as f32 / denom)
}

/// Tiefenfaktor in [0, 1]: 0 = hinterster Slice, 1 = vorderster.
pub(crate) fn depth_factor(index: usize, slices: usize) -> f32 {
    let denom = slices.saturating_sub(1).max(1) as f32;
    index as f32 / denom
}

/// Rendert einen kompletten Frame: Metaballs bewegen, Slices samplen,
/// Konturen extrahieren, projizieren, komponieren und auf das Sprite kopieren.
#[allow(clippy::too_many_arguments)]
pub fn composite_frame_system(
    time: Res<Time<Real>>,
    config: Res<SimulationConfig>,
    clock: Res<SimClock>,
    mut fps: ResMut<FpsCounter>,
    mut metaballs: ResMut<MetaballSet>,
    noise: Res<NoiseTexture>,
    mut target: ResMut<CanvasTarget>,
    mut frame_geometry: ResMut<FrameGeometry>,
    mut ambience: ResMut<AmbienceState>,
    mut images: ResMut<Assets<Image>>,
) {
    let now_ms = time.elapsed_seconds_f64() * 1000.0;
    fps.tick(now_ms);
    let wall_ms = clock.wall_ms(now_ms);

    // Eingaben ausserhalb der Slider-Bereiche werden vor Benutzung begrenzt.
    let mut config = (*config).clone();
    config.clamp_to_schema();

    let CanvasTarget { handle, canvas } = &mut *target;
    canvas.clear(BACKGROUND);
    metaballs.step(config.center_force);
    let center = canvas.center();

    frame_geometry.width = canvas.width();
    frame_geometry.height = canvas.height();
    frame_geometry.slices.clear();

    // Von hinten nach vorne zeichnen, damit vordere Slices hintere ueberdecken.
    for index in 0..config.slices {
        let y = slice_y(config.y_min, config.y_max, index, config.slices);
        let depth = depth_factor(index, config.slices);

        let field = SliceField::sample(&metaballs, &Bounds3D::SIMULATION, y, GRID_SIZE);
        let contours = MarchingSquares::extract(&field, config.iso_level, y);

        let fill_alpha = config.fill_opacity * (0.6 + 0.4 * depth);
        let stroke_width = depth * 10.0;
        let mut draw = SliceDraw {
            fill_alpha,
            stroke_width,
            polygons: Vec::with_capacity(contours.polygons.len()),
            segments: Vec::with_capacity(contours.segments.len()),
        };

        for polygon in &contours.polygons {
            let inv_n = 1.0 / polygon.len() as f32;
            let cx = polygon.iter().map(|p| p.x).sum::<f32>() * inv_n;
            let cz = polygon.iter().map(|p| p.z).sum::<f32>() * inv_n;
            let Some(ball) = metaballs.dominant_at(Vec3::new(cx, y, cz)) else {
                continue;
            };
            let rgba = ball.color.as_rgba_f32();
            let rgb = [
                (rgba[0] * 255.0).round() as u8,
                (rgba[1] * 255.0).round() as u8,
                (rgba[2] * 255.0).round() as u8,
            ];

            let screen: Vec<Vec2> = polygon
                .iter()
                .map(|p| project(*p, wall_ms, config.x_rotation, config.render_scale, center))
                .collect();
            canvas.fill_polygon(&screen, rgb, fill_alpha);
            draw.polygons.push((screen, rgb));
        }

        for (a, b) in &contours.segments {
            let pa = project(*a, wall_ms, config.x_rotation, config.render_scale, center);
            let pb = project(*b, wall_ms, config.x_rotation, config.render_scale, center);
            canvas.stroke_segment(pa, pb, stroke_width, [0, 0, 0]);
            draw.segments.push((pa, pb));
        }

        frame_geometry.slices.push(draw);
    }

    canvas.blend_multiply(&noise.gray, config.noise_intensity);

    if let Some(image) = images.get_mut(&*handle) {
        image.data.clear();
        image.data.extend_from_slice(canvas.data());
    }

    if ambience.capturing {
        let filename = format!("capture/frame_{:05}.svg", ambience.capture_frame);
        if let Err(err) = svg_export::export_still(&filename, &frame_geometry) {
            warn!("Capture frame failed, stopping capture: {}", err);
            ambience.capturing = false;
        } else {
            ambience.capture_frame += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_slice_layout_spans_y_range() {
        assert_relative_eq!(slice_y(-400.0, 400.0, 0, 30), -400.0);
        assert_relative_eq!(slice_y(-400.0, 400.0, 29, 30), 400.0);
        // Monoton aufsteigend
        let mut previous = f32::NEG_INFINITY;
        for i in 0..30 {
            let y = slice_y(-400.0, 400.0, i, 30);
            assert!(y > previous);
            previous = y;
        }
    }

    #[test]
    fn test_single_slice_does_not_divide_by_zero() {
        let y = slice_y(-400.0, 400.0, 0, 1);
        assert!(y.is_finite());
        assert_relative_eq!(y, -400.0);
        assert_relative_eq!(depth_factor(0, 1), 0.0);
    }

    #[test]
    fn test_depth_factor_drives_opacity_and_stroke() {
        // Hinterster Slice: gedaempfte Fuellung, kein Strich.
        let back = depth_factor(0, 30);
        assert_relative_eq!(1.0 * (0.6 + 0.4 * back), 0.6);
        assert_relative_eq!(back * 10.0, 0.0);
        // Vorderster Slice: volle Fuellung, maximale Strichbreite.
        let front = depth_factor(29, 30);
        assert_relative_eq!(1.0 * (0.6 + 0.4 * front), 1.0);
        assert_relative_eq!(front * 10.0, 10.0);
    }
}
