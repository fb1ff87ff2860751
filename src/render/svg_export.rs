// src/render/svg_export.rs

use crate::render::compositor::FrameGeometry;
use bevy::math::Vec2;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write SVG: {0}")]
    Io(#[from] std::io::Error),
}

/// Ein Helfer zum Erstellen einer SVG-Datei aus der Frame-Geometrie.
struct SvgBuilder {
    content: String,
}

impl SvgBuilder {
    fn new(width: usize, height: usize) -> Self {
        let content = format!(
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">
  <rect x="0" y="0" width="{width}" height="{height}" fill="#f0eadc" />
"##,
        );
        Self { content }
    }

    fn draw_polygon(&mut self, vertices: &[Vec2], color: [u8; 3], fill_opacity: f32) {
        if vertices.len() < 3 {
            return;
        }
        let points_str: String = vertices
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        self.content.push_str(&format!(
            "  <polygon points=\"{}\" fill=\"rgb({},{},{})\" fill-opacity=\"{:.3}\" fill-rule=\"evenodd\" />\n",
            points_str, color[0], color[1], color[2], fill_opacity
        ));
    }

    fn draw_segment(&mut self, a: Vec2, b: Vec2, stroke_width: f32) {
        self.content.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"black\" stroke-width=\"{:.2}\" />\n",
            a.x, a.y, b.x, b.y, stroke_width
        ));
    }

    fn save(mut self, filename: &str) -> Result<(), ExportError> {
        self.content.push_str("</svg>\n");
        let mut file = std::fs::File::create(filename)?;
        file.write_all(self.content.as_bytes())?;
        Ok(())
    }
}

/// Schreibt die zuletzt gerenderte Frame-Geometrie als SVG-Standbild.
/// Slices werden in Zeichenreihenfolge (hinten nach vorne) emittiert,
/// damit die Tiefenstaffelung erhalten bleibt.
pub fn export_still(filename: &str, frame: &FrameGeometry) -> Result<(), ExportError> {
    let mut svg = SvgBuilder::new(frame.width.max(1), frame.height.max(1));

    for slice in &frame.slices {
        for (polygon, color) in &slice.polygons {
            svg.draw_polygon(polygon, *color, slice.fill_alpha);
        }
        let stroke_width = slice.stroke_width.max(1.0);
        for (a, b) in &slice.segments {
            svg.draw_segment(*a, *b, stroke_width);
        }
    }

    svg.save(filename)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::compositor::SliceDraw;

    #[test]
    fn test_export_writes_polygons_and_segments() {
        let frame = FrameGeometry {
            width: 100,
            height: 100,
            slices: vec![SliceDraw {
                fill_alpha: 0.8,
                stroke_width: 2.0,
                polygons: vec![(
                    vec![
                        Vec2::new(10.0, 10.0),
                        Vec2::new(50.0, 10.0),
                        Vec2::new(30.0, 40.0),
                    ],
                    [200, 100, 50],
                )],
                segments: vec![(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0))],
            }],
        };

        let dir = std::env::temp_dir().join("metaball_slices_svg_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("still.svg");
        let path_str = path.to_str().unwrap();

        export_still(path_str, &frame).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<polygon"));
        assert!(content.contains("rgb(200,100,50)"));
        assert!(content.contains("<line"));
        assert!(content.contains("</svg>"));
    }
}
