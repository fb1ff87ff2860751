// src/render/canvas.rs

use bevy::math::Vec2;

/// CPU-seitige Zeichenfläche im RGBA8-Format. Das Pendant zum 2D-Kontext
/// des Originals: Polygone werden per Scanline gefüllt, Segmente mit
/// Distanzabtastung gestrichen, das Rauschen multiplikativ eingeblendet.
/// Der Alphakanal der Fläche bleibt durchgehend opak.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    /// Füllt die gesamte Fläche mit einer deckenden Farbe.
    pub fn clear(&mut self, color: [u8; 3]) {
        for px in self.data.chunks_exact_mut(4) {
            px[0] = color[0];
            px[1] = color[1];
            px[2] = color[2];
            px[3] = 255;
        }
    }

    #[inline]
    fn blend_pixel(&mut self, x: usize, y: usize, color: [u8; 3], alpha: f32) {
        if x >= self.width || y >= self.height || alpha <= 0.0 {
            return;
        }
        let a = alpha.min(1.0);
        let i = (y * self.width + x) * 4;
        for c in 0..3 {
            let base = self.data[i + c] as f32;
            self.data[i + c] = (base + (color[c] as f32 - base) * a).round() as u8;
        }
        self.data[i + 3] = 255;
    }

    /// Füllt ein Polygon per Even-Odd-Scanline mit Alpha-Überblendung.
    /// Selbstschneidende Polygone werden nach der Even-Odd-Regel gefüllt,
    /// genau wie beim 2D-Kontext des Originals.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: [u8; 3], alpha: f32) {
        if points.len() < 3 || alpha <= 0.0 {
            return;
        }

        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let y_start = min_y.floor().max(0.0) as usize;
        let y_end = (max_y.ceil() as isize).min(self.height as isize - 1);
        if y_end < 0 {
            return;
        }

        let mut crossings: Vec<f32> = Vec::with_capacity(points.len());
        for y in y_start..=(y_end as usize) {
            let scan_y = y as f32 + 0.5;
            crossings.clear();

            for i in 0..points.len() {
                let p1 = points[i];
                let p2 = points[(i + 1) % points.len()];
                if (p1.y <= scan_y && p2.y > scan_y) || (p2.y <= scan_y && p1.y > scan_y) {
                    let t = (scan_y - p1.y) / (p2.y - p1.y);
                    crossings.push(p1.x + t * (p2.x - p1.x));
                }
            }

            crossings.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            for span in crossings.chunks_exact(2) {
                let x_start = span[0].round().max(0.0) as usize;
                let x_end = span[1].round().min(self.width as f32) as usize;
                for x in x_start..x_end {
                    self.blend_pixel(x, y, color, alpha);
                }
            }
        }
    }

    /// Zeichnet ein Segment mit gegebener Strichbreite durch Distanz-
    /// abtastung der Bounding Box. Breiten unter einem Pixel werden auf
    /// eine Haarlinie angehoben.
    pub fn stroke_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: [u8; 3]) {
        let half = (width.max(1.0)) * 0.5;
        let pad = half + 1.0;

        let min_x = (a.x.min(b.x) - pad).floor().max(0.0) as usize;
        let max_x = ((a.x.max(b.x) + pad).ceil() as isize).min(self.width as isize - 1);
        let min_y = (a.y.min(b.y) - pad).floor().max(0.0) as usize;
        let max_y = ((a.y.max(b.y) + pad).ceil() as isize).min(self.height as isize - 1);
        if max_x < 0 || max_y < 0 {
            return;
        }

        for y in min_y..=(max_y as usize) {
            for x in min_x..=(max_x as usize) {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let dist = point_segment_distance(p, a, b);
                // Ein halbes Pixel Übergang als Kantenglättung
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                self.blend_pixel(x, y, color, coverage);
            }
        }
    }

    /// Multiplikative Überblendung eines Graustufenbildes mit Intensität
    /// in [0, 1]. Intensität 0 lässt die Fläche unverändert, 1 entspricht
    /// voller Multiplikation.
    pub fn blend_multiply(&mut self, gray: &[u8], intensity: f32) {
        if intensity <= 0.0 || gray.len() < self.width * self.height {
            return;
        }
        let intensity = intensity.min(1.0);
        for (i, px) in self.data.chunks_exact_mut(4).enumerate() {
            let factor = 1.0 - intensity * (1.0 - gray[i] as f32 / 255.0);
            for c in 0..3 {
                px[c] = (px[c] as f32 * factor).round() as u8;
            }
        }
    }
}

fn point_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let length_sq = ab.length_squared();
    if length_sq < 1e-12 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / length_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
