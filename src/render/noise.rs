// src/render/noise.rs

use bevy::prelude::*;
use rand::Rng;

/// Statisches monochromes Rauschbild in Leinwandgröße. Wird beim Start
/// und bei jedem Neustart neu gewürfelt und pro Frame multiplikativ über
/// das Bild gelegt.
#[derive(Resource, Debug, Clone)]
pub struct NoiseTexture {
    pub width: usize,
    pub height: usize,
    pub gray: Vec<u8>,
}

impl NoiseTexture {
    pub fn generate(width: usize, height: usize, rng: &mut impl Rng) -> Self {
        let gray = (0..width * height).map(|_| rng.random::<u8>()).collect();
        Self {
            width,
            height,
            gray,
        }
    }

    pub fn regenerate(&mut self, rng: &mut impl Rng) {
        for v in &mut self.gray {
            *v = rng.random();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generate_fills_canvas_size() {
        let mut rng = StdRng::seed_from_u64(1);
        let noise = NoiseTexture::generate(64, 64, &mut rng);
        assert_eq!(noise.gray.len(), 64 * 64);
        // Gleichverteiltes Rauschen ist nicht konstant
        let first = noise.gray[0];
        assert!(noise.gray.iter().any(|&v| v != first));
    }

    #[test]
    fn test_regenerate_changes_content() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut noise = NoiseTexture::generate(32, 32, &mut rng);
        let before = noise.gray.clone();
        noise.regenerate(&mut rng);
        assert_ne!(before, noise.gray);
    }
}
