// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const TAU: f32 = std::f32::consts::TAU;
    pub const PI: f32 = std::f32::consts::PI;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob zwei Floats (nahezu) gleich sind
    pub fn nearly_equal(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f32) -> bool {
        a.abs() < EPSILON
    }

    /// Lineare Interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::comparison::*;

    #[test]
    fn test_nearly_equal_tolerance() {
        assert!(nearly_equal(1.0, 1.0 + 1e-7));
        assert!(!nearly_equal(1.0, 1.001));
        assert!(nearly_zero(-1e-8));
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(-400.0, 400.0, 0.0), -400.0);
        assert_eq!(lerp(-400.0, 400.0, 1.0), 400.0);
        assert_eq!(lerp(-400.0, 400.0, 0.5), 0.0);
    }
}
