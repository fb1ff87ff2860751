// src/sim/metaball.rs

use crate::sim::resources::SimulationConfig;
use crate::math::utils::constants::TAU;
use bevy::prelude::*;
use rand::Rng;

/// Radius, ab dem die Zentripetalkraft auf ausbrechende Metaballs wirkt.
const CENTERING_RADIUS: f32 = 400.0;

/// Ein einzelner kugelförmiger Einflusspunkt: Kinematik plus Farbidentität.
#[derive(Debug, Clone)]
pub struct Metaball {
    pub position: Vec3,
    pub velocity: Vec3,
    pub radius: f32,
    pub color: Color,
}

impl Metaball {
    /// Erzeugt einen Metaball mit zufälliger Position in der XZ-Ebene,
    /// zufälligem Radius, zufälliger Bewegungsrichtung und Pastellfarbe.
    fn spawn(config: &SimulationConfig, rng: &mut impl Rng) -> Self {
        let position = Vec3::new(
            rng.random_range(-CENTERING_RADIUS..=CENTERING_RADIUS),
            0.0,
            rng.random_range(-CENTERING_RADIUS..=CENTERING_RADIUS),
        );

        let radius = rng.random_range(config.radius_min..=config.radius_max);

        let angle = rng.random_range(0.0..TAU);
        let speed = rng.random_range(config.speed_min..=config.speed_max);
        let velocity = Vec3::new(
            angle.cos() * speed,
            rng.random_range(-1.0..=1.0) * speed,
            angle.sin() * speed,
        );

        Self {
            position,
            velocity,
            radius,
            color: pastel_color(rng),
        }
    }

    /// Euler-Schritt plus Zentripetalkorrektur jenseits des Zentrierradius.
    /// Keine Kollisionen, keine Interaktion zwischen Metaballs.
    fn integrate(&mut self, center_force: f32) {
        self.position += self.velocity;

        let distance = self.position.length();
        if distance > CENTERING_RADIUS {
            let strength = center_force * (1.0 + (distance - CENTERING_RADIUS) * 0.01);
            self.velocity -= self.position * strength;
        }
    }

    /// Skalarer Feldbeitrag an einem Punkt: radius² / max(dist², 1).
    /// Die Klemmung auf >= 1 verhindert die Singularität am Zentrum.
    pub fn field_value_at(&self, point: Vec3) -> f32 {
        let dist_squared = self.position.distance_squared(point).max(1.0);
        self.radius * self.radius / dist_squared
    }
}

/// Die exklusiv besessene Sammlung aller Metaballs. Wird beim (Neu-)Start
/// als Batch erzeugt und bei jedem Frame-Schritt mutiert.
#[derive(Resource, Debug, Clone, Default)]
pub struct MetaballSet {
    balls: Vec<Metaball>,
}

impl MetaballSet {
    /// Verwirft alle Metaballs und erzeugt `config.num_spheres` neue.
    pub fn respawn(&mut self, config: &SimulationConfig, rng: &mut impl Rng) {
        self.balls.clear();
        self.balls
            .extend((0..config.num_spheres).map(|_| Metaball::spawn(config, rng)));
    }

    /// Ein Frame-Schritt für alle Metaballs.
    pub fn step(&mut self, center_force: f32) {
        for ball in &mut self.balls {
            ball.integrate(center_force);
        }
    }

    /// Summiertes Feld am Punkt plus Index des dominanten Beitrags.
    /// Bei Gleichstand gewinnt der zuerst gefundene Beitrag.
    pub fn field_at(&self, point: Vec3) -> (f32, usize) {
        let mut value = 0.0;
        let mut dominant_index = 0;
        let mut max_contribution = 0.0;

        for (i, ball) in self.balls.iter().enumerate() {
            let contribution = ball.field_value_at(point);
            value += contribution;
            if contribution > max_contribution {
                max_contribution = contribution;
                dominant_index = i;
            }
        }

        (value, dominant_index)
    }

    /// Dominanter Metaball an einem Punkt, durch Neuauswertung gegen alle
    /// Metaballs bestimmt (nicht über das Sampler-Gitter).
    pub fn dominant_at(&self, point: Vec3) -> Option<&Metaball> {
        if self.balls.is_empty() {
            return None;
        }
        let (_, index) = self.field_at(point);
        self.balls.get(index)
    }

    /// Würfelt nur die Farben neu, Kinematik bleibt erhalten.
    pub fn randomize_colors(&mut self, rng: &mut impl Rng) {
        for ball in &mut self.balls {
            ball.color = pastel_color(rng);
        }
    }

    pub fn len(&self) -> usize {
        self.balls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metaball> {
        self.balls.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Metaball> {
        self.balls.get(index)
    }

    #[cfg(test)]
    pub fn from_balls(balls: Vec<Metaball>) -> Self {
        Self { balls }
    }
}

/// Pastellfarbe: Farbton gleichverteilt, Sättigung und Helligkeit
/// jeweils in [0.4, 1.0].
pub fn pastel_color(rng: &mut impl Rng) -> Color {
    let hue = rng.random_range(0.0..360.0);
    let saturation = rng.random_range(0.4..=1.0);
    let lightness = rng.random_range(0.4..=1.0);
    Color::hsl(hue, saturation, lightness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_ball(position: Vec3, radius: f32) -> Metaball {
        Metaball {
            position,
            velocity: Vec3::ZERO,
            radius,
            color: Color::WHITE,
        }
    }

    #[test]
    fn test_respawn_radii_within_bounds() {
        let config = SimulationConfig {
            radius_min: 20.0,
            radius_max: 45.0,
            num_spheres: 25,
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(7);
        let mut set = MetaballSet::default();
        set.respawn(&config, &mut rng);

        assert_eq!(set.len(), 25);
        for ball in set.iter() {
            assert!(ball.radius >= 20.0 && ball.radius <= 45.0);
            assert_eq!(ball.position.y, 0.0);
            let speed = ball.velocity.length();
            // vy darf den Betrag über speed_max hinaus auf sqrt(2)*speed heben
            assert!(speed <= config.speed_max * 1.5 + 1e-6);
        }
    }

    #[test]
    fn test_field_value_monotonically_decreasing() {
        let ball = test_ball(Vec3::ZERO, 30.0);
        let mut previous = f32::INFINITY;
        // Jenseits der Oberfläche (dist > radius + radius_min) ist der Wert < 1
        for d in [45.0, 60.0, 100.0, 200.0, 500.0] {
            let v = ball.field_value_at(Vec3::new(d, 0.0, 0.0));
            assert!(v < 1.0, "field at {d} is {v}");
            assert!(v < previous);
            previous = v;
        }
    }

    #[test]
    fn test_field_value_clamped_at_center() {
        let ball = test_ball(Vec3::ZERO, 50.0);
        // Am Zentrum greift die Nenner-Klemme auf 1
        assert_eq!(ball.field_value_at(Vec3::ZERO), 2500.0);
        assert_eq!(ball.field_value_at(Vec3::new(0.5, 0.0, 0.0)), 2500.0);
    }

    #[test]
    fn test_centering_force_pulls_back() {
        let mut ball = test_ball(Vec3::new(600.0, 0.0, 0.0), 10.0);
        ball.velocity = Vec3::new(1.0, 0.0, 0.0);
        ball.integrate(0.0012);
        // Geschwindigkeit wird zum Ursprung hin korrigiert
        assert!(ball.velocity.x < 1.0);

        let mut inner = test_ball(Vec3::new(100.0, 0.0, 0.0), 10.0);
        inner.velocity = Vec3::new(1.0, 0.0, 0.0);
        inner.integrate(0.0012);
        assert_eq!(inner.velocity.x, 1.0);
    }

    #[test]
    fn test_dominant_tracks_strongest_contribution() {
        let set = MetaballSet::from_balls(vec![
            test_ball(Vec3::new(-200.0, 0.0, 0.0), 20.0),
            test_ball(Vec3::new(200.0, 0.0, 0.0), 20.0),
        ]);
        let (value, index) = set.field_at(Vec3::new(180.0, 0.0, 0.0));
        assert_eq!(index, 1);
        assert!(value > 0.0);
        let dominant = set.dominant_at(Vec3::new(-180.0, 0.0, 0.0));
        assert_eq!(dominant.map(|b| b.position.x), Some(-200.0));
    }

    #[test]
    fn test_empty_set_has_no_dominant() {
        let set = MetaballSet::default();
        assert!(set.dominant_at(Vec3::ZERO).is_none());
        assert_eq!(set.field_at(Vec3::ZERO).0, 0.0);
    }
}
