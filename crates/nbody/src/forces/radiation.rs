//! Stellar radiation pressure

use crate::body::Body;
use crate::forces::ForceModel;
use nalgebra::Vector2;

/// Outward push from every radiating body (stars) on everything else
///
/// The push on a body of mass `m` at distance `r` from a star is
/// `strength / ((r² + ε²) √m)` along the star-to-body direction, so light
/// dust is blown away while comets barely notice. Stars are not pushed by
/// each other and massless tracers are skipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiationPressure {
    pub strength: f64,
    pub softening: f64,
}

impl RadiationPressure {
    pub fn new(strength: f64, softening: f64) -> Self {
        Self {
            strength,
            softening,
        }
    }
}

impl ForceModel for RadiationPressure {
    fn acceleration(&self, idx: usize, bodies: &[Body]) -> Vector2<f64> {
        let body = &bodies[idx];
        if body.kind.defaults().radiates || body.mass <= 0.0 {
            return Vector2::zeros();
        }
        let eps2 = self.softening * self.softening;
        let inv_sqrt_mass = 1.0 / body.mass.sqrt();

        bodies
            .iter()
            .enumerate()
            .filter(|(j, source)| *j != idx && source.kind.defaults().radiates)
            .map(|(_, source)| {
                let dr = body.position - source.position;
                let r = dr.magnitude();
                if r == 0.0 {
                    return Vector2::zeros();
                }
                (dr / r) * (self.strength * inv_sqrt_mass / (r * r + eps2))
            })
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }
}
