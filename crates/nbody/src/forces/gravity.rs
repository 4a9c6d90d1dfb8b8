//! Direct N-body gravity (O(N²) implementation)

use crate::body::Body;
use crate::forces::ForceModel;
use nalgebra::Vector2;

/// Softened direct-summation gravity
///
/// `a_i = G Σ_{j≠i} m_j (p_j - p_i) / (|p_j - p_i|² + ε²)^{3/2}`
///
/// Sources are visited in ascending index order, so the same input always
/// produces bit-identical output. Massless tracers contribute nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectGravity {
    /// Gravitational constant
    pub g: f64,
    /// Softening length ε
    pub softening: f64,
}

impl DirectGravity {
    pub fn new(g: f64, softening: f64) -> Self {
        Self { g, softening }
    }

    /// Acceleration that `source` imparts on a body at `target`
    fn pull(&self, target: &Body, source: &Body) -> Vector2<f64> {
        let dr = source.position - target.position;
        let r2 = dr.magnitude_squared() + self.softening * self.softening;
        if r2 == 0.0 {
            // Coincident bodies with no softening: no defined direction
            return Vector2::zeros();
        }
        let r = r2.sqrt();
        dr * (self.g * source.mass / (r2 * r))
    }
}

impl ForceModel for DirectGravity {
    fn acceleration(&self, idx: usize, bodies: &[Body]) -> Vector2<f64> {
        let body = &bodies[idx];

        bodies
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != idx && other.mass > 0.0)
            .map(|(_, other)| self.pull(body, other))
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }

    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        let eps2 = self.softening * self.softening;

        // Each pair counted once
        bodies
            .iter()
            .enumerate()
            .flat_map(|(i, a)| {
                bodies[i + 1..].iter().map(move |b| {
                    let r = ((a.position - b.position).magnitude_squared() + eps2).sqrt();
                    if r == 0.0 {
                        0.0
                    } else {
                        -self.g * a.mass * b.mass / r
                    }
                })
            })
            .sum()
    }
}

/// Speed of a circular orbit of radius `radius` around a mass `central_mass`
///
/// # Examples
///
/// ```
/// use nbody::forces::gravity::circular_velocity;
///
/// // The classic comet launch: 0.3, 0.3 from a 1000-mass star
/// let v = circular_velocity(1.0e-5, 1000.0, (0.18f64).sqrt());
/// assert!((v - 0.1537).abs() < 1e-3);
/// ```
pub fn circular_velocity(g: f64, central_mass: f64, radius: f64) -> f64 {
    (g * central_mass / radius).sqrt()
}
