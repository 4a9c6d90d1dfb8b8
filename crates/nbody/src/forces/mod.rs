//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait and the models a
//! [`System`](crate::system::System) composes from its configuration:
//! softened direct gravity and stellar radiation pressure.

use crate::body::Body;
use nalgebra::Vector2;

pub mod gravity;
pub mod radiation;


pub use gravity::DirectGravity;
pub use radiation::RadiationPressure;

/// A source of acceleration on bodies
///
/// # Examples
///
/// ```
/// use nbody::body::Body;
/// use nbody::forces::{DirectGravity, ForceModel};
///
/// # fn main() -> nbody::Result<()> {
/// let bodies = [
///     Body::star().build(),
///     Body::comet().position(1.0, 0.0)?.build(),
/// ];
///
/// let gravity = DirectGravity::new(1.0e-5, 0.0);
/// let accel = gravity.acceleration(1, &bodies);
///
/// // Pulled back toward the star
/// assert!(accel.x < 0.0);
/// # Ok(())
/// # }
/// ```
pub trait ForceModel: Send + Sync {
    /// Acceleration on `bodies[idx]` given every body in the system
    fn acceleration(&self, idx: usize, bodies: &[Body]) -> Vector2<f64>;

    /// Accelerations on every body, in index order
    fn accelerations(&self, bodies: &[Body]) -> Vec<Vector2<f64>> {
        (0..bodies.len())
            .map(|i| self.acceleration(i, bodies))
            .collect()
    }

    /// Potential energy of the configuration
    ///
    /// Defaults to 0.0 for forces that have no potential.
    fn potential_energy(&self, _bodies: &[Body]) -> f64 {
        0.0
    }
}

/// Sum of several force models
///
/// # Examples
///
/// ```
/// use nbody::forces::{CompositeForce, DirectGravity, RadiationPressure};
///
/// let composite = CompositeForce::new()
///     .with_force(DirectGravity::new(1.0e-5, 1.0e-3))
///     .with_force(RadiationPressure::new(1.0e-3, 1.0e-3));
/// assert_eq!(composite.len(), 2);
/// ```
pub struct CompositeForce {
    models: Vec<Box<dyn ForceModel>>,
}

impl CompositeForce {
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    pub fn with_force<F: ForceModel + 'static>(mut self, force: F) -> Self {
        self.models.push(Box::new(force));
        self
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

impl Default for CompositeForce {
    fn default() -> Self {
        Self::new()
    }
}

impl ForceModel for CompositeForce {
    fn acceleration(&self, idx: usize, bodies: &[Body]) -> Vector2<f64> {
        self.models
            .iter()
            .map(|f| f.acceleration(idx, bodies))
            .fold(Vector2::zeros(), |acc, a| acc + a)
    }

    fn potential_energy(&self, bodies: &[Body]) -> f64 {
        self.models.iter().map(|f| f.potential_energy(bodies)).sum()
    }
}
