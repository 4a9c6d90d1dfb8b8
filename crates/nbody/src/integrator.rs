//! Time integration for N-body systems
//!
//! Both integrators here are symplectic, so orbits neither spiral in nor
//! drift out over long runs the way explicit Euler does.

use crate::body::Body;
use crate::forces::ForceModel;

/// A fixed-step time integrator
pub trait Integrator: Send + Sync {
    /// Advance every body by one timestep
    ///
    /// # Arguments
    ///
    /// * `bodies` - Bodies to move (modified in place)
    /// * `dt` - Timestep
    /// * `force` - Force model to compute accelerations
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel);

    /// Advance the bodies by `n_steps` timesteps and return the elapsed time
    fn integrate(
        &self,
        bodies: &mut [Body],
        dt: f64,
        n_steps: usize,
        force: &dyn ForceModel,
    ) -> f64 {
        for _ in 0..n_steps {
            self.step(bodies, dt, force);
        }
        dt * n_steps as f64
    }
}

/// Semi-implicit (symplectic) Euler
///
/// 1. `v(t + dt) = v(t) + a(t) dt`
/// 2. `x(t + dt) = x(t) + v(t + dt) dt`
///
/// One force evaluation per step.
///
/// # Examples
///
/// ```
/// use nbody::body::Body;
/// use nbody::forces::DirectGravity;
/// use nbody::integrator::{Integrator, SemiImplicitEuler};
///
/// # fn main() -> nbody::Result<()> {
/// let mut bodies = [
///     Body::star().build(),
///     Body::comet().position(0.3, 0.3)?.velocity(0.0, -0.14)?.build(),
/// ];
/// let force = DirectGravity::new(1.0e-5, 1.0e-3);
///
/// SemiImplicitEuler.step(&mut bodies, 0.01, &force);
/// assert!(bodies[1].qy() < 0.3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
        let accelerations = force.accelerations(bodies);

        bodies
            .iter_mut()
            .zip(accelerations.iter())
            .for_each(|(body, accel)| {
                body.velocity += accel * dt;
                body.position += body.velocity * dt;
            });
    }
}

/// Symplectic leapfrog integrator (2nd order)
///
/// The kick-drift-kick form is velocity Verlet:
///
/// 1. Kick: v(t + dt/2) = v(t) + a(t) * dt/2
/// 2. Drift: x(t + dt) = x(t) + v(t + dt/2) * dt
/// 3. Kick: v(t + dt) = v(t + dt/2) + a(t + dt) * dt/2
///
/// Costs two force evaluations per step in exchange for second-order accuracy.
#[derive(Debug, Clone, Copy)]
pub struct Leapfrog {
    /// Use drift-kick-drift instead of kick-drift-kick
    pub use_dkd: bool,
}

impl Leapfrog {
    /// Kick-drift-kick leapfrog
    pub fn new() -> Self {
        Self { use_dkd: false }
    }

    /// Drift-kick-drift leapfrog
    pub fn new_dkd() -> Self {
        Self { use_dkd: true }
    }

    fn kick(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
        let accelerations = force.accelerations(bodies);

        bodies
            .iter_mut()
            .zip(accelerations.iter())
            .for_each(|(body, accel)| {
                body.velocity += accel * dt;
            });
    }

    fn drift(&self, bodies: &mut [Body], dt: f64) {
        bodies.iter_mut().for_each(|body| {
            body.position += body.velocity * dt;
        });
    }
}

impl Default for Leapfrog {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for Leapfrog {
    fn step(&self, bodies: &mut [Body], dt: f64, force: &dyn ForceModel) {
        if self.use_dkd {
            self.drift(bodies, dt / 2.0);
            self.kick(bodies, dt, force);
            self.drift(bodies, dt / 2.0);
        } else {
            self.kick(bodies, dt / 2.0, force);
            self.drift(bodies, dt);
            self.kick(bodies, dt / 2.0, force);
        }
    }
}
