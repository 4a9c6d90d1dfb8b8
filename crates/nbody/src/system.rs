use crate::body::{Body, BodyId, BodyKind};
use crate::config::SimulationConfig;
use crate::error::{NBodyError, Result};
use crate::forces::{CompositeForce, DirectGravity, ForceModel, RadiationPressure};
use crate::outgassing::Outgassing;
use crate::retirement::{self, RetirementPolicy};
use nalgebra::{Point2, Vector2};

/// An owned, ordered collection of bodies and the rules that move them
///
/// Bodies are indexed `0..count()` in insertion order. Indices only change
/// when a retirement policy removes bodies; survivors keep their relative
/// order. A borrowed [`Body`] cannot outlive the next mutation.
pub struct System {
    config: SimulationConfig,
    bodies: Vec<Body>,
    force: CompositeForce,
    outgassing: Option<Outgassing>,
    /// Simulation time elapsed
    time: f64,
    steps: u64,
    next_id: u32,
}

impl System {
    /// Creates an empty system with the default constants
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::system::System;
    ///
    /// let system = System::new();
    /// assert_eq!(system.count(), 0);
    /// assert_eq!(system.time(), 0.0);
    /// ```
    pub fn new() -> Self {
        Self::build(SimulationConfig::default())
    }

    /// Creates an empty system after validating `config`
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::config::SimulationConfig;
    /// use nbody::system::System;
    ///
    /// let config = SimulationConfig { dt: 0.001, ..SimulationConfig::default() };
    /// let system = System::with_config(config).unwrap();
    /// assert_eq!(system.config().dt, 0.001);
    ///
    /// let bad = SimulationConfig { softening: f64::NAN, ..SimulationConfig::default() };
    /// assert!(System::with_config(bad).is_err());
    /// ```
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        Ok(Self::build(config.validated()?))
    }

    fn build(config: SimulationConfig) -> Self {
        let mut force =
            CompositeForce::new().with_force(DirectGravity::new(config.g, config.softening));
        if config.radiation_pressure > 0.0 {
            force = force.with_force(RadiationPressure::new(
                config.radiation_pressure,
                config.softening,
            ));
        }

        log::info!(
            "new system: dt={} g={} softening={} integrator={:?}",
            config.dt,
            config.g,
            config.softening,
            config.integrator
        );

        Self {
            config,
            bodies: Vec::new(),
            force,
            outgassing: config.outgassing.map(Outgassing::new),
            time: 0.0,
            steps: 0,
            next_id: 0,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Appends a body and returns its index
    ///
    /// The body is given a fresh id and its age is reset.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::Body;
    /// use nbody::system::System;
    ///
    /// let mut system = System::new();
    /// let star = system.add(Body::star().build());
    /// let comet = system.add(Body::comet().build());
    ///
    /// assert_eq!((star, comet), (0, 1));
    /// assert_eq!(system.count(), 2);
    /// ```
    pub fn add(&mut self, mut body: Body) -> usize {
        body.id = BodyId(self.next_id);
        body.age = 0;
        self.next_id += 1;

        log::debug!(
            "add {} #{} mass={} at {}",
            body.kind,
            body.id.0,
            body.mass,
            body
        );

        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Borrow the body at `index`
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::{Body, BodyKind};
    /// use nbody::system::System;
    ///
    /// let mut system = System::new();
    /// system.add(Body::star().build());
    ///
    /// assert_eq!(system.body(0).unwrap().kind(), BodyKind::Star);
    /// assert!(system.body(1).is_err());
    /// ```
    pub fn body(&self, index: usize) -> Result<&Body> {
        self.bodies.get(index).ok_or(NBodyError::IndexOutOfRange {
            index: index as i64,
            count: self.bodies.len(),
        })
    }

    /// Look a body up by the id it was given in [`System::add`]
    pub fn find(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of ticks taken so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Advance every body by one timestep
    ///
    /// Integration first, then ageing, then (when configured) dust expiry,
    /// dust shedding and retirement. New dust is appended after every
    /// existing body; shed dust never outlives its configured lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::Body;
    /// use nbody::system::System;
    ///
    /// # fn main() -> nbody::Result<()> {
    /// let mut system = System::new();
    /// system.add(Body::star().build());
    /// system.add(Body::comet().position(0.3, 0.3)?.velocity(0.0, -0.14)?.build());
    ///
    /// system.tick();
    ///
    /// assert!(system.body(1)?.qy() < 0.3);
    /// assert_eq!(system.steps(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn tick(&mut self) {
        debug_assert!(
            self.bodies
                .iter()
                .all(|b| b.mass > 0.0 || (b.is_tracer() && b.kind == BodyKind::Particle)),
            "non-positive mass on a non-tracer body"
        );

        let dt = self.config.dt;
        self.config
            .integrator
            .as_integrator()
            .step(&mut self.bodies, dt, &self.force);

        self.bodies.iter_mut().for_each(|b| b.age += 1);
        self.time += dt;
        self.steps += 1;

        if let Some(outgassing) = self.outgassing.as_mut() {
            outgassing.sweep(&mut self.bodies);
            let dust = outgassing.shed(&self.bodies, dt);
            for particle in dust {
                self.add(particle);
            }
        }

        if let Some(policy) = self.config.retirement {
            self.retire(&policy);
        }
    }

    /// Run `n` ticks and return the simulation time reached
    pub fn run(&mut self, n: usize) -> f64 {
        for _ in 0..n {
            self.tick();
        }
        self.time
    }

    /// Remove the bodies `policy` retires and hand them back
    ///
    /// Survivors keep their relative order, so indices taken before this
    /// call are no longer valid afterwards.
    pub fn retire(&mut self, policy: &RetirementPolicy) -> Vec<Body> {
        retirement::retire(&mut self.bodies, policy)
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Total momentum of all bodies
    ///
    /// Constant for a closed system; its drift measures integration error.
    pub fn total_momentum(&self) -> Vector2<f64> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(Vector2::zeros(), |acc, p| acc + p)
    }

    /// Mass-weighted mean position, `None` when there is no mass
    pub fn center_of_mass(&self) -> Option<Point2<f64>> {
        let total = self.total_mass();
        if total <= 0.0 {
            return None;
        }
        let weighted = self
            .bodies
            .iter()
            .map(|b| b.position.coords * b.mass)
            .fold(Vector2::zeros(), |acc, p| acc + p);
        Some(Point2::from(weighted / total))
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(|b| b.kinetic_energy()).sum()
    }

    pub fn potential_energy(&self) -> f64 {
        self.force.potential_energy(&self.bodies)
    }

    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Total angular momentum about the origin
    pub fn total_angular_momentum(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.specific_angular_momentum() * b.mass)
            .sum()
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}
