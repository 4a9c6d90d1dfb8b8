//! Comet dust shedding
//!
//! A comet passing a star sheds dust with a per-tick probability of
//! `rate * dt / r²`. The dust starts just behind the comet on the side away
//! from the star and inherits the comet's velocity. The random stream is a
//! seeded ChaCha generator, so two systems with the same seed and history
//! shed exactly the same dust.
//!
//! Dust is short-lived: once older than `dust_lifetime` ticks it is swept
//! out of the system, so the body count stays bounded while comets shed.

use nalgebra::Point2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::{finite, non_negative, positive, Result};

/// Dust shedding parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutgassingConfig {
    /// Seed for the shedding random stream
    pub seed: u64,
    /// Scales the per-tick shedding probability `rate * dt / r²`
    pub rate: f64,
    /// Mass of each dust particle
    pub dust_mass: f64,
    /// How far behind the comet (away from the star) dust appears
    pub offset: f64,
    /// Shed dust older than this many ticks is removed
    pub dust_lifetime: u64,
}

impl Default for OutgassingConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            rate: 1.0,
            dust_mass: 1.0e-5,
            offset: 0.01,
            dust_lifetime: 100,
        }
    }
}

impl OutgassingConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("outgassing.rate", self.rate)?;
        positive("outgassing.dustMass", self.dust_mass)?;
        finite("outgassing.offset", self.offset)?;
        Ok(())
    }
}

/// Dust shedding state: the parameters plus the random stream
pub struct Outgassing {
    config: OutgassingConfig,
    rng: ChaCha8Rng,
}

impl Outgassing {
    pub fn new(config: OutgassingConfig) -> Self {
        Self {
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
        }
    }

    pub fn config(&self) -> &OutgassingConfig {
        &self.config
    }

    /// Whether `body` is shed dust that has outlived `dust_lifetime`
    pub fn expired(&self, body: &Body) -> bool {
        body.parent.is_some() && body.age > self.config.dust_lifetime
    }

    /// Remove expired dust, keeping every other body in order
    pub fn sweep(&self, bodies: &mut Vec<Body>) -> usize {
        let before = bodies.len();
        bodies.retain(|b| !self.expired(b));
        let removed = before - bodies.len();
        if removed > 0 {
            log::debug!("{} dust particle(s) expired", removed);
        }
        removed
    }

    /// Probability that a comet at squared distance `r2` from a star sheds this tick
    pub fn probability(&self, r2: f64, dt: f64) -> f64 {
        if r2 <= 0.0 {
            return 1.0;
        }
        (self.config.rate * dt / r2).min(1.0)
    }

    /// Dust shed during one tick of length `dt`
    ///
    /// Star/comet pairs are visited in ascending index order and one random
    /// number is drawn per pair whether or not it sheds, which keeps the
    /// stream aligned between identical runs.
    pub fn shed(&mut self, bodies: &[Body], dt: f64) -> Vec<Body> {
        let mut dust = Vec::new();

        for star in bodies.iter().filter(|b| b.kind.defaults().radiates) {
            for comet in bodies.iter().filter(|b| b.kind.defaults().sheds_dust) {
                let dr = comet.position - star.position;
                let r2 = dr.magnitude_squared();
                let draw: f64 = self.rng.gen();

                if r2 == 0.0 || draw >= self.probability(r2, dt) {
                    continue;
                }

                let away = dr / r2.sqrt();
                let position: Point2<f64> = comet.position + away * self.config.offset;
                dust.push(Body::dust(
                    comet.id,
                    self.config.dust_mass,
                    position,
                    comet.velocity,
                ));
            }
        }

        if !dust.is_empty() {
            log::trace!("{} dust particle(s) shed", dust.len());
        }
        dust
    }
}
