//! Removal of bodies that have left the interesting part of the simulation
//!
//! Two reasons to retire a body:
//! - it is farther from the origin than the escape radius
//! - it is a short-lived kind (dust) older than the particle lifetime
//!
//! Retirement keeps the survivors in their original relative order, so a
//! body's index can only move down, never past another survivor.

use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::error::{positive, Result};

/// When bodies leave the simulation
///
/// # Examples
///
/// ```
/// use nbody::body::Body;
/// use nbody::retirement::RetirementPolicy;
///
/// # fn main() -> nbody::Result<()> {
/// let policy = RetirementPolicy {
///     escape_radius: Some(2.0),
///     particle_lifetime: None,
/// };
///
/// assert!(policy.retires(&Body::comet().position(3.0, 0.0)?.build()));
/// assert!(!policy.retires(&Body::comet().position(1.0, 0.0)?.build()));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RetirementPolicy {
    /// Bodies farther than this from the origin are removed
    pub escape_radius: Option<f64>,
    /// Particles older than this many ticks are removed
    pub particle_lifetime: Option<u64>,
}

impl RetirementPolicy {
    pub fn validate(&self) -> Result<()> {
        if let Some(radius) = self.escape_radius {
            positive("retirement.escapeRadius", radius)?;
        }
        Ok(())
    }

    pub fn retires(&self, body: &Body) -> bool {
        let escaped = self
            .escape_radius
            .is_some_and(|radius| body.position.coords.magnitude() > radius);
        let expired = body.kind.defaults().ages_out
            && self
                .particle_lifetime
                .is_some_and(|lifetime| body.age > lifetime);

        escaped || expired
    }
}

/// Remove every body `policy` retires, returning them in their former order
pub fn retire(bodies: &mut Vec<Body>, policy: &RetirementPolicy) -> Vec<Body> {
    if !bodies.iter().any(|b| policy.retires(b)) {
        return Vec::new();
    }

    let (removed, kept): (Vec<Body>, Vec<Body>) =
        bodies.drain(..).partition(|b| policy.retires(b));
    *bodies = kept;

    log::debug!(
        "retired {} bod{}, {} remain",
        removed.len(),
        if removed.len() == 1 { "y" } else { "ies" },
        bodies.len()
    );
    removed
}
