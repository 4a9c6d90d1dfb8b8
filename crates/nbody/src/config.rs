//! Simulation constants and optional behaviours
//!
//! A [`SimulationConfig`] is fixed when a [`System`](crate::system::System)
//! is created. It deserializes from a camelCase object so the browser can
//! pass `{ dt: 0.01, g: 1e-5 }` and leave everything else at its default.

use serde::{Deserialize, Serialize};

use crate::error::{non_negative, positive, Result};
use crate::integrator::{Integrator, Leapfrog, SemiImplicitEuler};
use crate::outgassing::OutgassingConfig;
use crate::retirement::RetirementPolicy;

/// Which symplectic integrator advances the bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntegratorKind {
    /// `v += a dt` then `p += v dt`
    #[default]
    SemiImplicitEuler,
    /// Kick-drift-kick leapfrog (velocity Verlet)
    Leapfrog,
}

impl IntegratorKind {
    pub fn as_integrator(&self) -> &'static dyn Integrator {
        match self {
            IntegratorKind::SemiImplicitEuler => &SemiImplicitEuler,
            IntegratorKind::Leapfrog => &Leapfrog { use_dkd: false },
        }
    }
}

/// Constants and options for one simulation
///
/// # Examples
///
/// ```
/// use nbody::config::SimulationConfig;
///
/// let config = SimulationConfig {
///     dt: 0.005,
///     ..SimulationConfig::default()
/// };
/// assert!(config.validate().is_ok());
///
/// let broken = SimulationConfig { dt: 0.0, ..config };
/// assert!(broken.validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    /// Fixed timestep
    pub dt: f64,
    /// Gravitational constant
    pub g: f64,
    /// Softening length ε added in quadrature to every separation
    pub softening: f64,
    pub integrator: IntegratorKind,
    /// Strength of stellar radiation pressure, 0 disables it
    pub radiation_pressure: f64,
    pub outgassing: Option<OutgassingConfig>,
    pub retirement: Option<RetirementPolicy>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            dt: 0.01,
            g: 1.0e-5,
            softening: 1.0e-3,
            integrator: IntegratorKind::default(),
            radiation_pressure: 0.0,
            outgassing: None,
            retirement: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        positive("dt", self.dt)?;
        non_negative("g", self.g)?;
        non_negative("softening", self.softening)?;
        non_negative("radiationPressure", self.radiation_pressure)?;
        if let Some(outgassing) = &self.outgassing {
            outgassing.validate()?;
        }
        if let Some(retirement) = &self.retirement {
            retirement.validate()?;
        }
        Ok(())
    }

    /// Validates and returns the configuration
    pub fn validated(self) -> Result<Self> {
        self.validate().map(|_| self)
    }
}
