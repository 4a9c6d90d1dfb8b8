use std::fmt;

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::error::{finite, positive, NBodyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// Closed classification of a body
///
/// The discriminants are the codes the renderer switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u8)]
pub enum BodyKind {
    Particle = 0,
    Comet = 1,
    Star = 2,
    Planet = 3,
}

/// Per-kind defaults and roles, looked up by [`BodyKind::defaults`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindDefaults {
    /// Mass a freshly created builder starts with
    pub mass: f64,
    /// Pushes lighter bodies away through radiation pressure
    pub radiates: bool,
    /// Sheds dust when close to a radiating body
    pub sheds_dust: bool,
    /// Subject to the lifetime limit of a retirement policy
    pub ages_out: bool,
}

const PARTICLE_DEFAULTS: KindDefaults = KindDefaults {
    mass: 1.0e-5,
    radiates: false,
    sheds_dust: false,
    ages_out: true,
};

const COMET_DEFAULTS: KindDefaults = KindDefaults {
    mass: 1.0,
    radiates: false,
    sheds_dust: true,
    ages_out: false,
};

const STAR_DEFAULTS: KindDefaults = KindDefaults {
    mass: 1000.0,
    radiates: true,
    sheds_dust: false,
    ages_out: false,
};

const PLANET_DEFAULTS: KindDefaults = KindDefaults {
    mass: 10.0,
    radiates: false,
    sheds_dust: false,
    ages_out: false,
};

impl BodyKind {
    pub const ALL: [BodyKind; 4] = [
        BodyKind::Particle,
        BodyKind::Comet,
        BodyKind::Star,
        BodyKind::Planet,
    ];

    /// Numeric code used across the JavaScript boundary (0..=3)
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`BodyKind::code`]
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::BodyKind;
    ///
    /// assert_eq!(BodyKind::from_code(1), Some(BodyKind::Comet));
    /// assert_eq!(BodyKind::from_code(4), None);
    /// ```
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    pub fn defaults(self) -> &'static KindDefaults {
        match self {
            BodyKind::Particle => &PARTICLE_DEFAULTS,
            BodyKind::Comet => &COMET_DEFAULTS,
            BodyKind::Star => &STAR_DEFAULTS,
            BodyKind::Planet => &PLANET_DEFAULTS,
        }
    }
}

impl fmt::Display for BodyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodyKind::Particle => "particle",
            BodyKind::Comet => "comet",
            BodyKind::Star => "star",
            BodyKind::Planet => "planet",
        };
        write!(f, "{}", name)
    }
}

/// A point mass owned by a [`System`](crate::system::System)
///
/// Fields are only writable inside the crate: the integrator moves bodies,
/// everything else reads them through accessors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) kind: BodyKind,
    pub(crate) mass: f64,
    pub(crate) position: Point2<f64>,
    pub(crate) velocity: Vector2<f64>,
    pub(crate) age: u64,
    pub(crate) parent: Option<BodyId>,
}

impl Body {
    pub fn star() -> BodyBuilder {
        BodyBuilder::new(BodyKind::Star)
    }

    pub fn comet() -> BodyBuilder {
        BodyBuilder::new(BodyKind::Comet)
    }

    pub fn particle() -> BodyBuilder {
        BodyBuilder::new(BodyKind::Particle)
    }

    pub fn planet() -> BodyBuilder {
        BodyBuilder::new(BodyKind::Planet)
    }

    /// Dust shed by the comet `parent`
    pub(crate) fn dust(
        parent: BodyId,
        mass: f64,
        position: Point2<f64>,
        velocity: Vector2<f64>,
    ) -> Body {
        Body {
            id: BodyId(0),
            kind: BodyKind::Particle,
            mass,
            position,
            velocity,
            age: 0,
            parent: Some(parent),
        }
    }

    /// Identifier assigned when the body was added to a system
    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn qx(&self) -> f64 {
        self.position.x
    }

    pub fn qy(&self) -> f64 {
        self.position.y
    }

    pub fn vx(&self) -> f64 {
        self.velocity.x
    }

    pub fn vy(&self) -> f64 {
        self.velocity.y
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        self.velocity
    }

    /// Number of ticks this body has been simulated for
    pub fn age(&self) -> u64 {
        self.age
    }

    /// The comet this body was shed from, if any
    pub fn parent(&self) -> Option<BodyId> {
        self.parent
    }

    /// Massless particles are moved by gravity but pull on nothing
    pub fn is_tracer(&self) -> bool {
        self.mass == 0.0
    }

    pub fn momentum(&self) -> Vector2<f64> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.magnitude_squared()
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).magnitude()
    }

    /// Angular momentum about the origin per unit mass (z-component of r × v)
    pub fn specific_angular_momentum(&self) -> f64 {
        self.position.x * self.velocity.y - self.position.y * self.velocity.x
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.position.x, self.position.y)
    }
}

/// Chained, validating constructor for [`Body`]
///
/// Every setter checks its input and returns the builder back, so a
/// construction reads as a `?` chain. `build` takes the builder by value,
/// which makes building twice impossible.
///
/// # Examples
///
/// ```
/// use nbody::body::{Body, BodyKind};
///
/// # fn main() -> nbody::Result<()> {
/// let comet = Body::comet()
///     .mass(1.0)?
///     .position(0.3, 0.3)?
///     .velocity(0.0, -0.14)?
///     .build();
///
/// assert_eq!(comet.kind(), BodyKind::Comet);
/// assert_eq!(comet.qx(), 0.3);
///
/// assert!(Body::comet().mass(0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyBuilder {
    kind: BodyKind,
    mass: f64,
    position: Point2<f64>,
    velocity: Vector2<f64>,
}

impl BodyBuilder {
    /// Starts from the defaults of `kind`: its default mass, at rest at the origin
    pub fn new(kind: BodyKind) -> Self {
        Self {
            kind,
            mass: kind.defaults().mass,
            position: Point2::origin(),
            velocity: Vector2::zeros(),
        }
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn mass(mut self, m: f64) -> Result<Self> {
        self.mass = positive("mass", m)?;
        Ok(self)
    }

    pub fn position(mut self, x: f64, y: f64) -> Result<Self> {
        self.position = Point2::new(finite("position.x", x)?, finite("position.y", y)?);
        Ok(self)
    }

    pub fn velocity(mut self, vx: f64, vy: f64) -> Result<Self> {
        self.velocity = Vector2::new(finite("velocity.x", vx)?, finite("velocity.y", vy)?);
        Ok(self)
    }

    /// Turns a particle into a massless tracer
    ///
    /// Only particles may be massless; any other kind is rejected.
    pub fn tracer(mut self) -> Result<Self> {
        if self.kind != BodyKind::Particle {
            return Err(NBodyError::InvalidParameter {
                name: "tracer",
                value: f64::from(self.kind.code()),
            });
        }
        self.mass = 0.0;
        Ok(self)
    }

    pub fn build(self) -> Body {
        Body {
            id: BodyId(0),
            kind: self.kind,
            mass: self.mass,
            position: self.position,
            velocity: self.velocity,
            age: 0,
            parent: None,
        }
    }
}
