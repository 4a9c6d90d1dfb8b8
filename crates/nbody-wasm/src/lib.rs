//! WASM bindings for the comet N-body engine.
//!
//! Exposes `System`, `Body` and `BodyBuilder` classes to JavaScript with the
//! same shape the browser demo uses.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! import { System, Body } from "comets";
//!
//! const system = System.new();
//! system.add(Body.star().build());
//! system.add(
//!   Body.comet()
//!     .mass(1.0)
//!     .position(0.3, 0.3)
//!     .velocity(0.0, -0.14)
//!     .build()
//! );
//!
//! const frame = () => {
//!   system.tick();
//!   for (let i = 0; i < system.count(); i++) {
//!     const body = system.body(i);
//!     draw(body.kind(), body.mass(), body.qx(), body.qy());
//!   }
//!   requestAnimationFrame(frame);
//! };
//! ```

use serde::Serialize;
use wasm_bindgen::prelude::*;

use nbody::{BodyKind, NBodyError, SimulationConfig};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn js_error(err: NBodyError) -> JsError {
    JsError::new(&err.to_string())
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

/// Body state snapshot for JavaScript
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySnapshot {
    pub id: u32,
    /// 0 = particle, 1 = comet, 2 = star, 3 = planet
    pub kind: u8,
    pub mass: f64,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub age: u64,
    pub parent: Option<u32>,
}

impl From<&nbody::Body> for BodySnapshot {
    fn from(body: &nbody::Body) -> Self {
        Self {
            id: body.id().0,
            kind: body.kind().code(),
            mass: body.mass(),
            position: [body.qx(), body.qy()],
            velocity: [body.vx(), body.vy()],
            age: body.age(),
            parent: body.parent().map(|p| p.0),
        }
    }
}

// =============================================================================
// Body and builder
// =============================================================================

/// A read-only copy of one simulated body
#[wasm_bindgen(js_name = Body)]
#[derive(Clone, Copy, Debug)]
pub struct JsBody {
    inner: nbody::Body,
}

#[wasm_bindgen(js_class = Body)]
impl JsBody {
    pub fn star() -> JsBodyBuilder {
        JsBodyBuilder::new(BodyKind::Star)
    }

    pub fn comet() -> JsBodyBuilder {
        JsBodyBuilder::new(BodyKind::Comet)
    }

    pub fn particle() -> JsBodyBuilder {
        JsBodyBuilder::new(BodyKind::Particle)
    }

    pub fn planet() -> JsBodyBuilder {
        JsBodyBuilder::new(BodyKind::Planet)
    }

    pub fn id(&self) -> u32 {
        self.inner.id().0
    }

    /// 0 = particle, 1 = comet, 2 = star, 3 = planet
    pub fn kind(&self) -> u8 {
        self.inner.kind().code()
    }

    pub fn mass(&self) -> f64 {
        self.inner.mass()
    }

    pub fn qx(&self) -> f64 {
        self.inner.qx()
    }

    pub fn qy(&self) -> f64 {
        self.inner.qy()
    }

    pub fn vx(&self) -> f64 {
        self.inner.vx()
    }

    pub fn vy(&self) -> f64 {
        self.inner.vy()
    }

    /// Ticks since the body was added, as a plain JS number
    pub fn age(&self) -> f64 {
        self.inner.age() as f64
    }

    #[wasm_bindgen(js_name = toString)]
    pub fn to_display_string(&self) -> String {
        self.inner.to_string()
    }
}

/// Chained body builder
///
/// JavaScript cannot move values, so the builder remembers whether it has
/// already been built and refuses a second `build()`.
#[wasm_bindgen(js_name = BodyBuilder)]
#[derive(Debug)]
pub struct JsBodyBuilder {
    inner: Option<nbody::BodyBuilder>,
}

impl JsBodyBuilder {
    fn new(kind: BodyKind) -> Self {
        Self {
            inner: Some(nbody::BodyBuilder::new(kind)),
        }
    }

    fn take(&mut self) -> Result<nbody::BodyBuilder, NBodyError> {
        self.inner.take().ok_or(NBodyError::BuilderReused)
    }

    fn update(
        mut self,
        f: impl FnOnce(nbody::BodyBuilder) -> nbody::Result<nbody::BodyBuilder>,
    ) -> Result<JsBodyBuilder, NBodyError> {
        let builder = f(self.take()?)?;
        Ok(JsBodyBuilder {
            inner: Some(builder),
        })
    }

    fn finish(&mut self) -> Result<nbody::Body, NBodyError> {
        self.take().map(nbody::BodyBuilder::build)
    }
}

#[wasm_bindgen(js_class = BodyBuilder)]
impl JsBodyBuilder {
    pub fn mass(self, m: f64) -> Result<JsBodyBuilder, JsError> {
        self.update(|b| b.mass(m)).map_err(js_error)
    }

    pub fn position(self, x: f64, y: f64) -> Result<JsBodyBuilder, JsError> {
        self.update(|b| b.position(x, y)).map_err(js_error)
    }

    pub fn velocity(self, vx: f64, vy: f64) -> Result<JsBodyBuilder, JsError> {
        self.update(|b| b.velocity(vx, vy)).map_err(js_error)
    }

    pub fn tracer(self) -> Result<JsBodyBuilder, JsError> {
        self.update(|b| b.tracer()).map_err(js_error)
    }

    /// Finish the body. A second call fails with `BuilderReused`.
    pub fn build(&mut self) -> Result<JsBody, JsError> {
        self.finish()
            .map(|inner| JsBody { inner })
            .map_err(js_error)
    }
}

// =============================================================================
// System
// =============================================================================

/// The simulation: an ordered collection of bodies stepped under gravity
#[wasm_bindgen(js_name = System)]
pub struct JsSystem {
    inner: nbody::System,
}

impl JsSystem {
    fn lookup(&self, index: i64) -> Result<&nbody::Body, NBodyError> {
        let out_of_range = NBodyError::IndexOutOfRange {
            index,
            count: self.inner.count(),
        };
        let index = usize::try_from(index).map_err(|_| out_of_range)?;
        self.inner.body(index).map_err(|_| out_of_range)
    }
}

impl Default for JsSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(js_class = System)]
impl JsSystem {
    /// An empty system with the default constants
    pub fn new() -> JsSystem {
        JsSystem {
            inner: nbody::System::new(),
        }
    }

    /// An empty system configured from a plain object
    ///
    /// Recognised keys: `dt`, `g`, `softening`, `integrator`
    /// (`"semiImplicitEuler"` | `"leapfrog"`), `radiationPressure`,
    /// `outgassing` (`{seed, rate, dustMass, offset, dustLifetime}`) and `retirement`
    /// (`{escapeRadius, particleLifetime}`).
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config: JsValue) -> Result<JsSystem, JsError> {
        let config: SimulationConfig = from_js(config)?;
        let inner = nbody::System::with_config(config).map_err(js_error)?;
        Ok(JsSystem { inner })
    }

    /// Append a body, returning its index
    pub fn add(&mut self, body: &JsBody) -> usize {
        self.inner.add(body.inner)
    }

    pub fn count(&self) -> usize {
        self.inner.count()
    }

    /// Copy of the body at `index`
    pub fn body(&self, index: i32) -> Result<JsBody, JsError> {
        self.lookup(i64::from(index))
            .map(|inner| JsBody { inner: *inner })
            .map_err(js_error)
    }

    pub fn tick(&mut self) {
        self.inner.tick();
    }

    /// Run `n` ticks and return the simulation time
    pub fn run(&mut self, n: usize) -> f64 {
        self.inner.run(n)
    }

    pub fn time(&self) -> f64 {
        self.inner.time()
    }

    /// Every body as a plain object, for renderers that prefer one call per frame
    pub fn snapshot(&self) -> Result<JsValue, JsError> {
        let bodies: Vec<BodySnapshot> = self.inner.iter().map(BodySnapshot::from).collect();
        to_js(&bodies)
    }

    #[wasm_bindgen(js_name = totalEnergy)]
    pub fn total_energy(&self) -> f64 {
        self.inner.total_energy()
    }
}
