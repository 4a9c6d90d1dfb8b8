//! Gravitational N-body engine for a comets-and-dust toy universe
//!
//! Build bodies with the kind-specific builders, add them to a
//! [`System`](system::System), then call `tick()` once per frame and read the
//! bodies back by index.
//!
//! ```
//! use nbody::body::Body;
//! use nbody::system::System;
//!
//! # fn main() -> nbody::Result<()> {
//! let mut system = System::new();
//! system.add(Body::star().build());
//! system.add(
//!     Body::comet()
//!         .mass(1.0)?
//!         .position(0.3, 0.3)?
//!         .velocity(0.0, -0.14)?
//!         .build(),
//! );
//!
//! system.tick();
//!
//! for i in 0..system.count() {
//!     let body = system.body(i)?;
//!     let _ = (body.kind().code(), body.mass(), body.qx(), body.qy());
//! }
//! # Ok(())
//! # }
//! ```

pub mod body;
pub mod config;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod outgassing;
pub mod retirement;
pub mod system;

pub use body::{Body, BodyBuilder, BodyId, BodyKind};
pub use config::{IntegratorKind, SimulationConfig};
pub use error::{NBodyError, Result};
pub use system::System;

#[cfg(test)]
mod system_test;
