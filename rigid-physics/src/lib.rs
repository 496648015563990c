//! Unified API for the deterministic rigid-body simulation stack.
//!
//! This crate re-exports the complete stack:
//!
//! - [`rigid_types`] - Core data types (bodies, colliders, configuration, errors)
//! - [`rigid_contact`] - Contact generation and impulse-based response
//! - [`rigid_core`] - Simulation world and the per-tick step pipeline
//!
//! # Quick Start
//!
//! ```
//! use rigid_physics::prelude::*;
//!
//! // A world with default config: Earth gravity, 60 Hz, bouncy materials.
//! let mut world = World::default();
//!
//! // Floor plane at z = 0 and a ball dropped from 5 m.
//! world.add_body(RigidBody::new_static(Point3::origin()), 0.0);
//! let ball = world.add_body(
//!     RigidBody::solid_sphere(1.0, 0.5)
//!         .unwrap()
//!         .with_position(Point3::new(0.0, 0.0, 5.0)),
//!     0.5,
//! );
//!
//! // Simulate two seconds.
//! let dt = world.config().timestep;
//! for _ in 0..120 {
//!     world.step(dt).unwrap();
//! }
//!
//! let body = world.body(ball).unwrap();
//! println!("height after 2 s: {:.2} m", body.position.z);
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         rigid-physics (this crate)      │
//! │          Unified API / re-exports       │
//! └─────────────────────────────────────────┘
//!                      │
//!                      ▼
//!             ┌─────────────────┐
//!             │   rigid-core    │
//!             │ World, stepping │
//!             └────────┬────────┘
//!                      │
//!                      ▼
//!             ┌─────────────────┐
//!             │  rigid-contact  │
//!             │ Contacts, solve │
//!             └────────┬────────┘
//!                      │
//!                      ▼
//!             ┌─────────────────┐
//!             │   rigid-types   │
//!             │  Data structs   │
//!             └─────────────────┘
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

// Re-export sub-crates
pub use rigid_contact;
pub use rigid_core;
pub use rigid_types;

// Re-export nalgebra for convenience
pub use nalgebra;

/// Prelude module for convenient imports.
///
/// Import everything you need with a single line:
///
/// ```
/// use rigid_physics::prelude::*;
/// ```
pub mod prelude {
    // Bodies and configuration
    pub use rigid_types::{AppliedForce, Collider, RigidBody, WorldConfig};

    // Errors
    pub use rigid_types::PhysicsError;

    // Contacts and response
    pub use rigid_contact::{
        correct_positions, resolve_collision, sphere_box, sphere_plane, sphere_sphere, Contact,
    };

    // The world
    pub use rigid_core::{BodyHandle, World};

    // Math types
    pub use nalgebra::{Point3, Vector3};
}
