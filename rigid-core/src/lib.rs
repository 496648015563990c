//! Simulation world and step pipeline for the rigid-body stack.
//!
//! This crate ties the type layer and the contact layer together:
//!
//! - [`World`] - arena-based body store with stable [`BodyHandle`]s and
//!   the per-tick step pipeline (integrate, broad phase, narrow phase,
//!   velocity resolution, positional correction)
//! - [`broad_phase`] - conservative bounding-volume overlap tests
//!
//! # Determinism
//!
//! A step is a pure function of the world state and `dt`: bodies are
//! visited in handle order, candidate pairs in lexicographic index order,
//! and the solver runs a fixed iteration count. Two worlds built by the
//! same sequence of calls produce bit-identical trajectories.
//!
//! # Example
//!
//! ```
//! use nalgebra::Point3;
//! use rigid_core::World;
//! use rigid_types::{RigidBody, WorldConfig};
//!
//! let mut world = World::new(WorldConfig::default()).unwrap();
//! world.add_body(RigidBody::new_static(Point3::origin()), 0.0);
//! let ball = world.add_body(
//!     RigidBody::solid_sphere(1.0, 0.5)
//!         .unwrap()
//!         .with_position(Point3::new(0.0, 0.0, 3.0)),
//!     0.5,
//! );
//!
//! // Simulate five seconds at the configured tick rate.
//! let dt = world.config().timestep;
//! for _ in 0..300 {
//!     world.step(dt).unwrap();
//! }
//!
//! // The ball has come to rest on the floor.
//! let body = world.body(ball).unwrap();
//! assert!(body.position.z < 3.0);
//! assert!(body.position.z > 0.0);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

pub mod broad_phase;
mod world;

pub use world::{BodyHandle, World};
