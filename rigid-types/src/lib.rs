//! Core types for the rigid-body physics stack.
//!
//! This crate provides the foundational data for the engine:
//!
//! - [`RigidBody`] - position, velocity, mass, collider of one body
//! - [`Collider`] - sphere, plane-boundary, and box collision geometry
//! - [`AppliedForce`] - per-step force (plus a torque slot for API symmetry)
//! - [`WorldConfig`] - gravity, material defaults, solver settings
//! - [`PhysicsError`] - the error taxonomy shared by the whole stack
//!
//! # Design Philosophy
//!
//! These types are data first. The only behavior here is what cannot live
//! anywhere else without splitting an invariant: body construction guards
//! (`InvalidMass`), velocity integration (which must see mass, staticness,
//! and velocity together), and config validation.
//!
//! # Coordinate System
//!
//! - X: right
//! - Y: forward
//! - Z: up
//! - Right-handed
//!
//! # Example
//!
//! ```
//! use rigid_types::{AppliedForce, RigidBody};
//! use nalgebra::{Point3, Vector3};
//!
//! let mut ball = RigidBody::solid_sphere(1.0, 0.5)
//!     .unwrap()
//!     .with_position(Point3::new(0.0, 0.0, 10.0));
//!
//! // One 60 Hz tick of free fall.
//! let gravity = Vector3::new(0.0, 0.0, -9.81);
//! ball.integrate_velocity_verlet(|b| AppliedForce::linear(gravity * b.mass), 1.0 / 60.0)
//!     .unwrap();
//!
//! assert!(ball.position.z < 10.0);
//! assert!(ball.velocity.z < 0.0);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]

mod body;
mod collider;
mod config;
mod error;
pub mod math;

pub use body::{AppliedForce, RigidBody};
pub use collider::Collider;
pub use config::WorldConfig;
pub use error::PhysicsError;

// Re-export math types for convenience
pub use nalgebra::{Point3, Vector3};

/// Result type for physics operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_body_round_trip_through_public_api() {
        let body = RigidBody::solid_sphere(2.0, 0.25)
            .unwrap()
            .with_position(Point3::new(1.0, 2.0, 3.0))
            .with_velocity(Vector3::new(0.0, -1.0, 0.0));

        assert_eq!(body.position.y, 2.0);
        assert_eq!(body.velocity.y, -1.0);
        assert!(body.collider.is_sphere());
        assert_eq!(body.radius, 0.25);
    }
}
