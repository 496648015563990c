//! Contact generation and impulse-based collision response.
//!
//! This crate implements the narrow phase and the contact solver for the
//! rigid-body stack:
//!
//! - [`Contact`] - a single world-space contact point with normal and depth
//! - [`sphere_sphere`], [`sphere_plane`], [`sphere_box`] - contact generators
//! - [`resolve_collision`] - restitution + Coulomb friction impulse pair
//! - [`correct_positions`] - Baumgarte-style positional de-penetration
//!
//! # Solver Model
//!
//! The velocity response is a classic impulse exchange:
//!
//! ```text
//! j = -(1 + e) * v_n / (1/m_a + 1/m_b)
//! ```
//!
//! Where:
//! - `v_n` = relative velocity along the contact normal (negative = approaching)
//! - `e` = coefficient of restitution
//!
//! Friction applies a tangential impulse clamped to the Coulomb cone
//! `min(mu * j, |v_t| / (1/m_a + 1/m_b))`, so it can stop sliding but never
//! reverse it. Residual overlap is handled by a separate positional pass
//! (a fraction of penetration beyond a small slop), which keeps resting
//! contacts from jittering without injecting kinetic energy.
//!
//! # Example
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use rigid_contact::{resolve_collision, sphere_plane};
//! use rigid_types::RigidBody;
//!
//! let mut ball = RigidBody::solid_sphere(1.0, 0.5)
//!     .unwrap()
//!     .with_position(Point3::new(0.0, 0.0, 0.45))
//!     .with_velocity(Vector3::new(0.0, 0.0, -4.0));
//! let mut floor = RigidBody::new_static(Point3::origin());
//!
//! let contact = sphere_plane(ball.position, 0.5, Vector3::z(), 0.0).unwrap();
//! resolve_collision(&mut ball, &mut floor, &contact, 0.5, 0.0);
//!
//! // The ball rebounds with half its approach speed.
//! assert!((ball.velocity.z - 2.0).abs() < 1e-12);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]

mod contact;
mod solver;

pub use contact::{sphere_box, sphere_plane, sphere_sphere, Contact};
pub use solver::{correct_positions, resolve_collision};
