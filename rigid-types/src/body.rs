//! Rigid body state and velocity integration.
//!
//! A body here is a particle-sphere: position, linear velocity, mass, and a
//! collider. There is no orientation and no angular velocity; rotational
//! dynamics is outside the engine's scope.

use nalgebra::{Point3, Vector3};

use crate::math::{point_is_finite, vector_is_finite};
use crate::{Collider, PhysicsError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Force (and torque, for API symmetry) applied to a body for one step.
///
/// The torque component is accepted so force callbacks keep a stable shape if
/// angular dynamics is ever added, but it has no effect on integration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AppliedForce {
    /// Linear force in world coordinates.
    pub force: Vector3<f64>,
    /// Torque in world coordinates. Unused; see the struct docs.
    pub torque: Vector3<f64>,
}

impl AppliedForce {
    /// Create an applied force with a torque component.
    #[must_use]
    pub const fn new(force: Vector3<f64>, torque: Vector3<f64>) -> Self {
        Self { force, torque }
    }

    /// Create a pure linear force.
    #[must_use]
    pub fn linear(force: Vector3<f64>) -> Self {
        Self {
            force,
            torque: Vector3::zeros(),
        }
    }

    /// No force at all.
    #[must_use]
    pub fn zero() -> Self {
        Self::linear(Vector3::zeros())
    }
}

impl Default for AppliedForce {
    fn default() -> Self {
        Self::zero()
    }
}

/// A simulated rigid body.
///
/// Static bodies have infinite mass, zero velocity forever, and are never
/// mutated by integration or collision response. Dynamic bodies have a
/// strictly positive, finite mass.
///
/// # Example
///
/// ```
/// use rigid_types::RigidBody;
/// use nalgebra::{Point3, Vector3};
///
/// let ball = RigidBody::solid_sphere(1.0, 0.5)
///     .unwrap()
///     .with_position(Point3::new(0.0, 0.0, 10.0))
///     .with_velocity(Vector3::new(1.0, 0.0, 0.0));
/// assert!(!ball.is_static);
/// assert_eq!(ball.inverse_mass(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidBody {
    /// Position of the body center in world coordinates.
    pub position: Point3<f64>,
    /// Linear velocity in world coordinates.
    pub velocity: Vector3<f64>,
    /// Mass in kg; `f64::INFINITY` for static bodies.
    pub mass: f64,
    /// Collider radius for sphere bodies; 0 for boundary bodies.
    pub radius: f64,
    /// Whether this body is an immovable boundary.
    pub is_static: bool,
    /// Collision geometry.
    pub collider: Collider,
}

impl RigidBody {
    /// Create a static boundary body at the given position.
    ///
    /// The default collider is a Z-up ground plane through the position,
    /// matching the most common use (a floor). Use [`with_collider`] for
    /// walls or box obstacles.
    ///
    /// [`with_collider`]: RigidBody::with_collider
    #[must_use]
    pub fn new_static(position: Point3<f64>) -> Self {
        Self {
            position,
            velocity: Vector3::zeros(),
            mass: f64::INFINITY,
            radius: 0.0,
            is_static: true,
            collider: Collider::ground_plane(position.z),
        }
    }

    /// Create a dynamic solid sphere at the origin.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidMass`] unless `0 < mass < ∞`, and
    /// an `InvalidMass` with a radius message unless `radius > 0`.
    pub fn solid_sphere(mass: f64, radius: f64) -> crate::Result<Self> {
        if !(mass > 0.0 && mass.is_finite()) {
            return Err(PhysicsError::invalid_mass(format!(
                "dynamic body mass must be positive and finite, got {mass}"
            )));
        }
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(PhysicsError::invalid_mass(format!(
                "sphere radius must be positive and finite, got {radius}"
            )));
        }
        Ok(Self {
            position: Point3::origin(),
            velocity: Vector3::zeros(),
            mass,
            radius,
            is_static: false,
            collider: Collider::sphere(radius),
        })
    }

    /// Set the position.
    #[must_use]
    pub fn with_position(mut self, position: Point3<f64>) -> Self {
        self.position = position;
        self
    }

    /// Set the initial velocity. Ignored for static bodies.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vector3<f64>) -> Self {
        if !self.is_static {
            self.velocity = velocity;
        }
        self
    }

    /// Replace the collider.
    #[must_use]
    pub fn with_collider(mut self, collider: Collider) -> Self {
        if let Collider::Sphere { radius } = collider {
            self.radius = radius;
        }
        self.collider = collider;
        self
    }

    /// Inverse mass: 0 for static bodies, `1/mass` otherwise.
    #[must_use]
    pub fn inverse_mass(&self) -> f64 {
        if self.is_static || !self.mass.is_finite() {
            0.0
        } else {
            1.0 / self.mass
        }
    }

    /// Kinetic energy `0.5 * m * |v|²`. Zero for static bodies.
    #[must_use]
    pub fn kinetic_energy(&self) -> f64 {
        if self.is_static {
            0.0
        } else {
            0.5 * self.mass * self.velocity.norm_squared()
        }
    }

    /// Linear momentum `m * v`. Zero for static bodies.
    #[must_use]
    pub fn linear_momentum(&self) -> Vector3<f64> {
        if self.is_static {
            Vector3::zeros()
        } else {
            self.velocity * self.mass
        }
    }

    /// Check if position and velocity are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        point_is_finite(&self.position) && vector_is_finite(&self.velocity)
    }

    /// Advance this body by `dt` under the force reported by `force_fn`.
    ///
    /// Semi-implicit (symplectic) ordering: velocity is updated first, then
    /// position uses the new velocity, so an applied force is reflected in
    /// the same step's displacement. For a static body this is a complete
    /// no-op and `force_fn` is never called.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidMass`] for a non-static body whose
    /// mass is not positive and finite; no state is mutated in that case.
    pub fn integrate_velocity_verlet<F>(&mut self, force_fn: F, dt: f64) -> crate::Result<()>
    where
        F: FnOnce(&RigidBody) -> AppliedForce,
    {
        if self.is_static {
            return Ok(());
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(PhysicsError::invalid_mass(format!(
                "cannot integrate body with mass {}",
                self.mass
            )));
        }

        let applied = force_fn(self);
        self.velocity += applied.force * (dt / self.mass);
        self.position += self.velocity * dt;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_solid_sphere_rejects_bad_mass() {
        assert!(RigidBody::solid_sphere(0.0, 0.5).is_err());
        assert!(RigidBody::solid_sphere(-1.0, 0.5).is_err());
        assert!(RigidBody::solid_sphere(f64::INFINITY, 0.5).is_err());
        assert!(RigidBody::solid_sphere(f64::NAN, 0.5).is_err());
        assert!(RigidBody::solid_sphere(1.0, 0.0).is_err());
        assert!(RigidBody::solid_sphere(1.0, -0.5).is_err());
    }

    #[test]
    fn test_static_body_has_zero_inverse_mass() {
        let floor = RigidBody::new_static(Point3::origin());
        assert!(floor.is_static);
        assert_eq!(floor.inverse_mass(), 0.0);
        assert_eq!(floor.linear_momentum(), Vector3::zeros());
        assert_eq!(floor.kinetic_energy(), 0.0);
    }

    #[test]
    fn test_with_velocity_ignored_for_static() {
        let floor =
            RigidBody::new_static(Point3::origin()).with_velocity(Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(floor.velocity, Vector3::zeros());
    }

    #[test]
    fn test_integration_semi_implicit_ordering() {
        // Starting at rest under constant force, the first step's displacement
        // must already reflect the new velocity: p = (f/m * dt) * dt.
        let mut body = RigidBody::solid_sphere(2.0, 0.5).unwrap();
        body.integrate_velocity_verlet(|_| AppliedForce::linear(Vector3::new(0.0, 0.0, -4.0)), 0.5)
            .unwrap();

        assert_relative_eq!(body.velocity.z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(body.position.z, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_integration_noop_for_static() {
        let mut floor = RigidBody::new_static(Point3::new(0.0, 0.0, 1.0));
        floor
            .integrate_velocity_verlet(
                |_| AppliedForce::linear(Vector3::new(0.0, 0.0, -1e9)),
                1.0,
            )
            .unwrap();
        assert_eq!(floor.position, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(floor.velocity, Vector3::zeros());
    }

    #[test]
    fn test_integration_rejects_corrupted_mass_before_mutation() {
        let mut body = RigidBody::solid_sphere(1.0, 0.5).unwrap();
        body.mass = -1.0;
        let before = body.clone();

        let err = body
            .integrate_velocity_verlet(|_| AppliedForce::linear(Vector3::x()), 0.1)
            .unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidMass { .. }));
        assert_eq!(body, before);
    }

    #[test]
    fn test_torque_has_no_effect() {
        let mut with_torque = RigidBody::solid_sphere(1.0, 0.5).unwrap();
        let mut without = with_torque.clone();

        with_torque
            .integrate_velocity_verlet(
                |_| AppliedForce::new(Vector3::x(), Vector3::new(5.0, 5.0, 5.0)),
                0.1,
            )
            .unwrap();
        without
            .integrate_velocity_verlet(|_| AppliedForce::linear(Vector3::x()), 0.1)
            .unwrap();

        assert_eq!(with_torque, without);
    }

    #[test]
    fn test_kinetic_energy_and_momentum() {
        let body = RigidBody::solid_sphere(2.0, 0.5)
            .unwrap()
            .with_velocity(Vector3::new(3.0, 0.0, 0.0));
        assert_relative_eq!(body.kinetic_energy(), 9.0, epsilon = 1e-12);
        assert_relative_eq!(body.linear_momentum().x, 6.0, epsilon = 1e-12);
    }
}
