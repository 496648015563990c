//! Collision geometry attached to bodies.

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Collision geometry for contact detection.
///
/// Dynamic bodies are spheres; planes and axis-aligned boxes exist only as
/// static boundaries (a floor, walls of a container, a fixed obstacle).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Collider {
    /// Sphere with given radius, centered at the body position.
    Sphere {
        /// Sphere radius in length units.
        radius: f64,
    },
    /// Halfspace boundary. The allowed region is `normal · x >= offset`;
    /// `normal` is the inward unit normal pointing into the simulation domain.
    Plane {
        /// Inward unit normal of the boundary.
        normal: Vector3<f64>,
        /// Signed distance of the plane from the origin along the normal.
        offset: f64,
    },
    /// Axis-aligned box obstacle centered at the body position.
    Box {
        /// Half-extents of the box on each axis.
        half_extents: Vector3<f64>,
    },
}

impl Collider {
    /// Create a sphere collider.
    #[must_use]
    pub fn sphere(radius: f64) -> Self {
        Self::Sphere { radius }
    }

    /// Create a ground plane (Z-up) at the given height.
    #[must_use]
    pub fn ground_plane(height: f64) -> Self {
        Self::Plane {
            normal: Vector3::z(),
            offset: height,
        }
    }

    /// Create a plane boundary with a custom inward normal.
    ///
    /// The normal is renormalized; callers should not pass a near-zero vector.
    #[must_use]
    pub fn plane(normal: Vector3<f64>, offset: f64) -> Self {
        Self::Plane {
            normal: normal.normalize(),
            offset,
        }
    }

    /// Create an axis-aligned box collider.
    #[must_use]
    pub fn box_shape(half_extents: Vector3<f64>) -> Self {
        Self::Box { half_extents }
    }

    /// Bounding sphere radius for broad-phase culling.
    ///
    /// Planes are unbounded; the world-side bounding radius supplied at
    /// `add_body` is used for them instead.
    #[must_use]
    pub fn bounding_radius(&self) -> f64 {
        match self {
            Self::Sphere { radius } => *radius,
            Self::Plane { .. } => f64::INFINITY,
            Self::Box { half_extents } => half_extents.norm(),
        }
    }

    /// Check whether this collider is a sphere.
    #[must_use]
    pub fn is_sphere(&self) -> bool {
        matches!(self, Self::Sphere { .. })
    }
}
