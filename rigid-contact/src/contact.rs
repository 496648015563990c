//! Narrow-phase contact generation.
//!
//! Each generator takes collision geometry in world space and produces at
//! most one [`Contact`] describing where and how deeply two shapes overlap.
//! By convention the contact normal points from the second shape toward the
//! first (for boundaries: into the body), so applying a positive impulse
//! along the normal separates the pair.
//!
//! # Contact Conventions
//!
//! - `penetration > 0` means the shapes overlap; `None` means they do not.
//! - `normal` is always unit length.
//! - `point` lies inside the overlap region: for a sphere pair it is the
//!   second sphere's surface point along the normal, for boundaries the
//!   sphere's surface point nearest the boundary.

use nalgebra::{Point3, Vector3};
use rigid_types::math;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single point of contact between two shapes.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use rigid_contact::sphere_sphere;
///
/// // Two unit spheres whose centers are 1.5 apart overlap by 0.5.
/// let contact = sphere_sphere(
///     Point3::new(0.0, 0.0, 1.5), 1.0,
///     Point3::new(0.0, 0.0, 0.0), 1.0,
/// )
/// .unwrap()
/// .unwrap();
///
/// assert!((contact.penetration - 0.5).abs() < 1e-12);
/// assert!((contact.normal.z - 1.0).abs() < 1e-12);
/// assert!((contact.point.z - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Contact {
    /// Contact point in world space, inside the overlap region.
    pub point: Point3<f64>,
    /// Unit normal pointing from the second shape toward the first.
    pub normal: Vector3<f64>,
    /// Overlap depth (always positive for a generated contact).
    pub penetration: f64,
}

impl Contact {
    /// Create a contact from its components.
    #[must_use]
    pub fn new(point: Point3<f64>, normal: Vector3<f64>, penetration: f64) -> Self {
        Self {
            point,
            normal,
            penetration,
        }
    }

    /// The same contact viewed from the other body (normal reversed).
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
            penetration: self.penetration,
        }
    }

    /// Split a relative velocity into its normal and tangential parts.
    ///
    /// Returns `(normal_speed, tangential)` where `normal_speed` is the
    /// signed speed along the contact normal (negative = approaching) and
    /// `tangential` is the in-plane sliding velocity.
    #[must_use]
    pub fn decompose_velocity(&self, relative_velocity: &Vector3<f64>) -> (f64, Vector3<f64>) {
        let normal_speed = relative_velocity.dot(&self.normal);
        let tangential = relative_velocity - self.normal * normal_speed;
        (normal_speed, tangential)
    }

    /// Whether all components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        math::point_is_finite(&self.point)
            && math::vector_is_finite(&self.normal)
            && self.penetration.is_finite()
    }
}

/// Sphere-sphere contact.
///
/// Returns `Ok(None)` when the spheres are separated or exactly touching
/// (`distance >= ra + rb`). Returns [`PhysicsError::DegenerateVector`]
/// when the centers coincide and no contact normal exists; callers that
/// must produce a contact anyway can substitute [`math::fallback_normal`].
///
/// [`PhysicsError::DegenerateVector`]: rigid_types::PhysicsError::DegenerateVector
pub fn sphere_sphere(
    center_a: Point3<f64>,
    radius_a: f64,
    center_b: Point3<f64>,
    radius_b: f64,
) -> rigid_types::Result<Option<Contact>> {
    let offset = center_a - center_b;
    let distance = offset.norm();
    let sum = radius_a + radius_b;

    if distance >= sum {
        return Ok(None);
    }

    // Coincident centers have no direction to separate along.
    let normal = math::normalized(&offset)?;
    let penetration = sum - distance;
    let point = center_b + normal * radius_b;

    Ok(Some(Contact::new(point, normal, penetration)))
}

/// Sphere against a half-space boundary.
///
/// The plane is the set `normal · x = offset`, with `normal` (unit length)
/// pointing into the allowed region. Returns `None` when the sphere is
/// fully inside the allowed region; the returned normal points from the
/// boundary into the body.
#[must_use]
pub fn sphere_plane(
    center: Point3<f64>,
    radius: f64,
    plane_normal: Vector3<f64>,
    plane_offset: f64,
) -> Option<Contact> {
    let signed_distance = plane_normal.dot(&center.coords) - plane_offset;
    let penetration = radius - signed_distance;

    if penetration <= 0.0 {
        return None;
    }

    let point = center - plane_normal * radius;
    Some(Contact::new(point, plane_normal, penetration))
}

/// Sphere against a solid axis-aligned box.
///
/// `half_extents` are the box's half side lengths along each axis. The
/// returned normal points from the box surface into the sphere. Handles
/// both the shallow case (center outside the box) and the deep case
/// (center inside the box, pushed out through the nearest face).
#[must_use]
pub fn sphere_box(
    center: Point3<f64>,
    radius: f64,
    box_center: Point3<f64>,
    half_extents: Vector3<f64>,
) -> Option<Contact> {
    let local = center - box_center;
    let closest = Vector3::new(
        local.x.clamp(-half_extents.x, half_extents.x),
        local.y.clamp(-half_extents.y, half_extents.y),
        local.z.clamp(-half_extents.z, half_extents.z),
    );
    let delta = local - closest;
    let distance_sq = delta.norm_squared();

    if distance_sq > math::DEGENERATE_EPSILON * math::DEGENERATE_EPSILON {
        // Center is outside the box: contact along the closest-point axis.
        let distance = distance_sq.sqrt();
        if distance >= radius {
            return None;
        }
        let normal = delta / distance;
        let point = box_center + closest;
        return Some(Contact::new(point, normal, radius - distance));
    }

    // Center is inside the box: push out through the nearest face.
    let face_distances = [
        (half_extents.x - local.x.abs(), 0),
        (half_extents.y - local.y.abs(), 1),
        (half_extents.z - local.z.abs(), 2),
    ];
    let (least, axis) = face_distances
        .iter()
        .copied()
        .fold((f64::INFINITY, 0), |best, cur| {
            if cur.0 < best.0 {
                cur
            } else {
                best
            }
        });

    let mut normal = Vector3::zeros();
    let component = local[axis];
    normal[axis] = if component >= 0.0 { 1.0 } else { -1.0 };
    let penetration = least + radius;
    let point = center - normal * radius;

    Some(Contact::new(point, normal, penetration))
}
