//! Broad-phase collision detection over bounding spheres.
//!
//! The broad phase conservatively rejects pairs that cannot possibly touch
//! so the narrow phase only runs on plausible candidates. Every dynamic
//! body carries a bounding radius; static boundaries (planes, boxes) are
//! tested against the body's bounding sphere directly.
//!
//! # Scale
//!
//! Pair enumeration is brute-force O(n²), which is the right trade for the
//! body counts this engine targets (tens of bodies). A sort-and-sweep pass
//! would only pay for itself well past that range.

use nalgebra::{Point3, Vector3};

/// Whether two bounding spheres overlap.
///
/// Uses a strict inequality: spheres that exactly touch are not a
/// candidate pair, mirroring the narrow phase's treatment of touching
/// shapes as non-contact.
#[must_use]
pub fn bounding_sphere_overlap(
    center_a: Point3<f64>,
    radius_a: f64,
    center_b: Point3<f64>,
    radius_b: f64,
) -> bool {
    let sum = radius_a + radius_b;
    (center_a - center_b).norm_squared() < sum * sum
}

/// Whether a bounding sphere reaches past a half-space boundary.
///
/// The plane is `normal · x = offset` with `normal` pointing into the
/// allowed region.
#[must_use]
pub fn halfspace_overlap(
    center: Point3<f64>,
    bounding_radius: f64,
    plane_normal: Vector3<f64>,
    plane_offset: f64,
) -> bool {
    plane_normal.dot(&center.coords) - plane_offset < bounding_radius
}

/// Whether a bounding sphere overlaps an axis-aligned box.
#[must_use]
pub fn box_overlap(
    center: Point3<f64>,
    bounding_radius: f64,
    box_center: Point3<f64>,
    half_extents: Vector3<f64>,
) -> bool {
    let local = center - box_center;
    let closest = Vector3::new(
        local.x.clamp(-half_extents.x, half_extents.x),
        local.y.clamp(-half_extents.y, half_extents.y),
        local.z.clamp(-half_extents.z, half_extents.z),
    );
    (local - closest).norm_squared() < bounding_radius * bounding_radius
}
