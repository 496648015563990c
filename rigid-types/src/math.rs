//! Small vector-math helpers on top of nalgebra.
//!
//! nalgebra provides the arithmetic; this module adds the two things the
//! engine needs it to be explicit about: normalization that fails instead of
//! returning garbage, and finiteness checks for divergence detection.

use nalgebra::{Point3, Vector3};

use crate::PhysicsError;

/// Length below which a vector has no usable direction.
pub const DEGENERATE_EPSILON: f64 = 1e-12;

/// Speed below which tangential motion is treated as zero (no friction).
pub const TANGENT_EPSILON: f64 = 1e-9;

/// Arbitrary unit normal used when contact geometry is degenerate
/// (e.g. two sphere centers exactly coincide).
#[must_use]
pub fn fallback_normal() -> Vector3<f64> {
    Vector3::z()
}

/// Normalize a vector, failing with [`PhysicsError::DegenerateVector`]
/// when its length is below [`DEGENERATE_EPSILON`].
pub fn normalized(v: &Vector3<f64>) -> crate::Result<Vector3<f64>> {
    let length = v.norm();
    if length < DEGENERATE_EPSILON {
        return Err(PhysicsError::DegenerateVector { length });
    }
    Ok(v / length)
}

/// Check that every component of a vector is finite.
#[must_use]
pub fn vector_is_finite(v: &Vector3<f64>) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Check that every component of a point is finite.
#[must_use]
pub fn point_is_finite(p: &Point3<f64>) -> bool {
    p.coords.iter().all(|x| x.is_finite())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_normalized_unit_result() {
        let v = Vector3::new(3.0, 0.0, 4.0);
        let n = normalized(&v).unwrap();
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.x, 0.6, epsilon = 1e-12);
        assert_relative_eq!(n.z, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_normalized_rejects_zero() {
        let err = normalized(&Vector3::zeros()).unwrap_err();
        assert!(err.is_degenerate());

        let tiny = Vector3::new(1e-15, 0.0, 0.0);
        assert!(normalized(&tiny).is_err());
    }

    #[test]
    fn test_fallback_normal_is_unit_z() {
        let n = fallback_normal();
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_finiteness_checks() {
        assert!(vector_is_finite(&Vector3::new(1.0, 2.0, 3.0)));
        assert!(!vector_is_finite(&Vector3::new(f64::NAN, 0.0, 0.0)));
        assert!(point_is_finite(&Point3::origin()));
        assert!(!point_is_finite(&Point3::new(0.0, f64::INFINITY, 0.0)));
    }
}
