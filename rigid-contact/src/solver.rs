//! Impulse-based collision response.
//!
//! Given a [`Contact`] between two bodies, the solver applies an equal and
//! opposite impulse that removes the approaching component of their relative
//! velocity (scaled by restitution) and a Coulomb friction impulse that
//! opposes in-plane sliding. A separate positional pass bleeds off residual
//! penetration so resting stacks do not sink.
//!
//! # Determinism
//!
//! The solver is a pure function of its inputs. There is no convergence
//! test and no internal state; calling it repeatedly over a fixed contact
//! set is how the world performs multiple velocity iterations.

use rigid_types::{math, RigidBody};

use crate::Contact;

/// Resolve one contact's relative velocity with an impulse pair.
///
/// The contact normal must point from `body_b` toward `body_a`. Static
/// bodies receive no velocity change; if both bodies are static, or the
/// pair is already separating along the normal, this is a no-op.
///
/// `restitution` in `[0, 1]` controls bounce energy (0 = perfectly
/// inelastic, 1 = elastic). `friction` is the Coulomb coefficient; the
/// tangential impulse is clamped so it can stop sliding but never reverse
/// it.
pub fn resolve_collision(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    contact: &Contact,
    restitution: f64,
    friction: f64,
) {
    let inv_a = body_a.inverse_mass();
    let inv_b = body_b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return;
    }

    let relative_velocity = body_a.velocity - body_b.velocity;
    let (normal_speed, tangential) = contact.decompose_velocity(&relative_velocity);

    // Separating or resting along the normal: nothing to resolve.
    if normal_speed >= 0.0 {
        return;
    }

    let normal_impulse = -(1.0 + restitution) * normal_speed / inv_sum;
    let impulse = contact.normal * normal_impulse;

    if !body_a.is_static {
        body_a.velocity += impulse * inv_a;
    }
    if !body_b.is_static {
        body_b.velocity -= impulse * inv_b;
    }

    let sliding_speed = tangential.norm();
    if sliding_speed <= math::TANGENT_EPSILON || friction <= 0.0 {
        return;
    }

    // Coulomb cone: friction may stop sliding but never reverse it.
    let tangent = tangential / sliding_speed;
    let friction_impulse = (friction * normal_impulse).min(sliding_speed / inv_sum);
    let impulse = tangent * friction_impulse;

    if !body_a.is_static {
        body_a.velocity -= impulse * inv_a;
    }
    if !body_b.is_static {
        body_b.velocity += impulse * inv_b;
    }
}

/// Push overlapping bodies apart by a fraction of the residual penetration.
///
/// Only penetration beyond `slop` is corrected, and only by
/// `correction_fraction` of it, split between the bodies in proportion to
/// their inverse masses. Static bodies never move. Velocities are not
/// touched.
///
/// Returns the relative separation applied along the normal, so a caller
/// running several correction passes over the same contact can deduct the
/// distance already resolved instead of re-measuring the geometry.
pub fn correct_positions(
    body_a: &mut RigidBody,
    body_b: &mut RigidBody,
    contact: &Contact,
    correction_fraction: f64,
    slop: f64,
) -> f64 {
    let inv_a = body_a.inverse_mass();
    let inv_b = body_b.inverse_mass();
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return 0.0;
    }

    let residual = (contact.penetration - slop).max(0.0);
    if residual <= 0.0 {
        return 0.0;
    }

    let separation = residual * correction_fraction;
    let correction = contact.normal * (separation / inv_sum);

    if !body_a.is_static {
        body_a.position += correction * inv_a;
    }
    if !body_b.is_static {
        body_b.position -= correction * inv_b;
    }

    separation
}
