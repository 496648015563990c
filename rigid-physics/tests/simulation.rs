//! Integration tests for the full simulation stack.
//!
//! These exercise whole-world behavior through the public API: conservation
//! properties of the impulse solver, resting stability on boundaries, and
//! determinism of repeated runs.

use approx::assert_relative_eq;
use rigid_physics::prelude::*;

const DT: f64 = 1.0 / 60.0;

fn ball(mass: f64, radius: f64, position: Point3<f64>, velocity: Vector3<f64>) -> RigidBody {
    RigidBody::solid_sphere(mass, radius)
        .unwrap()
        .with_position(position)
        .with_velocity(velocity)
}

/// Two equal spheres on a collision course in zero gravity.
fn head_on_world(restitution: f64, friction: f64) -> (World, BodyHandle, BodyHandle) {
    let config = WorldConfig::default()
        .zero_gravity()
        .materials(restitution, friction);
    let mut world = World::new(config).unwrap();
    let left = world.add_body(
        ball(
            1.0,
            0.5,
            Point3::new(-0.6, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
        ),
        0.5,
    );
    let right = world.add_body(
        ball(
            1.0,
            0.5,
            Point3::new(0.6, 0.0, 0.0),
            Vector3::new(-2.0, 0.0, 0.0),
        ),
        0.5,
    );
    (world, left, right)
}

// ============================================================================
// Conservation properties
// ============================================================================

#[test]
fn elastic_head_on_collision_swaps_velocities() {
    let (mut world, left, right) = head_on_world(1.0, 0.0);

    // Step until the spheres have collided and separated again.
    for _ in 0..30 {
        world.step(DT).unwrap();
    }

    let left_body = world.body(left).unwrap();
    let right_body = world.body(right).unwrap();
    assert_relative_eq!(left_body.velocity.x, -2.0, epsilon = 1e-9);
    assert_relative_eq!(right_body.velocity.x, 2.0, epsilon = 1e-9);
    // No energy entered the system.
    assert_relative_eq!(world.total_kinetic_energy(), 4.0, epsilon = 1e-9);
}

#[test]
fn momentum_is_conserved_through_collisions() {
    let config = WorldConfig::default().zero_gravity().materials(0.7, 0.3);
    let mut world = World::new(config).unwrap();
    world.add_body(
        ball(
            2.0,
            0.5,
            Point3::new(-1.0, 0.1, 0.0),
            Vector3::new(3.0, 0.0, 0.0),
        ),
        0.5,
    );
    world.add_body(
        ball(
            5.0,
            0.5,
            Point3::new(1.0, -0.1, 0.0),
            Vector3::new(-1.0, 0.5, 0.0),
        ),
        0.5,
    );

    let before = world.total_linear_momentum();
    for _ in 0..120 {
        world.step(DT).unwrap();
    }
    let after = world.total_linear_momentum();

    assert_relative_eq!(before, after, epsilon = 1e-9);
}

#[test]
fn inelastic_collision_never_gains_energy() {
    let (mut world, _, _) = head_on_world(0.5, 0.0);

    let mut previous = world.total_kinetic_energy();
    for _ in 0..60 {
        world.step(DT).unwrap();
        let current = world.total_kinetic_energy();
        assert!(
            current <= previous + 1e-9,
            "kinetic energy rose from {previous} to {current}"
        );
        previous = current;
    }

    // With e = 0.5 the collision must have dissipated something.
    assert!(world.total_kinetic_energy() < 4.0 - 1e-6);
}

// ============================================================================
// Boundaries and resting behavior
// ============================================================================

#[test]
fn dropped_ball_settles_on_floor() {
    let config = WorldConfig::default().materials(0.2, 0.3);
    let mut world = World::new(config).unwrap();
    world.add_body(RigidBody::new_static(Point3::origin()), 0.0);
    let handle = world.add_body(
        ball(1.0, 0.5, Point3::new(0.0, 0.0, 3.0), Vector3::zeros()),
        0.5,
    );

    for _ in 0..900 {
        world.step(DT).unwrap();
    }
    world.validate().unwrap();

    let body = world.body(handle).unwrap();
    let slop = world.config().slop;
    // Gravity re-sinks the ball by g*dt^2 each tick before the correction
    // passes trim the excess; the steady state is within a fraction of a
    // millimeter of radius - slop.
    assert!(
        body.position.z >= 0.5 - slop - 1e-3,
        "ball sank into the floor: z = {}",
        body.position.z
    );
    assert!(
        body.position.z <= 0.6,
        "ball failed to settle: z = {}",
        body.position.z
    );
    assert!(
        body.velocity.norm() < 0.5,
        "ball still moving: |v| = {}",
        body.velocity.norm()
    );
}

#[test]
fn static_bodies_never_move() {
    let mut world = World::default();
    let floor = world.add_body(RigidBody::new_static(Point3::origin()), 0.0);
    let post = world.add_body(
        RigidBody::new_static(Point3::new(2.0, 0.0, 0.5)).with_collider(Collider::sphere(0.5)),
        0.5,
    );
    world.add_body(
        ball(1.0, 0.5, Point3::new(2.0, 0.0, 2.0), Vector3::zeros()),
        0.5,
    );

    let floor_before = world.body(floor).unwrap().clone();
    let post_before = world.body(post).unwrap().clone();

    // The ball lands dead-center on the static post and comes to rest on
    // it; neither static body may move by a single bit.
    for _ in 0..600 {
        world.step(DT).unwrap();
    }

    let floor_after = world.body(floor).unwrap();
    let post_after = world.body(post).unwrap();
    assert_eq!(floor_before.position, floor_after.position);
    assert_eq!(floor_before.velocity, floor_after.velocity);
    assert_eq!(post_before.position, post_after.position);
    assert_eq!(post_before.velocity, post_after.velocity);
}

#[test]
fn friction_slows_a_sliding_ball() {
    let mut world = World::default();
    world.add_body(RigidBody::new_static(Point3::origin()), 0.0);
    let handle = world.add_body(
        ball(
            1.0,
            0.5,
            Point3::new(0.0, 0.0, 0.5),
            Vector3::new(4.0, 0.0, 0.0),
        ),
        0.5,
    );

    for _ in 0..300 {
        world.step(DT).unwrap();
    }

    let body = world.body(handle).unwrap();
    assert!(
        body.velocity.x < 4.0,
        "friction had no effect: vx = {}",
        body.velocity.x
    );
    assert!(body.velocity.x >= 0.0, "friction reversed the slide");
}

// ============================================================================
// Contact geometry
// ============================================================================

#[test]
fn unit_sphere_contact_geometry() {
    // Two unit spheres with centers 1.5 apart along Z.
    let contact = sphere_sphere(
        Point3::new(0.0, 0.0, 1.5),
        1.0,
        Point3::new(0.0, 0.0, 0.0),
        1.0,
    )
    .unwrap()
    .unwrap();

    assert_relative_eq!(contact.penetration, 0.5, epsilon = 1e-12);
    assert_relative_eq!(contact.normal, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    assert_relative_eq!(contact.point, Point3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
}

#[test]
fn broad_phase_never_misses_a_narrow_contact() {
    use rigid_core::broad_phase::bounding_sphere_overlap;

    // Sweep one sphere past another; wherever the narrow phase reports a
    // contact the broad phase must have reported the pair, and wherever
    // the broad phase rejects the pair the narrow phase must agree.
    let center_a = Point3::new(0.0, 0.0, 0.0);
    for i in 0..200 {
        let x = -3.0 + 0.03 * f64::from(i);
        let center_b = Point3::new(x, 0.4, 0.1);
        let narrow = sphere_sphere(center_a, 1.0, center_b, 0.7).unwrap();
        let broad = bounding_sphere_overlap(center_a, 1.0, center_b, 0.7);
        if narrow.is_some() {
            assert!(broad, "narrow contact at x = {x} without broad-phase overlap");
        }
        if !broad {
            assert!(narrow.is_none(), "broad-phase rejected a contact at x = {x}");
        }
    }
}

// ============================================================================
// Determinism
// ============================================================================

fn seeded_world() -> World {
    let mut world = World::default();
    world.add_body(RigidBody::new_static(Point3::origin()), 0.0);
    for i in 0..8 {
        let x = f64::from(i % 4) * 1.1 - 1.6;
        let z = 1.0 + f64::from(i / 4) * 1.3;
        world.add_body(
            ball(
                1.0 + f64::from(i) * 0.25,
                0.5,
                Point3::new(x, 0.2 * f64::from(i), z),
                Vector3::new(-0.3 * f64::from(i), 0.1, 0.0),
            ),
            0.5,
        );
    }
    world
}

#[test]
fn identical_runs_are_bit_identical() {
    let mut first = seeded_world();
    let mut second = seeded_world();

    for _ in 0..300 {
        first.step(DT).unwrap();
        second.step(DT).unwrap();
    }

    for ((_, body_a), (_, body_b)) in first.bodies().zip(second.bodies()) {
        assert_eq!(body_a.position, body_b.position);
        assert_eq!(body_a.velocity, body_b.velocity);
    }
    assert_eq!(first.step_count(), second.step_count());
}

#[test]
fn extra_forces_apply_on_top_of_gravity() {
    let config = WorldConfig::default().zero_gravity();
    let mut world = World::new(config).unwrap();
    let handle = world.add_body(
        ball(2.0, 0.5, Point3::origin(), Vector3::zeros()),
        0.5,
    );

    // Constant 1 N along +Y on a 2 kg body for one second.
    for _ in 0..60 {
        world
            .step_with_forces(DT, |_, _| Vector3::new(0.0, 1.0, 0.0))
            .unwrap();
    }

    let body = world.body(handle).unwrap();
    assert_relative_eq!(body.velocity.y, 0.5, epsilon = 1e-9);
}
