//! Simulation world container and the per-tick step pipeline.
//!
//! The [`World`] owns every body in the scene, stored in a slot arena
//! indexed by stable [`BodyHandle`]s, and advances the simulation with
//! [`World::step`]. One tick runs a fixed pipeline:
//!
//! 1. integrate forces into velocities and positions (semi-implicit);
//! 2. broad phase: enumerate candidate pairs by bounding volume;
//! 3. narrow phase: generate at most one contact per candidate pair;
//! 4. velocity resolution: a fixed number of impulse passes over the
//!    contact set;
//! 5. positional correction: one de-penetration pass per contact per
//!    solver iteration, against a tracked (not re-measured) penetration.
//!
//! The contact set is generated once per tick and held fixed across the
//! velocity passes. Regenerating it between passes would be more accurate
//! for deep multi-body pileups but costs a narrow phase per iteration; a
//! fixed set is the standard sequential-impulse approximation.

use hashbrown::HashMap;
use nalgebra::Vector3;
use rigid_contact::{correct_positions, resolve_collision, sphere_box, sphere_plane, sphere_sphere, Contact};
use rigid_types::{math, AppliedForce, Collider, PhysicsError, RigidBody, WorldConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable handle to a body in a [`World`].
///
/// Handles are valid for the lifetime of the body they were issued for.
/// Removing a body retires its slot permanently, so a stale handle fails
/// with [`PhysicsError::InvalidHandle`] instead of silently aliasing a
/// newer body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// The arena slot this handle refers to.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A body plus its broad-phase bounding radius.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct StoredBody {
    body: RigidBody,
    bounding_radius: f64,
}

/// The simulation world.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use rigid_core::World;
/// use rigid_types::RigidBody;
///
/// let mut world = World::default();
/// world.add_body(RigidBody::new_static(Point3::origin()), 0.0);
/// let ball = world.add_body(
///     RigidBody::solid_sphere(1.0, 0.5)
///         .unwrap()
///         .with_position(Point3::new(0.0, 0.0, 5.0)),
///     0.5,
/// );
///
/// for _ in 0..60 {
///     world.step(1.0 / 60.0).unwrap();
/// }
///
/// // The ball has fallen under gravity.
/// assert!(world.body(ball).unwrap().position.z < 5.0);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct World {
    config: WorldConfig,
    bodies: Vec<Option<StoredBody>>,
    names: HashMap<String, BodyHandle>,
    time: f64,
    step_count: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::with_config(WorldConfig::default())
    }
}

impl World {
    /// Create a world after validating its configuration.
    ///
    /// # Errors
    ///
    /// Returns the validation error for an out-of-range configuration.
    pub fn new(config: WorldConfig) -> rigid_types::Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Create a world from a configuration without validating it.
    #[must_use]
    pub fn with_config(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: Vec::new(),
            names: HashMap::new(),
            time: 0.0,
            step_count: 0,
        }
    }

    /// The world's configuration.
    #[must_use]
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Add a body and get back its handle.
    ///
    /// `bounding_radius` is the broad-phase radius around the body's
    /// position; it should enclose the body's collider. For boundary
    /// bodies (planes, boxes) it is unused and may be zero.
    pub fn add_body(&mut self, body: RigidBody, bounding_radius: f64) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len());
        self.bodies.push(Some(StoredBody {
            body,
            bounding_radius,
        }));
        handle
    }

    /// Add a body under a name for later lookup.
    pub fn insert_named_body(
        &mut self,
        name: impl Into<String>,
        body: RigidBody,
        bounding_radius: f64,
    ) -> BodyHandle {
        let handle = self.add_body(body, bounding_radius);
        self.names.insert(name.into(), handle);
        handle
    }

    /// Look up a body by handle.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidHandle`] for a never-issued or
    /// retired handle.
    pub fn body(&self, handle: BodyHandle) -> rigid_types::Result<&RigidBody> {
        self.bodies
            .get(handle.0)
            .and_then(Option::as_ref)
            .map(|stored| &stored.body)
            .ok_or(PhysicsError::InvalidHandle(handle.0))
    }

    /// Mutable access to a body.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidHandle`] for a never-issued or
    /// retired handle.
    pub fn body_mut(&mut self, handle: BodyHandle) -> rigid_types::Result<&mut RigidBody> {
        self.bodies
            .get_mut(handle.0)
            .and_then(Option::as_mut)
            .map(|stored| &mut stored.body)
            .ok_or(PhysicsError::InvalidHandle(handle.0))
    }

    /// Look up a named body's handle.
    #[must_use]
    pub fn body_by_name(&self, name: &str) -> Option<BodyHandle> {
        self.names.get(name).copied()
    }

    /// Remove a body, returning it.
    ///
    /// The slot is retired, never reused: handles issued later keep their
    /// meaning and the removed handle fails on every subsequent use.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidHandle`] for a never-issued or
    /// already-retired handle.
    pub fn remove_body(&mut self, handle: BodyHandle) -> rigid_types::Result<RigidBody> {
        let stored = self
            .bodies
            .get_mut(handle.0)
            .and_then(Option::take)
            .ok_or(PhysicsError::InvalidHandle(handle.0))?;
        self.names.retain(|_, h| *h != handle);
        Ok(stored.body)
    }

    /// Iterate over the live bodies with their handles.
    pub fn bodies(&self) -> impl Iterator<Item = (BodyHandle, &RigidBody)> {
        self.bodies
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|stored| (BodyHandle(i), &stored.body)))
    }

    /// Number of live bodies.
    #[must_use]
    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|slot| slot.is_some()).count()
    }

    /// Accumulated simulation time in seconds.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Number of completed steps.
    #[must_use]
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Advance the simulation by `dt` seconds under gravity alone.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::InvalidTimestep`] for a non-finite or
    /// non-positive `dt`, or [`PhysicsError::InvalidMass`] if a body's
    /// mass was corrupted since insertion.
    pub fn step(&mut self, dt: f64) -> rigid_types::Result<()> {
        self.step_with_forces(dt, |_, _| Vector3::zeros())
    }

    /// Advance the simulation with an extra per-body force on top of
    /// gravity.
    ///
    /// `extra_force` is called once per dynamic body per tick and can
    /// implement drag, springs, or control inputs. Gravity is applied by
    /// the world; the callback returns only the additional force.
    ///
    /// # Errors
    ///
    /// Same as [`World::step`].
    pub fn step_with_forces<F>(&mut self, dt: f64, mut extra_force: F) -> rigid_types::Result<()>
    where
        F: FnMut(BodyHandle, &RigidBody) -> Vector3<f64>,
    {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(dt));
        }

        // 1. Integrate forces.
        let gravity = self.config.gravity;
        for (index, slot) in self.bodies.iter_mut().enumerate() {
            let Some(stored) = slot.as_mut() else {
                continue;
            };
            if stored.body.is_static {
                continue;
            }
            let extra = extra_force(BodyHandle(index), &stored.body);
            stored
                .body
                .integrate_velocity_verlet(|body| AppliedForce::linear(gravity * body.mass + extra), dt)?;
            debug_assert!(stored.body.is_finite(), "body {index} diverged during integration");
        }

        // 2-3. Candidate pairs, then contacts.
        let mut contacts = self.generate_contacts();

        // 4-5. Fixed-count velocity and positional passes over a fixed
        // contact set. The positional pass runs once per solver iteration;
        // each pass deducts the separation it applied from the contact's
        // tracked penetration rather than re-measuring the geometry, so
        // resting bodies converge to within slop of the surface instead of
        // reaching equilibrium one gravity-tick of penetration deeper.
        let WorldConfig {
            restitution,
            friction,
            correction_fraction,
            slop,
            ..
        } = self.config;
        for _ in 0..self.config.solver_iterations {
            for (first, second, contact) in &contacts {
                let (body_a, body_b) = self.pair_mut(*first, *second);
                resolve_collision(body_a, body_b, contact, restitution, friction);
            }
            for (first, second, contact) in &mut contacts {
                let (body_a, body_b) = self.pair_mut(*first, *second);
                let applied =
                    correct_positions(body_a, body_b, contact, correction_fraction, slop);
                contact.penetration -= applied;
            }
        }

        self.time += dt;
        self.step_count += 1;
        Ok(())
    }

    /// Check every body for non-finite state.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::Diverged`] naming the first bad body.
    pub fn validate(&self) -> rigid_types::Result<()> {
        for (handle, body) in self.bodies() {
            if !body.is_finite() {
                return Err(PhysicsError::diverged(format!(
                    "body {} has non-finite position or velocity",
                    handle.index()
                )));
            }
        }
        Ok(())
    }

    /// Sum of the kinetic energy of every dynamic body.
    #[must_use]
    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies().map(|(_, body)| body.kinetic_energy()).sum()
    }

    /// Sum of the linear momentum of every dynamic body.
    #[must_use]
    pub fn total_linear_momentum(&self) -> Vector3<f64> {
        self.bodies()
            .map(|(_, body)| body.linear_momentum())
            .sum()
    }

    /// Run the broad and narrow phases, producing this tick's contact set.
    ///
    /// Each entry is `(first, second, contact)` with the contact normal
    /// pointing from `second` toward `first`; the pair is ordered so a
    /// sphere comes first against a boundary collider.
    fn generate_contacts(&self) -> Vec<(usize, usize, Contact)> {
        let mut contacts = Vec::new();

        for i in 0..self.bodies.len() {
            let Some(stored_i) = &self.bodies[i] else {
                continue;
            };
            for j in (i + 1)..self.bodies.len() {
                let Some(stored_j) = &self.bodies[j] else {
                    continue;
                };
                if stored_i.body.is_static && stored_j.body.is_static {
                    continue;
                }
                if !Self::broad_overlap(stored_i, stored_j) {
                    continue;
                }
                if let Some((first, second, contact)) =
                    Self::narrow_contact(i, stored_i, j, stored_j)
                {
                    contacts.push((first, second, contact));
                }
            }
        }

        contacts
    }

    /// Conservative bounding-volume test for one pair.
    fn broad_overlap(a: &StoredBody, b: &StoredBody) -> bool {
        use crate::broad_phase::{bounding_sphere_overlap, box_overlap, halfspace_overlap};

        match (&a.body.collider, &b.body.collider) {
            (Collider::Sphere { .. }, Collider::Sphere { .. }) => bounding_sphere_overlap(
                a.body.position,
                a.bounding_radius,
                b.body.position,
                b.bounding_radius,
            ),
            (Collider::Sphere { .. }, Collider::Plane { normal, offset }) => {
                halfspace_overlap(a.body.position, a.bounding_radius, *normal, *offset)
            }
            (Collider::Plane { normal, offset }, Collider::Sphere { .. }) => {
                halfspace_overlap(b.body.position, b.bounding_radius, *normal, *offset)
            }
            (Collider::Sphere { .. }, Collider::Box { half_extents }) => box_overlap(
                a.body.position,
                a.bounding_radius,
                b.body.position,
                *half_extents,
            ),
            (Collider::Box { half_extents }, Collider::Sphere { .. }) => box_overlap(
                b.body.position,
                b.bounding_radius,
                a.body.position,
                *half_extents,
            ),
            // Boundary colliders never collide with each other.
            _ => false,
        }
    }

    /// Narrow-phase dispatch for one candidate pair.
    ///
    /// A narrow-phase fault never aborts the tick: coincident sphere
    /// centers get a fallback `+Z` contact (the bodies must separate
    /// somehow, and up is the only unbiased choice under gravity), any
    /// other fault is treated as no contact.
    fn narrow_contact(
        i: usize,
        stored_i: &StoredBody,
        j: usize,
        stored_j: &StoredBody,
    ) -> Option<(usize, usize, Contact)> {
        let body_i = &stored_i.body;
        let body_j = &stored_j.body;

        match (&body_i.collider, &body_j.collider) {
            (Collider::Sphere { radius: ra }, Collider::Sphere { radius: rb }) => {
                match sphere_sphere(body_i.position, *ra, body_j.position, *rb) {
                    Ok(Some(contact)) => Some((i, j, contact)),
                    Ok(None) => None,
                    Err(err) if err.is_degenerate() => {
                        let overlap = ra + rb;
                        let contact =
                            Contact::new(body_i.position, math::fallback_normal(), overlap);
                        Some((i, j, contact))
                    }
                    Err(_) => None,
                }
            }
            (Collider::Sphere { radius }, Collider::Plane { normal, offset }) => {
                sphere_plane(body_i.position, *radius, *normal, *offset)
                    .map(|contact| (i, j, contact))
            }
            (Collider::Plane { normal, offset }, Collider::Sphere { radius }) => {
                sphere_plane(body_j.position, *radius, *normal, *offset)
                    .map(|contact| (j, i, contact))
            }
            (Collider::Sphere { radius }, Collider::Box { half_extents }) => {
                sphere_box(body_i.position, *radius, body_j.position, *half_extents)
                    .map(|contact| (i, j, contact))
            }
            (Collider::Box { half_extents }, Collider::Sphere { radius }) => {
                sphere_box(body_j.position, *radius, body_i.position, *half_extents)
                    .map(|contact| (j, i, contact))
            }
            _ => None,
        }
    }

    /// Mutable access to two distinct slots at once.
    ///
    /// Both slots are known live: the indices come from this tick's
    /// contact set and bodies are not removed mid-step.
    fn pair_mut(&mut self, first: usize, second: usize) -> (&mut RigidBody, &mut RigidBody) {
        let (low, high, swapped) = if first < second {
            (first, second, false)
        } else {
            (second, first, true)
        };
        let (head, tail) = self.bodies.split_at_mut(high);
        let (slot_low, slot_high) = (&mut head[low], &mut tail[0]);
        match (slot_low, slot_high) {
            (Some(stored_low), Some(stored_high)) => {
                if swapped {
                    (&mut stored_high.body, &mut stored_low.body)
                } else {
                    (&mut stored_low.body, &mut stored_high.body)
                }
            }
            _ => unreachable!("contact refers to a retired body slot"),
        }
    }
}
