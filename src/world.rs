//! # Physics World
//!
//! Owns every body of a scene and advances them frame by frame.
//!
//! One call to [`PhysicsWorld::step`] runs the whole pipeline:
//!
//! 1. gravity, and body-to-body attraction when configured, is added to the force
//!    accumulator of every free body,
//! 2. the broad phase (an octree rebuilt from scratch, or brute force) proposes pairs,
//! 3. the narrow phase turns intersecting pairs into contacts,
//! 4. contacts are resolved one after the other in the order they were found,
//! 5. every body is integrated and has its forces cleared,
//! 6. bodies that touched something this frame go through the energy damping pass.
//!
//! Contacts are all detected before any of them is resolved, so a body moved by an
//! earlier resolution keeps the contact data computed at the start of the frame.
//!
//! ## Example
//! ```
//! use rs_rigid_body::PhysicsWorld;
//! use rs_rigid_body::models::RigidBody;
//! use rs_rigid_body::utils::SimulationConfig;
//!
//! let mut world = PhysicsWorld::new(SimulationConfig::default()).unwrap();
//! let floor = RigidBody::new_cuboid(10.0, 1.0, 10.0, 1.0, (0.0, -0.5, 0.0), 1.0).unwrap().as_fixed();
//! let ball = RigidBody::new_sphere(0.5, 1.0, (0.0, 3.0, 0.0), 0.8).unwrap();
//! world.add_body(floor);
//! let handle = world.add_body(ball);
//!
//! world.run(100).unwrap();
//! assert!(world.body(handle).unwrap().position.1 < 3.0);
//! ```

use log::{debug, trace};

use crate::broad_phase::{brute_force_collisions, BodyProxy, CollisionQuery, Octree};
#[cfg(feature = "damping")]
use crate::dynamics::apply_damping;
use crate::dynamics::{apply_mutual_gravity, euler_step, resolve_collision};
use crate::interactions::detect_collision;
use crate::models::{BodyHandle, Collision, Quaternion, RigidBody};
use crate::utils::{BroadPhaseKind, PhysicsError, SimulationConfig, Vector3};

/// What happened during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Number of contacts that were resolved.
    pub collisions: usize,
    /// Number of narrow-phase tests the broad phase asked for.
    pub num_checks: usize,
}

/// Pose of one body, in body order, for whatever draws the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyTransform {
    pub position: Vector3,
    pub rotation: Quaternion,
}

#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    config: SimulationConfig,
    bodies: Vec<RigidBody>,
    elapsed_time: f64,
    frame: u64,
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self {
            config: SimulationConfig::default(),
            bodies: Vec::new(),
            elapsed_time: 0.0,
            frame: 0,
        }
    }
}

impl PhysicsWorld {
    /// Creates an empty world.
    ///
    /// # Errors
    /// Whatever [`SimulationConfig::validate`] rejects.
    pub fn new(config: SimulationConfig) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Self { config, ..Self::default() })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Adds a body and returns its handle. Handles are never reused.
    pub fn add_body(&mut self, body: RigidBody) -> BodyHandle {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn body(&self, handle: BodyHandle) -> Result<&RigidBody, PhysicsError> {
        self.bodies.get(handle).ok_or(PhysicsError::BodyNotFound(handle))
    }

    pub fn body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody, PhysicsError> {
        self.bodies.get_mut(handle).ok_or(PhysicsError::BodyNotFound(handle))
    }

    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Adds a force to a body for the next step only.
    pub fn apply_force(&mut self, handle: BodyHandle, force: Vector3) -> Result<(), PhysicsError> {
        self.body_mut(handle)?.apply_force(force);
        Ok(())
    }

    /// Simulated time so far, in seconds.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// Number of completed steps.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Finds every intersecting pair without touching the bodies.
    pub fn detect_collisions(&self) -> CollisionQuery<Collision> {
        let proxies: Vec<BodyProxy> = self
            .bodies
            .iter()
            .enumerate()
            .map(|(handle, body)| BodyProxy::new(handle, body))
            .collect();

        let bodies = &self.bodies;
        let detect = |first: &BodyProxy, second: &BodyProxy| {
            detect_collision(&bodies[first.handle], &bodies[second.handle]).map(|contact| {
                trace!(
                    "contact between {} and {}: normal {:?}, point {:?}",
                    first.handle, second.handle, contact.normal, contact.contact_point
                );
                Collision { body1: first.handle, body2: second.handle, contact }
            })
        };

        match self.config.broad_phase {
            BroadPhaseKind::Octree => Octree::build(
                self.config.octree_center,
                self.config.octree_size,
                self.config.octree_max_depth,
                proxies,
            )
            .check_collisions(detect),
            BroadPhaseKind::BruteForce => brute_force_collisions(&proxies, detect),
        }
    }

    /// Advances the world by one time step.
    ///
    /// # Errors
    /// `InvalidTime` if the configured time step was made invalid after construction.
    pub fn step(&mut self) -> Result<StepReport, PhysicsError> {
        let dt = self.config.time_step;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(PhysicsError::InvalidTime);
        }

        for body in self.bodies.iter_mut().filter(|body| !body.fixed) {
            body.apply_force(self.config.gravity_force(body.mass));
        }
        if let Some(gravitational_constant) = self.config.mutual_gravity {
            let pairs = apply_mutual_gravity(&mut self.bodies, gravitational_constant);
            trace!("attraction between {} pairs", pairs);
        }

        let query = self.detect_collisions();
        for collision in &query.collisions {
            let (body1, body2) = pair_mut(&mut self.bodies, collision.body1, collision.body2)?;
            resolve_collision(body1, body2, &collision.contact, &self.config);
        }

        for body in &mut self.bodies {
            euler_step(body, dt)?;
            body.clear_forces();
        }
        #[cfg(feature = "damping")]
        self.damp_touching_bodies(&query.collisions);

        self.elapsed_time += dt;
        self.frame += 1;

        let report = StepReport { collisions: query.collisions.len(), num_checks: query.num_checks };
        debug!(
            "frame {} (t = {:.3}s): {} collisions from {} checks",
            self.frame, self.elapsed_time, report.collisions, report.num_checks
        );
        Ok(report)
    }

    /// Applies the energy heuristic to every body that took part in a contact this frame.
    #[cfg(feature = "damping")]
    fn damp_touching_bodies(&mut self, collisions: &[Collision]) {
        let mut touching: Vec<BodyHandle> =
            collisions.iter().flat_map(|collision| [collision.body1, collision.body2]).collect();
        touching.sort_unstable();
        touching.dedup();

        for handle in touching {
            if let Some(body) = self.bodies.get_mut(handle) {
                let action = apply_damping(body, &self.config.damping);
                trace!("damping body {}: {:?}", handle, action);
            }
        }
    }

    /// Runs `steps` frames and returns one report per frame.
    pub fn run(&mut self, steps: usize) -> Result<Vec<StepReport>, PhysicsError> {
        (0..steps).map(|_| self.step()).collect()
    }

    /// Current pose of every body, in handle order.
    pub fn transforms(&self) -> Vec<BodyTransform> {
        self.bodies
            .iter()
            .map(|body| BodyTransform { position: body.position, rotation: body.rotation() })
            .collect()
    }
}

/// Borrows two distinct bodies mutably at once, keeping the requested order.
fn pair_mut(
    bodies: &mut [RigidBody],
    first: BodyHandle,
    second: BodyHandle,
) -> Result<(&mut RigidBody, &mut RigidBody), PhysicsError> {
    if first == second {
        return Err(PhysicsError::CalculationError(format!("body {} collides with itself", first)));
    }
    let len = bodies.len();
    if first >= len {
        return Err(PhysicsError::BodyNotFound(first));
    }
    if second >= len {
        return Err(PhysicsError::BodyNotFound(second));
    }

    if first < second {
        let (left, right) = bodies.split_at_mut(second);
        Ok((&mut left[first], &mut right[0]))
    } else {
        let (left, right) = bodies.split_at_mut(first);
        Ok((&mut right[0], &mut left[second]))
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod world_tests;
