use std::collections::BTreeSet;
use crate::{assert_float_eq, assert_vector_eq};
use crate::models::{BodyHandle, RigidBody};
use crate::utils::{BroadPhaseKind, PhysicsError, SimulationConfig, Vector3, GRAVITATIONAL_CONSTANT};
use crate::{PhysicsWorld, StepReport};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn floor() -> RigidBody {
    RigidBody::new_cuboid(10.0, 1.0, 10.0, 1.0, (0.0, -0.5, 0.0), 1.0).unwrap().as_fixed()
}

fn ball(position: Vector3) -> RigidBody {
    RigidBody::new_sphere(0.5, 1.0, position, 0.8).unwrap()
}

fn weightless() -> SimulationConfig {
    SimulationConfig::new(Some(0.0), None, None, None, None)
}

/// A small heap of barely overlapping balls on the floor, plus four pairs far away from it
/// that overlap by 0.01.
fn crowded_world(broad_phase: BroadPhaseKind) -> PhysicsWorld {
    let config = SimulationConfig::default().with_broad_phase(broad_phase);
    let mut world = PhysicsWorld::new(config).unwrap();
    world.add_body(floor());
    for row in 0..3 {
        for col in 0..4 {
            let r = row as f64;
            let c = col as f64;
            world.add_body(ball((-1.5 + c * 0.95, 0.4 + r * 0.95, -0.5 + 0.3 * r)));
        }
    }
    for x in [-7.0, 7.0] {
        for z in [-7.0, 7.0] {
            world.add_body(ball((x, 7.0, z)));
            world.add_body(ball((x + 0.99, 7.0, z)));
        }
    }
    world
}

fn touching_pairs(world: &PhysicsWorld) -> (BTreeSet<(BodyHandle, BodyHandle)>, usize) {
    let query = world.detect_collisions();
    let pairs = query
        .collisions
        .iter()
        .map(|collision| (collision.body1.min(collision.body2), collision.body1.max(collision.body2)))
        .collect();
    (pairs, query.num_checks)
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = SimulationConfig::new(None, Some(0.0), None, None, None);
    assert_eq!(PhysicsWorld::new(config).err(), Some(PhysicsError::InvalidTime));
}

#[test]
fn test_unknown_handles() {
    let mut world = PhysicsWorld::default();
    let handle = world.add_body(ball((0.0, 0.0, 0.0)));
    assert_eq!(handle, 0);
    assert_eq!(world.len(), 1);

    assert!(world.body(0).is_ok());
    assert_eq!(world.body(3).err(), Some(PhysicsError::BodyNotFound(3)));
    assert_eq!(world.apply_force(1, (1.0, 0.0, 0.0)), Err(PhysicsError::BodyNotFound(1)));
}

#[test]
fn test_free_fall_and_clock() {
    let mut world = PhysicsWorld::new(SimulationConfig::default()).unwrap();
    let handle = world.add_body(ball((0.0, 10.0, 0.0)));

    let reports = world.run(100).unwrap();
    assert_eq!(reports.len(), 100);
    assert!(reports.iter().all(|report| *report == StepReport::default()));

    assert_eq!(world.frame(), 100);
    assert_float_eq(world.elapsed_time(), 1.0, 1e-9, None);
    // nothing to collide with, so the fall is not damped
    assert_float_eq(world.body(handle).unwrap().velocity.1, -9.80665, 1e-9, None);
}

#[test]
fn test_applied_force_lasts_one_step() {
    let mut world = PhysicsWorld::new(weightless()).unwrap();
    let handle = world.add_body(ball((0.0, 0.0, 0.0)));

    world.apply_force(handle, (2.0, 0.0, 0.0)).unwrap();
    world.step().unwrap();
    assert_vector_eq(world.body(handle).unwrap().velocity, (0.02, 0.0, 0.0), 1e-12, None);

    world.step().unwrap();
    assert_vector_eq(world.body(handle).unwrap().velocity, (0.02, 0.0, 0.0), 1e-12, None);
    assert_eq!(world.body(handle).unwrap().center_force, (0.0, 0.0, 0.0));
}

#[test]
fn test_bodies_attract_each_other() {
    let mut world = PhysicsWorld::new(weightless().with_mutual_gravity(GRAVITATIONAL_CONSTANT)).unwrap();
    let left = world.add_body(RigidBody::new_sphere(0.1, 1e10, (-1.0, 0.0, 0.0), 1.0).unwrap());
    let right = world.add_body(RigidBody::new_sphere(0.1, 1e10, (1.0, 0.0, 0.0), 1.0).unwrap());

    world.step().unwrap();
    // a = G·m / r² for each body, over one 0.01 s step
    let speed = GRAVITATIONAL_CONSTANT * 1e10 / 4.0 * 0.01;
    assert_vector_eq(world.body(left).unwrap().velocity, (speed, 0.0, 0.0), 1e-12, None);
    assert_vector_eq(world.body(right).unwrap().velocity, (-speed, 0.0, 0.0), 1e-12, None);
    assert_float_eq(world.body(left).unwrap().position.0, -1.0 + speed * 0.01, 1e-12, None);
    assert_eq!(world.body(left).unwrap().center_force, (0.0, 0.0, 0.0));
}

#[test]
fn test_head_on_spheres_swap_velocities() {
    let mut world = PhysicsWorld::new(weightless()).unwrap();
    let left = world.add_body(
        RigidBody::new_sphere(0.5, 1.0, (-1.0, 0.0, 0.0), 1.0).unwrap().with_velocity((1.0, 0.0, 0.0)),
    );
    let right = world.add_body(
        RigidBody::new_sphere(0.5, 1.0, (1.0, 0.0, 0.0), 1.0).unwrap().with_velocity((-1.0, 0.0, 0.0)),
    );

    let collisions: usize = world.run(200).unwrap().iter().map(|report| report.collisions).sum();
    assert_eq!(collisions, 1);
    assert_vector_eq(world.body(left).unwrap().velocity, (-1.0, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(world.body(right).unwrap().velocity, (1.0, 0.0, 0.0), 1e-9, None);
    assert_float_eq(world.body(left).unwrap().position.0, -1.99, 1e-9, None);
    assert_float_eq(world.body(right).unwrap().position.0, 1.99, 1e-9, None);
}

#[test]
fn test_ball_bounces_lower_each_time() {
    init_logger();
    let mut world = PhysicsWorld::new(SimulationConfig::default()).unwrap();
    let fixed = world.add_body(floor());
    let handle = world.add_body(ball((0.0, 3.0, 0.0)));

    let mut lowest = f64::MAX;
    let mut peaks = Vec::new();
    let mut rising = false;
    for _ in 0..1000 {
        world.step().unwrap();
        let body = world.body(handle).unwrap();
        lowest = lowest.min(body.position.1);
        if rising && body.velocity.1 <= 0.0 {
            peaks.push(body.position.1);
        }
        rising = body.velocity.1 > 0.0;
    }

    assert!(lowest > 0.45, "ball sank into the floor: {}", lowest);
    assert!(peaks.len() >= 3);
    assert!(peaks[0] < 3.0);
    assert!(peaks.windows(2).all(|pair| pair[1] < pair[0]), "peaks: {:?}", peaks);
    assert_eq!(world.body(fixed).unwrap().position, (0.0, -0.5, 0.0));
}

#[cfg(feature = "damping")]
#[test]
fn test_bouncing_ball_comes_to_rest() {
    let mut world = PhysicsWorld::new(SimulationConfig::default()).unwrap();
    world.add_body(floor());
    let handle = world.add_body(ball((0.0, 3.0, 0.0)));

    world.run(3000).unwrap();
    let body = world.body(handle).unwrap();
    assert_eq!(body.velocity, (0.0, 0.0, 0.0));
    assert_float_eq(body.position.1, 0.5, 0.01, None);
}

#[cfg(feature = "damping")]
#[test]
fn test_box_settles_flat_on_floor() {
    let mut world = PhysicsWorld::new(SimulationConfig::default()).unwrap();
    world.add_body(floor());
    let handle = world.add_body(RigidBody::new_cuboid(1.0, 1.0, 1.0, 1.0, (0.0, 1.0, 0.0), 0.5).unwrap());

    world.run(600).unwrap();
    let body = world.body(handle).unwrap();
    assert_vector_eq(body.velocity, (0.0, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(body.angular_velocity, (0.0, 0.0, 0.0), 1e-9, None);
    assert_float_eq(body.position.1, 0.5, 0.01, None);
    assert!(body.rotation().is_near_identity(1e-9));
}

#[test]
fn test_octree_finds_the_same_pairs_as_brute_force() {
    init_logger();
    let octree = crowded_world(BroadPhaseKind::Octree);
    let brute_force = crowded_world(BroadPhaseKind::BruteForce);

    let (octree_pairs, octree_checks) = touching_pairs(&octree);
    let (brute_force_pairs, brute_force_checks) = touching_pairs(&brute_force);

    assert_eq!(octree_pairs.len(), 25);
    assert_eq!(octree_pairs, brute_force_pairs);
    assert_eq!(brute_force_checks, 21 * 20 / 2);
    assert!(octree_checks < brute_force_checks);
}

#[test]
fn test_detection_does_not_move_bodies() {
    let world = crowded_world(BroadPhaseKind::Octree);
    let before = world.transforms();
    let _ = world.detect_collisions();
    assert_eq!(world.transforms(), before);
}

#[test]
fn test_transforms_follow_bodies() {
    let mut world = PhysicsWorld::new(weightless()).unwrap();
    world.add_body(floor());
    let spun = world.add_body(
        RigidBody::new_cuboid(1.0, 1.0, 1.0, 1.0, (0.0, 5.0, 0.0), 1.0)
            .unwrap()
            .with_rotation((0.0, 1.0, 0.0), 0.3),
    );

    let transforms = world.transforms();
    assert_eq!(transforms.len(), 2);
    assert_eq!(transforms[0].position, (0.0, -0.5, 0.0));
    assert!(transforms[0].rotation.is_near_identity(1e-12));
    assert_eq!(transforms[spun].position, (0.0, 5.0, 0.0));
    assert_eq!(transforms[spun].rotation, world.body(spun).unwrap().rotation());
}
