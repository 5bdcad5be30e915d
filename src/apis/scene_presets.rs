//! Ready-made scenes for demos, benchmarks and the browser adapter.
//!
//! Every preset returns a fully populated [`PhysicsWorld`] using the default
//! [`SimulationConfig`]. Fixed scenery is added first, moving bodies after it.

use std::f64::consts::PI;

use log::debug;
use rand::{rng, Rng};

use crate::models::RigidBody;
use crate::utils::{PhysicsError, SimulationConfig, Vector3, GRAVITATIONAL_CONSTANT};
use crate::PhysicsWorld;

const SCENERY_MASS: f64 = 1e10;
const FLOOR_THICKNESS: f64 = 0.2;

const BALL_RADIUS: f64 = 0.2;
const BALL_MASS: f64 = 1000.0;
const BALL_RESTITUTION: f64 = 0.8;
const BALL_SPACING: f64 = 0.5;

const BOX_SIDE: f64 = 0.75;
const BOX_MASS: f64 = 10.0;
const BOX_RESTITUTION: f64 = 0.7;

const PLANET_RADIUS: f64 = 0.25;
const STAR_MASS: f64 = 1e11;
const PLANET_MASS: f64 = 1e3;
const ORBIT_RADIUS: f64 = 2.0;

/// A thin fixed slab whose top face lies at `y = 0`.
fn floor(half_extent: f64) -> Result<RigidBody, PhysicsError> {
    let side = 2.0 * half_extent;
    Ok(RigidBody::new_cuboid(side, FLOOR_THICKNESS, side, SCENERY_MASS, (0.0, -FLOOR_THICKNESS / 2.0, 0.0), 1.0)?
        .as_fixed())
}

fn ball(position: Vector3, velocity: Vector3) -> Result<RigidBody, PhysicsError> {
    Ok(RigidBody::new_sphere(BALL_RADIUS, BALL_MASS, position, BALL_RESTITUTION)?.with_velocity(velocity))
}

fn world_with(bodies: Vec<RigidBody>) -> Result<PhysicsWorld, PhysicsError> {
    let mut world = PhysicsWorld::new(SimulationConfig::default())?;
    for body in bodies {
        world.add_body(body);
    }
    Ok(world)
}

/// A single ball thrown upwards above a floor.
///
/// # Returns
///
/// A world holding the floor (handle 0) and the ball (handle 1).
///
/// # Examples
///
/// ```
/// use rs_rigid_body::apis::scene_presets::bouncing_ball;
///
/// let mut world = bouncing_ball().unwrap();
/// world.run(10).unwrap();
/// assert!(world.body(1).unwrap().position.1 > 0.0);
/// ```
pub fn bouncing_ball() -> Result<PhysicsWorld, PhysicsError> {
    let ball = RigidBody::new_sphere(0.25, BALL_MASS, (0.0, 5.0, 0.0), BALL_RESTITUTION)?.with_velocity((0.0, 2.0, 0.0));
    world_with(vec![floor(3.0)?, ball])
}

/// A `rows` × `cols` grid of balls dropped into a walled pit.
///
/// Balls sit `0.5` apart in the x/z plane at staggered heights so they do not all land
/// in the same frame. The pit is a floor and four low walls, all fixed.
///
/// # Arguments
///
/// * `rows` - Number of balls along z.
/// * `cols` - Number of balls along x.
///
/// # Errors
///
/// `InvalidConfiguration` if either dimension is zero.
pub fn ball_pit(rows: usize, cols: usize) -> Result<PhysicsWorld, PhysicsError> {
    if rows == 0 || cols == 0 {
        return Err(PhysicsError::InvalidConfiguration(
            "ball pit needs at least one row and one column".to_string(),
        ));
    }

    let half_width = cols as f64 * BALL_SPACING / 2.0;
    let half_depth = rows as f64 * BALL_SPACING / 2.0;
    let wall_height = 1.0;
    let wall_y = wall_height / 2.0;

    let mut bodies = vec![floor(half_width.max(half_depth) + 1.0)?];
    for sign in [-1.0, 1.0] {
        bodies.push(
            RigidBody::new_cuboid(
                FLOOR_THICKNESS,
                wall_height,
                2.0 * half_depth,
                SCENERY_MASS,
                (sign * (half_width + FLOOR_THICKNESS / 2.0), wall_y, 0.0),
                1.0,
            )?
            .as_fixed(),
        );
        bodies.push(
            RigidBody::new_cuboid(
                2.0 * half_width + 2.0 * FLOOR_THICKNESS,
                wall_height,
                FLOOR_THICKNESS,
                SCENERY_MASS,
                (0.0, wall_y, sign * (half_depth + FLOOR_THICKNESS / 2.0)),
                1.0,
            )?
            .as_fixed(),
        );
    }

    for row in 0..rows {
        for col in 0..cols {
            let x = -half_width + (col as f64 + 0.5) * BALL_SPACING;
            let z = -half_depth + (row as f64 + 0.5) * BALL_SPACING;
            let y = 1.0 + 0.3 * ((row + col) % 3) as f64;
            bodies.push(ball((x, y, z), (0.0, 0.0, 0.0))?);
        }
    }

    debug!("ball pit with {} balls", rows * cols);
    world_with(bodies)
}

/// Four spinning boxes thrown at each other next to a fixed wall.
///
/// # Returns
///
/// A world holding the floor (handle 0), the wall (handle 1) and four boxes.
pub fn box_wall() -> Result<PhysicsWorld, PhysicsError> {
    let cube = |position: Vector3, velocity: Vector3| -> Result<RigidBody, PhysicsError> {
        Ok(RigidBody::new_cuboid(BOX_SIDE, BOX_SIDE, BOX_SIDE, BOX_MASS, position, BOX_RESTITUTION)?
            .with_velocity(velocity))
    };

    let wall = RigidBody::new_cuboid(5.0, 5.0, FLOOR_THICKNESS, SCENERY_MASS, (-2.5, 2.5, 0.0), 1.0)?
        .with_rotation((0.0, 1.0, 0.0), PI / 2.0)
        .as_fixed();

    let bodies = vec![
        floor(5.0)?,
        wall,
        cube((-1.0, 2.5, 0.0), (2.0, 0.0, 0.0))?.with_angular_velocity((1.0, 0.0, 0.0), 2.0),
        cube((2.0, 1.2, 0.0), (-2.0, 0.0, 0.0))?
            .with_rotation((0.0, 1.0, 0.0), PI / 2.0)
            .with_angular_velocity((1.0, 1.0, 0.0), 1.0),
        cube((1.0, 2.0, 0.0), (1.0, -1.0, 0.0))?
            .with_rotation((0.0, 1.0, 0.0), PI / 2.0)
            .with_angular_velocity((1.0, 0.0, 1.0), 2.0),
        cube((2.0, BOX_SIDE / 2.0, -3.0), (0.0, 0.0, 0.0))?,
    ];
    world_with(bodies)
}

/// A heavy body with two light satellites on opposite circular orbits, held together by
/// their mutual attraction alone.
///
/// There is no floor and no uniform gravity. The satellites start `2` away from the
/// central body (handle 0) at circular orbital speed, moving in opposite directions so
/// the central body feels no net pull.
pub fn three_body_orbit() -> Result<PhysicsWorld, PhysicsError> {
    let config = SimulationConfig::new(Some(0.0), None, None, None, None)
        .with_mutual_gravity(GRAVITATIONAL_CONSTANT);
    let speed = (GRAVITATIONAL_CONSTANT * STAR_MASS / ORBIT_RADIUS).sqrt();

    let mut world = PhysicsWorld::new(config)?;
    world.add_body(RigidBody::new_sphere(PLANET_RADIUS, STAR_MASS, (0.0, 0.0, 0.0), 1.0)?);
    for sign in [1.0, -1.0] {
        let planet = RigidBody::new_sphere(PLANET_RADIUS, PLANET_MASS, (sign * ORBIT_RADIUS, 0.0, 0.0), 1.0)?
            .with_velocity((0.0, sign * speed, 0.0));
        world.add_body(planet);
    }
    debug!("three body orbit at speed {:.3}", speed);
    Ok(world)
}

/// `count` balls scattered at random above a floor, with random horizontal velocities.
///
/// Uses the thread-local generator. See [`random_sphere_field_with_rng`] for a
/// reproducible field.
pub fn random_sphere_field(count: usize, extent: f64) -> Result<PhysicsWorld, PhysicsError> {
    random_sphere_field_with_rng(count, extent, &mut rng())
}

/// Same as [`random_sphere_field`] with a caller-supplied generator.
///
/// Balls are placed with x and z in `[-extent, extent)` and y in `[2, 2 + extent)`, with
/// velocities in `[-3, 3)` along x and y.
///
/// # Errors
///
/// `InvalidConfiguration` if `extent` is not a positive finite number.
pub fn random_sphere_field_with_rng<R: Rng>(
    count: usize,
    extent: f64,
    rng: &mut R,
) -> Result<PhysicsWorld, PhysicsError> {
    if !(extent.is_finite() && extent > 0.0) {
        return Err(PhysicsError::InvalidConfiguration("extent".to_string()));
    }

    let mut bodies = Vec::with_capacity(count + 1);
    bodies.push(floor(extent + 1.0)?);
    for _ in 0..count {
        let position = (
            rng.random_range(-extent..extent),
            rng.random_range(2.0..2.0 + extent),
            rng.random_range(-extent..extent),
        );
        let velocity = (rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0), 0.0);
        bodies.push(ball(position, velocity)?);
    }

    debug!("random field of {} balls within {}", count, extent);
    world_with(bodies)
}
