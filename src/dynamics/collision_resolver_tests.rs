use crate::{assert_float_eq, assert_vector_eq};
use crate::dynamics::{
    combined_restitution, resolve_collision, resolve_position, resolve_velocity,
    resolve_velocity_with_rotations, separation_shares,
};
use crate::interactions::detect_collision;
use crate::models::{Contact, RigidBody};
use crate::utils::{add_vectors, scale_vector, SimulationConfig, Vector3, STATIC_FRICTION, ROTATION_FRICTION};

fn sphere(mass: f64, position: Vector3, velocity: Vector3) -> RigidBody {
    RigidBody::new_sphere(1.0, mass, position, 1.0).unwrap().with_velocity(velocity)
}

fn cube(position: Vector3, velocity: Vector3) -> RigidBody {
    RigidBody::new_cuboid(1.0, 1.0, 1.0, 1.0, position, 1.0).unwrap().with_velocity(velocity)
}

fn contact_between(a: &RigidBody, b: &RigidBody) -> Contact {
    detect_collision(a, b).expect("bodies should be touching")
}

fn momentum(bodies: &[&RigidBody]) -> Vector3 {
    bodies
        .iter()
        .fold((0.0, 0.0, 0.0), |acc, body| add_vectors(acc, scale_vector(body.velocity, body.mass)))
}

#[test]
fn test_combined_restitution_is_the_mean() {
    let a = RigidBody::new_sphere(1.0, 1.0, (0.0, 0.0, 0.0), 0.2).unwrap();
    let b = RigidBody::new_sphere(1.0, 1.0, (0.0, 0.0, 0.0), 0.8).unwrap();
    assert_float_eq(combined_restitution(&a, &b), 0.5, 1e-12, None);
}

#[test]
fn test_resolve_position_along_x() {
    let mut a = sphere(1.0, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let mut b = sphere(1.0, (1.5, 0.0, 0.0), (0.0, 0.0, 0.0));
    let contact = contact_between(&a, &b);
    assert_vector_eq(contact.obj1_closest, (1.0, 0.0, 0.0), 1e-12, None);
    assert_vector_eq(contact.obj2_closest, (0.5, 0.0, 0.0), 1e-12, None);

    resolve_position(&mut a, &mut b, &contact);
    assert_vector_eq(a.position, (-0.25, 0.0, 0.0), 1e-12, None);
    assert_vector_eq(b.position, (1.75, 0.0, 0.0), 1e-12, None);
}

#[test]
fn test_resolve_position_along_diagonal() {
    let mut a = sphere(1.0, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let mut b = sphere(1.0, (1.0, 1.0, 0.0), (0.0, 0.0, 0.0));
    let contact = contact_between(&a, &b);
    resolve_position(&mut a, &mut b, &contact);

    assert_eq!(a.position.0, a.position.1);
    assert_float_eq(a.position.0, -0.20710678, 1e-7, None);
    assert_eq!(b.position.0, b.position.1);
    assert_float_eq(b.position.0, 1.20710678, 1e-7, None);
}

#[test]
fn test_heavier_body_moves_less() {
    let a = sphere(3.0, (0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let b = sphere(1.0, (1.6, 0.0, 0.0), (0.0, 0.0, 0.0));
    let contact = contact_between(&a, &b);
    let (d1, d2) = separation_shares(&a, &b, &contact).unwrap();
    assert_float_eq(d1, 0.1, 1e-12, None);
    assert_float_eq(d2, 0.3, 1e-12, None);
}

#[test]
fn test_fixed_body_takes_no_share() {
    let mut floor = RigidBody::new_cuboid(10.0, 1.0, 10.0, 5.0, (0.0, -0.5, 0.0), 1.0).unwrap().as_fixed();
    let mut ball = RigidBody::new_sphere(0.5, 1.0, (0.0, 0.4, 0.0), 1.0).unwrap();
    let contact = contact_between(&floor, &ball);
    resolve_position(&mut floor, &mut ball, &contact);

    assert_eq!(floor.position, (0.0, -0.5, 0.0));
    assert_vector_eq(ball.position, (0.0, 0.5, 0.0), 1e-9, None);

    let mut other_floor = floor.clone();
    assert_eq!(separation_shares(&floor, &other_floor, &contact), None);
    resolve_velocity(&mut floor, &mut other_floor, &contact);
    assert_eq!(floor.velocity, (0.0, 0.0, 0.0));
}

#[test]
fn test_elastic_swap_for_equal_masses() {
    let mut a = sphere(1.0, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
    let mut b = sphere(1.0, (1.5, 0.0, 0.0), (-1.0, 0.0, 0.0));
    let contact = contact_between(&a, &b);
    resolve_velocity(&mut a, &mut b, &contact);
    assert_vector_eq(a.velocity, (-1.0, 0.0, 0.0), 1e-12, None);
    assert_vector_eq(b.velocity, (1.0, 0.0, 0.0), 1e-12, None);
}

#[test]
fn test_elastic_swap_along_diagonal() {
    let v = 0.5_f64.sqrt();
    let mut a = sphere(1.0, (0.0, 0.0, 0.0), (v, v, 0.0));
    let mut b = sphere(1.0, (1.0, 1.0, 0.0), (-v, -v, 0.0));
    let contact = contact_between(&a, &b);
    resolve_velocity(&mut a, &mut b, &contact);
    assert_vector_eq(a.velocity, (-v, -v, 0.0), 1e-12, None);
    assert_vector_eq(b.velocity, (v, v, 0.0), 1e-12, None);
}

#[test]
fn test_unequal_masses_use_each_body_mass() {
    let mut heavy = sphere(100.0, (0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
    let mut light = sphere(1.0, (1.5, 0.0, 0.0), (-1.0, 0.0, 0.0));
    let before = momentum(&[&heavy, &light]);
    let contact = contact_between(&heavy, &light);
    resolve_velocity(&mut heavy, &mut light, &contact);

    assert_float_eq(heavy.velocity.0, 0.96039, 1e-5, None);
    assert_float_eq(light.velocity.0, 2.96039, 1e-5, None);
    assert_vector_eq(momentum(&[&heavy, &light]), before, 1e-9, Some("momentum is conserved"));
}

#[test]
fn test_restitution_scales_the_bounce() {
    let mut a = RigidBody::new_sphere(1.0, 1.0, (0.0, 0.0, 0.0), 0.5).unwrap().with_velocity((1.0, 0.0, 0.0));
    let mut b = RigidBody::new_sphere(1.0, 1.0, (1.5, 0.0, 0.0), 0.5).unwrap().with_velocity((-1.0, 0.0, 0.0));
    let contact = contact_between(&a, &b);
    resolve_velocity(&mut a, &mut b, &contact);
    // separation speed is half the approach speed
    assert_vector_eq(a.velocity, (-0.5, 0.0, 0.0), 1e-12, None);
    assert_vector_eq(b.velocity, (0.5, 0.0, 0.0), 1e-12, None);
}

#[test]
fn test_ball_resting_on_fixed_floor_stays_at_rest() {
    let mut floor = RigidBody::new_cuboid(10.0, 1.0, 10.0, 5.0, (0.0, -0.5, 0.0), 1.0).unwrap().as_fixed();
    let mut ball = RigidBody::new_sphere(0.5, 1.0, (0.0, 0.45, 0.0), 1.0).unwrap();
    let contact = contact_between(&floor, &ball);
    resolve_collision(&mut floor, &mut ball, &contact, &SimulationConfig::default());
    assert_vector_eq(ball.velocity, (0.0, 0.0, 0.0), 1e-12, None);
    assert_eq!(floor.velocity, (0.0, 0.0, 0.0));
}

#[test]
fn test_ball_bounces_off_fixed_floor() {
    let mut floor = RigidBody::new_cuboid(10.0, 1.0, 10.0, 5.0, (0.0, -0.5, 0.0), 1.0).unwrap().as_fixed();
    let mut ball = RigidBody::new_sphere(0.5, 1.0, (0.0, 0.45, 0.0), 1.0).unwrap().with_velocity((0.0, -2.0, 0.0));
    let contact = contact_between(&floor, &ball);
    resolve_collision(&mut floor, &mut ball, &contact, &SimulationConfig::default());
    assert_vector_eq(ball.velocity, (0.0, 2.0, 0.0), 1e-9, None);
    assert_vector_eq(ball.position, (0.0, 0.5, 0.0), 1e-9, None);
}

#[test]
fn test_head_on_cubes_do_not_spin() {
    let mut a = cube((0.0, 0.0, 0.0), (1.0, 0.0, 0.0));
    let mut b = cube((0.95, 0.0, 0.0), (-1.0, 0.0, 0.0));
    let contact = contact_between(&a, &b);
    resolve_collision(&mut a, &mut b, &contact, &SimulationConfig::default());

    assert_vector_eq(a.position, (-0.025, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(b.position, (0.975, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(a.velocity, (-1.0, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(b.velocity, (1.0, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(a.angular_velocity, (0.0, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(b.angular_velocity, (0.0, 0.0, 0.0), 1e-9, None);
}

#[test]
fn test_off_centre_hit_sets_cubes_spinning() {
    let mut a = cube((0.0, 0.0, 0.0), (0.0, 0.0, 0.0));
    let mut b = cube((0.95, 0.3, 0.0), (-1.0, 0.0, 0.0));
    let before = momentum(&[&a, &b]);
    let contact = contact_between(&a, &b);
    assert_vector_eq(contact.contact_point, (0.45, 0.15, 0.0), 1e-9, None);

    resolve_velocity_with_rotations(&mut a, &mut b, &contact, STATIC_FRICTION, ROTATION_FRICTION);

    // 2 / (1 + 1 + 2 · 0.15² · 6)
    let impulse = 2.0 / 2.27;
    assert_vector_eq(a.velocity, (-impulse, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(b.velocity, (impulse - 1.0, 0.0, 0.0), 1e-9, None);
    assert_vector_eq(momentum(&[&a, &b]), before, 1e-9, None);

    let spin = 0.15 * impulse * 6.0;
    assert_vector_eq(a.angular_velocity, (0.0, 0.0, spin), 1e-9, None);
    assert_vector_eq(b.angular_velocity, (0.0, 0.0, spin), 1e-9, None);
}

#[test]
fn test_sliding_cubes_pick_up_friction() {
    let mut a = cube((0.0, 0.0, 0.0), (0.0, 0.0, 0.0)).as_fixed();
    let mut b = cube((0.0, 0.95, 0.0), (1.0, -1.0, 0.0));
    let contact = contact_between(&a, &b);
    resolve_velocity_with_rotations(&mut a, &mut b, &contact, 0.05, 0.0);

    // the bounce reverses the normal component and the tangent term slows the slide
    assert!(b.velocity.1 > 0.0);
    assert!(b.velocity.0 < 1.0);
    assert_eq!(a.velocity, (0.0, 0.0, 0.0));
    assert_eq!(a.angular_velocity, (0.0, 0.0, 0.0));
}
