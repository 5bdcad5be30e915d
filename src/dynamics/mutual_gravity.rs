use log::warn;
use crate::models::RigidBody;
use crate::utils::{
    dot_product, negate_vector, scale_vector, subtract_vectors, PhysicsError, Vector3, EPSILON,
};

/// Newtonian attraction that `target` exerts on `body`.
///
/// The force points from `body` toward `target` with magnitude `G·m1·m2 / r²`.
///
/// # Errors
/// `CalculationError` when the two centers coincide and the direction is undefined.
///
/// # Example
/// ```
/// use rs_rigid_body::dynamics::gravitational_force;
/// use rs_rigid_body::models::RigidBody;
///
/// let a = RigidBody::new_sphere(0.1, 2.0, (0.0, 0.0, 0.0), 1.0).unwrap();
/// let b = RigidBody::new_sphere(0.1, 3.0, (0.0, 2.0, 0.0), 1.0).unwrap();
/// let force = gravitational_force(1.0, &a, &b).unwrap();
/// assert_eq!(force, (0.0, 1.5, 0.0));
/// ```
pub fn gravitational_force(
    gravitational_constant: f64,
    body: &RigidBody,
    target: &RigidBody,
) -> Result<Vector3, PhysicsError> {
    let offset = subtract_vectors(target.position, body.position);
    let r_squared = dot_product(offset, offset);
    if r_squared < EPSILON {
        return Err(PhysicsError::CalculationError("bodies share a position".to_string()));
    }
    let magnitude = gravitational_constant * body.mass * target.mass / r_squared;
    Ok(scale_vector(offset, magnitude / r_squared.sqrt()))
}

/// Adds the attraction of every other body to each free body's `center_force`.
///
/// Each pair is evaluated once and the equal and opposite forces go to both bodies.
/// Fixed bodies attract but never receive a force. Pairs whose centers coincide are
/// skipped.
///
/// # Returns
/// The number of pairs that contributed a force.
pub fn apply_mutual_gravity(bodies: &mut [RigidBody], gravitational_constant: f64) -> usize {
    let mut pairs = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let first = &mut head[i];
        for (offset, second) in tail.iter_mut().enumerate() {
            if first.fixed && second.fixed {
                continue;
            }
            match gravitational_force(gravitational_constant, first, second) {
                Ok(force) => {
                    if !first.fixed {
                        first.apply_force(force);
                    }
                    if !second.fixed {
                        second.apply_force(negate_vector(force));
                    }
                    pairs += 1;
                }
                Err(error) => warn!("no attraction between bodies {} and {}: {}", i, i + 1 + offset, error),
            }
        }
    }
    pairs
}
