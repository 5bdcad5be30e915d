use crate::models::{Quaternion, RigidBody};
use crate::utils::{add_vectors, scale_vector, PhysicsError};

/// Advances a free body by one semi-implicit Euler step.
///
/// The velocity is updated from `center_force` first and the new velocity moves the
/// position. The orientation is turned by `angular_velocity · dt`, composed with the current
/// rotation as a quaternion and renormalized, then stored back as axis·angle. This differs
/// from summing `angular_velocity · dt` into `angular_rotation`: the two agree while the
/// spin axis stays put, but only composition gives the right pose once the axis changes.
/// Fixed bodies are left untouched.
///
/// # Errors
/// `InvalidTime` if `dt` is not a positive finite number.
///
/// # Example
/// ```
/// use rs_rigid_body::dynamics::euler_step;
/// use rs_rigid_body::models::RigidBody;
///
/// let mut ball = RigidBody::new_sphere(0.5, 2.0, (0.0, 0.0, 0.0), 1.0).unwrap();
/// ball.apply_force((4.0, 0.0, 0.0));
/// euler_step(&mut ball, 0.5).unwrap();
/// assert_eq!(ball.velocity, (1.0, 0.0, 0.0));
/// assert_eq!(ball.position, (0.5, 0.0, 0.0));
/// ```
pub fn euler_step(body: &mut RigidBody, dt: f64) -> Result<(), PhysicsError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(PhysicsError::InvalidTime);
    }
    if body.fixed {
        return Ok(());
    }

    let acceleration = scale_vector(body.center_force, 1.0 / body.mass);
    body.velocity = add_vectors(body.velocity, scale_vector(acceleration, dt));
    body.position = add_vectors(body.position, scale_vector(body.velocity, dt));

    let turn = Quaternion::from_rotation_vector(scale_vector(body.angular_velocity, dt));
    let (axis, angle) = turn.multiply(&body.rotation()).normalized().to_axis_angle();
    body.angular_rotation = scale_vector(axis, angle);

    Ok(())
}
