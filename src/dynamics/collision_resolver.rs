use log::trace;
use crate::models::{Contact, RigidBody};
use crate::utils::{
    add_vectors, cross_product, dot_product, multiply_matrix_vector, quadratic_form, scale_vector,
    subtract_vectors, SimulationConfig, EPSILON,
};

/// Coefficient of restitution used for a pair: the mean of both bodies' values.
pub fn combined_restitution(body1: &RigidBody, body2: &RigidBody) -> f64 {
    (body1.restitution + body2.restitution) / 2.0
}

/// How far each body has to move along the contact normal to separate the pair.
///
/// The distance is split by inverse mass, so `d1 = d·m2/(m1 + m2)` for two free bodies
/// and a fixed body never takes a share.
///
/// # Returns
/// `None` when both bodies are fixed.
pub fn separation_shares(body1: &RigidBody, body2: &RigidBody, contact: &Contact) -> Option<(f64, f64)> {
    let (inv1, inv2) = (body1.inverse_mass(), body2.inverse_mass());
    let total = inv1 + inv2;
    if total < EPSILON {
        return None;
    }
    let d = contact.separation_distance();
    Some((d * inv1 / total, d * inv2 / total))
}

/// Pushes the bodies apart along the contact normal until their surfaces just touch.
pub fn resolve_position(body1: &mut RigidBody, body2: &mut RigidBody, contact: &Contact) {
    let Some((d1, d2)) = separation_shares(body1, body2, contact) else {
        return;
    };
    if !body1.fixed {
        body1.position = subtract_vectors(body1.position, scale_vector(contact.normal, d1));
    }
    if !body2.fixed {
        body2.position = add_vectors(body2.position, scale_vector(contact.normal, d2));
    }
}

/// Linear impulse exchange along the normal, ignoring rotation.
///
/// `j = -|(Cr + 1) / (1/m1 + 1/m2) · (v1 - v2)·n|`, applied as `v1 += j·n/m1` and
/// `v2 -= j·n/m2`.
pub fn resolve_velocity(body1: &mut RigidBody, body2: &mut RigidBody, contact: &Contact) {
    let (inv1, inv2) = (body1.inverse_mass(), body2.inverse_mass());
    let total = inv1 + inv2;
    if total < EPSILON {
        return;
    }

    let restitution = combined_restitution(body1, body2);
    let approach = dot_product(subtract_vectors(body1.velocity, body2.velocity), contact.normal);
    let impulse = -((restitution + 1.0) / total * approach).abs();

    if !body1.fixed {
        body1.velocity = add_vectors(body1.velocity, scale_vector(contact.normal, impulse * inv1));
    }
    if !body2.fixed {
        body2.velocity = subtract_vectors(body2.velocity, scale_vector(contact.normal, impulse * inv2));
    }
}

/// Impulse exchange between two cuboids including the angular response at the contact arms.
///
/// The impulse denominator adds `(r × n)ᵀ I⁻¹ (r × n)` for each body. The linear part is
/// nudged along the sliding direction by `static_friction` and the angular part against it
/// by `rotation_friction`.
pub fn resolve_velocity_with_rotations(
    body1: &mut RigidBody,
    body2: &mut RigidBody,
    contact: &Contact,
    static_friction: f64,
    rotation_friction: f64,
) {
    let normal = contact.normal;
    let (inv1, inv2) = (body1.inverse_mass(), body2.inverse_mass());
    let inverse_inertia1 = body1.inverse_inertia();
    let inverse_inertia2 = body2.inverse_inertia();

    let arm_normal1 = cross_product(contact.obj1_contact_arm, normal);
    let arm_normal2 = cross_product(contact.obj2_contact_arm, normal);
    let denominator = inv1
        + inv2
        + quadratic_form(arm_normal1, &inverse_inertia1)
        + quadratic_form(arm_normal2, &inverse_inertia2);
    if denominator < EPSILON {
        return;
    }

    let relative_velocity = subtract_vectors(body1.velocity, body2.velocity);
    // component of the relative velocity lying in the contact plane
    let tangent = cross_product(cross_product(normal, relative_velocity), normal);

    let restitution = combined_restitution(body1, body2);
    let impulse = -((restitution + 1.0) / denominator * dot_product(relative_velocity, normal)).abs();

    let with_friction = add_vectors(normal, scale_vector(tangent, static_friction));
    let with_rotation_friction = subtract_vectors(normal, scale_vector(tangent, rotation_friction));
    let angular_impulse = scale_vector(with_rotation_friction, impulse);

    trace!("box impulse {} along {:?}, denominator {}", impulse, normal, denominator);

    if !body1.fixed {
        body1.velocity = add_vectors(body1.velocity, scale_vector(with_friction, impulse * inv1));
        let spin = multiply_matrix_vector(&inverse_inertia1, cross_product(contact.obj1_contact_arm, angular_impulse));
        body1.angular_velocity = add_vectors(body1.angular_velocity, spin);
    }
    if !body2.fixed {
        body2.velocity = subtract_vectors(body2.velocity, scale_vector(with_friction, impulse * inv2));
        let spin = multiply_matrix_vector(&inverse_inertia2, cross_product(contact.obj2_contact_arm, angular_impulse));
        body2.angular_velocity = subtract_vectors(body2.angular_velocity, spin);
    }
}

/// Separates the pair, then exchanges momentum. Cuboid pairs get the rotational response;
/// any pair involving a sphere uses the linear form.
pub fn resolve_collision(body1: &mut RigidBody, body2: &mut RigidBody, contact: &Contact, config: &SimulationConfig) {
    resolve_position(body1, body2, contact);
    if body1.is_cuboid() && body2.is_cuboid() {
        resolve_velocity_with_rotations(body1, body2, contact, config.static_friction, config.rotation_friction);
    } else {
        resolve_velocity(body1, body2, contact);
    }
}
