use crate::models::RigidBody;
use crate::utils::{scale_vector, DampingParameters};

/// What the damping pass did to a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DampingAction {
    Untouched,
    /// Energy fell below the zero threshold; the body was put to rest.
    Stopped,
    LowDamped,
    HighDamped,
}

/// Bleeds energy out of nearly resting or very fast bodies.
///
/// Uses the unit-mass kinetic energy so the thresholds do not depend on the body's mass.
/// Fixed bodies are never touched.
pub fn apply_damping(body: &mut RigidBody, parameters: &DampingParameters) -> DampingAction {
    if body.fixed {
        return DampingAction::Untouched;
    }

    let energy = body.normalised_kinetic_energy();
    let (factor, action) = if energy < parameters.energy_zero_thresh {
        (0.0, DampingAction::Stopped)
    } else if energy < parameters.energy_low_thresh {
        (parameters.low_dampener, DampingAction::LowDamped)
    } else if energy > parameters.energy_high_thresh {
        (parameters.high_dampener, DampingAction::HighDamped)
    } else {
        return DampingAction::Untouched;
    };

    body.velocity = scale_vector(body.velocity, factor);
    body.angular_velocity = scale_vector(body.angular_velocity, factor);
    action
}
