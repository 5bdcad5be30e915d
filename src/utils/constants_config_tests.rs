use crate::assert_float_eq;
use crate::utils::*;

#[test]
fn test_default_config() {
    let config = SimulationConfig::default();
    assert_float_eq(config.gravity, 9.80665, 1e-12, None);
    assert_float_eq(config.time_step, TIME_STEP, 1e-12, None);
    assert_eq!(config.broad_phase, BroadPhaseKind::Octree);
    assert_eq!(config.octree_max_depth, 4);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_config() {
    let config = SimulationConfig::new(Some(1.62), None, Some(50.0), None, Some(BroadPhaseKind::BruteForce));
    assert_float_eq(config.gravity, 1.62, 1e-12, None);
    assert_float_eq(config.time_step, TIME_STEP, 1e-12, None);
    assert_float_eq(config.octree_size, 50.0, 1e-12, None);
    assert_eq!(config.octree_max_depth, DEFAULT_OCTREE_MAX_DEPTH);
    assert_eq!(config.broad_phase, BroadPhaseKind::BruteForce);
}

#[test]
fn test_invalid_config() {
    let config = SimulationConfig::new(None, Some(0.0), None, None, None);
    assert_eq!(config.validate(), Err(PhysicsError::InvalidTime));

    let config = SimulationConfig::new(None, None, Some(-1.0), None, None);
    assert!(matches!(config.validate(), Err(PhysicsError::InvalidConfiguration(_))));

    let mut damping = DampingParameters::default();
    damping.energy_zero_thresh = 1.0;
    let config = SimulationConfig::default().with_damping(damping);
    assert!(config.validate().is_err());
}

#[test]
fn test_gravity_force() {
    let config = SimulationConfig::default();
    let force = config.gravity_force(2.0);
    assert_float_eq(force.1, -2.0 * 9.80665, 1e-12, None);
    assert_eq!(force.0, 0.0);
    assert_eq!(force.2, 0.0);
}

#[test]
fn test_disabled_damping_is_valid() {
    let config = SimulationConfig::default().with_damping(DampingParameters::disabled());
    assert!(config.validate().is_ok());
    assert_eq!(config.damping.low_dampener, 1.0);
}

#[test]
fn test_mutual_gravity_is_off_by_default() {
    assert_eq!(SimulationConfig::default().mutual_gravity, None);

    let config = SimulationConfig::default().with_mutual_gravity(GRAVITATIONAL_CONSTANT);
    assert_eq!(config.mutual_gravity, Some(GRAVITATIONAL_CONSTANT));
    assert!(config.validate().is_ok());

    let config = SimulationConfig::default().with_mutual_gravity(-1.0);
    assert_eq!(config.validate(), Err(PhysicsError::InvalidConfiguration("mutual_gravity".to_string())));
    assert!(SimulationConfig::default().with_mutual_gravity(f64::NAN).validate().is_err());
}
