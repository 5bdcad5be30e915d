use crate::utils::{BroadPhaseKind, DampingParameters, SimulationConfig, Vector3};

/// Fixed integration step in seconds. The simulation advances by this amount per frame
/// regardless of how long the frame took to render.
pub const TIME_STEP: f64 = 0.01;

pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Newton's constant, for scenes with body-to-body attraction.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Threshold below which determinants, denominators and magnitudes count as zero.
pub const EPSILON: f64 = 1e-10;

pub const GJK_MAX_ITERATIONS: usize = 15;

/// Roughly `normalize(1, 1, 1)`; any direction works as a seed.
pub const GJK_INITIAL_DIRECTION: Vector3 = (0.57735, 0.57735, 0.57735);

/// Slack when deciding whether the origin lies on a line simplex.
pub const GJK_LINE_TOLERANCE: f64 = 0.01;

/// Witness interpolations further apart than this are reported.
pub const WITNESS_MISMATCH_TOLERANCE: f64 = 0.1;

/// Edge-edge axes shorter than this come from (near) parallel edges and are skipped.
pub const SAT_PARALLEL_EPSILON: f64 = 0.001;

pub const STATIC_FRICTION: f64 = 0.05;
pub const ROTATION_FRICTION: f64 = 0.001;

pub const DEFAULT_OCTREE_SIZE: f64 = 20.0;
pub const DEFAULT_OCTREE_MAX_DEPTH: usize = 4;

pub const DEFAULT_DAMPING_PARAMETERS: DampingParameters = DampingParameters {
    energy_high_thresh: 10.0,
    energy_low_thresh: 0.07,
    energy_zero_thresh: 0.02,
    high_dampener: 0.99,
    low_dampener: 0.9,
};

pub const DEFAULT_SIMULATION_CONFIG: SimulationConfig = SimulationConfig {
    gravity: STANDARD_GRAVITY,
    time_step: TIME_STEP,
    octree_center: (0.0, 0.0, 0.0),
    octree_size: DEFAULT_OCTREE_SIZE,
    octree_max_depth: DEFAULT_OCTREE_MAX_DEPTH,
    broad_phase: BroadPhaseKind::Octree,
    static_friction: STATIC_FRICTION,
    rotation_friction: ROTATION_FRICTION,
    damping: DEFAULT_DAMPING_PARAMETERS,
    mutual_gravity: None,
};
