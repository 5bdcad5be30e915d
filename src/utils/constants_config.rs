use crate::utils::{
    PhysicsError, Vector3, DEFAULT_DAMPING_PARAMETERS, DEFAULT_SIMULATION_CONFIG,
};

/// Which broad phase the world uses to enumerate candidate pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BroadPhaseKind {
    /// Octree rebuilt from scratch every frame.
    Octree,
    /// Every unordered pair. Quadratic, kept for diagnostics and small scenes.
    BruteForce,
}

/// Thresholds for the kinetic-energy damping heuristic.
///
/// Energies are computed with unit mass so the same thresholds apply to light and heavy bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampingParameters {
    pub energy_high_thresh: f64,
    pub energy_low_thresh: f64,
    pub energy_zero_thresh: f64,
    pub high_dampener: f64,
    pub low_dampener: f64,
}

impl Default for DampingParameters {
    fn default() -> Self {
        DEFAULT_DAMPING_PARAMETERS
    }
}

impl DampingParameters {
    /// Parameters under which no body is ever damped.
    pub fn disabled() -> Self {
        Self {
            energy_high_thresh: f64::INFINITY,
            energy_low_thresh: 0.0,
            energy_zero_thresh: 0.0,
            high_dampener: 1.0,
            low_dampener: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub gravity: f64,
    pub time_step: f64,
    pub octree_center: Vector3,
    pub octree_size: f64,
    pub octree_max_depth: usize,
    pub broad_phase: BroadPhaseKind,
    pub static_friction: f64,
    pub rotation_friction: f64,
    pub damping: DampingParameters,
    /// Gravitational constant for attraction between bodies; `None` turns the pass off.
    pub mutual_gravity: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    pub fn new(
        gravity: Option<f64>,
        time_step: Option<f64>,
        octree_size: Option<f64>,
        octree_max_depth: Option<usize>,
        broad_phase: Option<BroadPhaseKind>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            gravity: gravity.unwrap_or(default.gravity),
            time_step: time_step.unwrap_or(default.time_step),
            octree_size: octree_size.unwrap_or(default.octree_size),
            octree_max_depth: octree_max_depth.unwrap_or(default.octree_max_depth),
            broad_phase: broad_phase.unwrap_or(default.broad_phase),
            ..default
        }
    }

    /// Checks that every field is usable by the world.
    ///
    /// # Errors
    /// `InvalidTime` for a non-positive or non-finite time step, `InvalidConfiguration`
    /// naming the offending field otherwise.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(PhysicsError::InvalidTime);
        }
        if !self.gravity.is_finite() {
            return Err(PhysicsError::InvalidConfiguration("gravity".to_string()));
        }
        if !(self.octree_size.is_finite() && self.octree_size > 0.0) {
            return Err(PhysicsError::InvalidConfiguration("octree_size".to_string()));
        }
        if self.static_friction < 0.0 || self.rotation_friction < 0.0 {
            return Err(PhysicsError::InvalidConfiguration("friction".to_string()));
        }
        let d = &self.damping;
        if !(d.energy_zero_thresh <= d.energy_low_thresh && d.energy_low_thresh <= d.energy_high_thresh) {
            return Err(PhysicsError::InvalidConfiguration("damping thresholds".to_string()));
        }
        if !(0.0..=1.0).contains(&d.high_dampener) || !(0.0..=1.0).contains(&d.low_dampener) {
            return Err(PhysicsError::InvalidConfiguration("damping factors".to_string()));
        }
        if let Some(g) = self.mutual_gravity {
            if !(g.is_finite() && g >= 0.0) {
                return Err(PhysicsError::InvalidConfiguration("mutual_gravity".to_string()));
            }
        }
        Ok(())
    }

    /// Weight of a body of the given mass, pointing down the y axis.
    pub fn gravity_force(&self, mass: f64) -> Vector3 {
        (0.0, -mass * self.gravity, 0.0)
    }

    pub fn with_broad_phase(mut self, broad_phase: BroadPhaseKind) -> Self {
        self.broad_phase = broad_phase;
        self
    }

    pub fn with_octree(mut self, center: Vector3, size: f64, max_depth: usize) -> Self {
        self.octree_center = center;
        self.octree_size = size;
        self.octree_max_depth = max_depth;
        self
    }

    pub fn with_damping(mut self, damping: DampingParameters) -> Self {
        self.damping = damping;
        self
    }

    /// Turns on pairwise attraction between bodies with the given gravitational constant.
    pub fn with_mutual_gravity(mut self, gravitational_constant: f64) -> Self {
        self.mutual_gravity = Some(gravitational_constant);
        self
    }
}
