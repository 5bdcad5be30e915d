use crate::utils::{subtract_vectors, vector_magnitude, Vector3};

/// Index of a body inside a `PhysicsWorld`.
pub type BodyHandle = usize;

/// Contact data produced by the narrow phase for one intersecting pair.
///
/// Consumed by the resolver in the same frame and then dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from the first body toward the second.
    pub normal: Vector3,
    pub contact_point: Vector3,
    /// Clipped manifold for cuboid pairs; empty for pairs involving a sphere.
    pub contact_points: Vec<Vector3>,
    pub obj1_closest: Vector3,
    pub obj2_closest: Vector3,
    pub obj1_contact_arm: Vector3,
    pub obj2_contact_arm: Vector3,
    /// Penetration depth from the separating axis test, cuboid pairs only.
    pub overlap_dist: Option<f64>,
}

impl Contact {
    /// Distance the pair has to be pushed apart along the normal.
    ///
    /// Uses the SAT depth when there is a non-zero one, the gap between the closest points otherwise.
    pub fn separation_distance(&self) -> f64 {
        match self.overlap_dist {
            Some(depth) if depth != 0.0 => depth.abs(),
            _ => vector_magnitude(subtract_vectors(self.obj1_closest, self.obj2_closest)),
        }
    }
}

/// A contact between two bodies of a world.
#[derive(Debug, Clone, PartialEq)]
pub struct Collision {
    pub body1: BodyHandle,
    pub body2: BodyHandle,
    pub contact: Contact,
}
