use crate::models::{CuboidFace, CuboidGeometry};
use crate::utils::{
    cross_product, negate_vector, same_direction, scale_vector, subtract_vectors, vector_magnitude,
    Vector3, SAT_PARALLEL_EPSILON,
};

/// Interval covered by a shape projected onto an axis, as `(min, max)`.
pub type Projection = (f64, f64);

/// Outcome of the separating axis test between two cuboids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SatResult {
    /// Some axis separates the boxes.
    Separated,
    /// Every axis overlaps. `normal` is the axis of least overlap, pointing from the
    /// first box toward the second, and `overlap_dist` is the overlap along it.
    Overlap { normal: Vector3, overlap_dist: f64 },
}

impl SatResult {
    pub fn has_overlap(&self) -> bool {
        matches!(self, SatResult::Overlap { .. })
    }
}

/// Whether two projected intervals share at least one point (touching counts).
pub fn projections_overlap(p1: Projection, p2: Projection) -> bool {
    p1.0 <= p2.1 && p2.0 <= p1.1
}

/// Length of the shared part of two intervals, zero when they are disjoint.
///
/// # Example
/// ```
/// use rs_rigid_body::interactions::get_overlap;
///
/// assert_eq!(get_overlap((0.0, 10.0), (5.0, 6.0)), 1.0);
/// assert_eq!(get_overlap((8.0, 12.0), (0.0, 10.0)), 2.0);
/// assert_eq!(get_overlap((0.0, 1.0), (2.0, 3.0)), 0.0);
/// ```
pub fn get_overlap(p1: Projection, p2: Projection) -> f64 {
    (p1.1.min(p2.1) - p1.0.max(p2.0)).max(0.0)
}

/// Candidate axes: three face axes from each box (opposite faces share an axis) followed
/// by the non-degenerate cross products of every edge pairing.
pub fn candidate_axes(box1: &CuboidGeometry, box2: &CuboidGeometry) -> Vec<Vector3> {
    const FACE_AXES: [CuboidFace; 3] = [CuboidFace::Top, CuboidFace::Left, CuboidFace::Back];

    let mut axes = Vec::with_capacity(15);
    axes.extend(FACE_AXES.iter().map(|&face| box1.face_normal(face)));
    axes.extend(FACE_AXES.iter().map(|&face| box2.face_normal(face)));

    for &edge1 in &box1.edge_vectors {
        for &edge2 in &box2.edge_vectors {
            let axis = cross_product(edge1, edge2);
            let magnitude = vector_magnitude(axis);
            if magnitude > SAT_PARALLEL_EPSILON {
                axes.push(scale_vector(axis, 1.0 / magnitude));
            }
        }
    }
    axes
}

/// Separating axis test between two oriented boxes.
///
/// Returns as soon as one axis separates the projections. Otherwise the axis with the
/// smallest overlap wins, earlier axes winning ties.
pub fn sat(box1: &CuboidGeometry, box2: &CuboidGeometry) -> SatResult {
    let mut overlap_dist = f64::INFINITY;
    let mut smallest = None;

    for axis in candidate_axes(box1, box2) {
        let p1 = box1.project(axis);
        let p2 = box2.project(axis);

        if !projections_overlap(p1, p2) {
            return SatResult::Separated;
        }

        let overlap = get_overlap(p1, p2);
        if overlap < overlap_dist {
            overlap_dist = overlap;
            smallest = Some(axis);
        }
    }

    match smallest {
        Some(axis) => {
            let center_to_center = subtract_vectors(box2.center, box1.center);
            let normal = if same_direction(axis, center_to_center) { axis } else { negate_vector(axis) };
            SatResult::Overlap { normal, overlap_dist }
        }
        None => SatResult::Separated,
    }
}
