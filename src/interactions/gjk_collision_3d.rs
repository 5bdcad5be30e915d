use log::{trace, warn};
use crate::models::{RigidBody, Simplex, SupportPoint};
use crate::utils::{
    add_vectors, cross_product, dot_product, invert_matrix, multiply_matrix_vector, negate_vector,
    same_direction, scale_vector, subtract_vectors, try_normalize_vector, vector_magnitude, Vector3,
    GJK_INITIAL_DIRECTION, GJK_LINE_TOLERANCE, GJK_MAX_ITERATIONS, WITNESS_MISMATCH_TOLERANCE, ZERO_VECTOR,
};

/// Result of a successful GJK query.
#[derive(Debug, Clone)]
pub struct GjkContact {
    /// Final simplex enclosing (or touching) the origin.
    pub simplex: Simplex,
    /// Approximate contact point reconstructed from the witness points.
    pub contact_point: Vector3,
}

/// Outcome of reducing the simplex after a new point was pushed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimplexStep {
    /// The origin is enclosed; carries the reconstructed contact point.
    ContainsOrigin(Vector3),
    /// Keep searching along this (unnormalized) direction.
    Continue(Vector3),
}

/// Support point of the Minkowski difference `body1 - body2` along `direction`.
pub fn get_support_point(body1: &RigidBody, body2: &RigidBody, direction: Vector3) -> SupportPoint {
    SupportPoint::new(body1.support(direction), body2.support(negate_vector(direction)))
}

/// GJK (Gilbert-Johnson-Keerthi) intersection test between two convex bodies.
///
/// # Returns
/// `Some(GjkContact)` when the Minkowski difference contains the origin. `None` when a
/// separating direction is found, when the search direction degenerates, or when the
/// iteration cap is reached; all three are reported as "no collision".
pub fn gjk_collision_detection(body1: &RigidBody, body2: &RigidBody) -> Option<GjkContact> {
    gjk_collision_detection_from(body1, body2, GJK_INITIAL_DIRECTION)
}

/// [`gjk_collision_detection`] seeded with a caller-chosen first direction.
pub fn gjk_collision_detection_from(
    body1: &RigidBody,
    body2: &RigidBody,
    initial_direction: Vector3,
) -> Option<GjkContact> {
    let first = get_support_point(body1, body2, initial_direction);
    let mut simplex = Simplex::new();
    simplex.add(first);
    let mut next_direction = negate_vector(first.point);

    for _ in 0..GJK_MAX_ITERATIONS {
        let direction = match try_normalize_vector(next_direction) {
            Ok(direction) => direction,
            Err(_) => {
                warn!("GJK search direction vanished between {} and {}, treating as separated",
                    body1.shape.name(), body2.shape.name());
                return None;
            }
        };

        let support = get_support_point(body1, body2, direction);
        if dot_product(support.point, direction) < 0.0 {
            // the new point did not get past the origin, so it lies outside the difference
            return None;
        }
        simplex.add(support);

        match nearest_simplex(&mut simplex) {
            SimplexStep::ContainsOrigin(contact_point) => {
                return Some(GjkContact { simplex, contact_point });
            }
            SimplexStep::Continue(direction) => next_direction = direction,
        }
    }

    trace!("GJK gave up after {} iterations", GJK_MAX_ITERATIONS);
    None
}

/// Reduces the simplex to the feature nearest the origin.
///
/// # Panics
/// Panics unless the simplex holds 2, 3 or 4 points.
pub fn nearest_simplex(simplex: &mut Simplex) -> SimplexStep {
    match simplex.size() {
        2 => handle_line_case(simplex),
        3 => handle_triangle_case(simplex),
        4 => handle_tetrahedron_case(simplex),
        n => panic!("simplex must hold 2, 3 or 4 points, found {}", n),
    }
}

/// Triple product (a × b) × c
fn triple_product(a: Vector3, b: Vector3, c: Vector3) -> Vector3 {
    cross_product(cross_product(a, b), c)
}

/// Handle the line case for GJK algorithm
pub fn handle_line_case(simplex: &mut Simplex) -> SimplexStep {
    let a = *simplex.get_a();
    let b = simplex.get_b().point;

    let ab = subtract_vectors(b, a.point);
    let ao = negate_vector(a.point);

    // |ao| + |ob| == |ab| exactly when the origin sits on the segment
    if vector_magnitude(ao) + vector_magnitude(b) - vector_magnitude(ab) <= GJK_LINE_TOLERANCE {
        return SimplexStep::ContainsOrigin(add_vectors(a.point_a, ao));
    }

    if same_direction(ab, ao) {
        SimplexStep::Continue(triple_product(ab, ao, ab))
    } else {
        simplex.remove(0);
        SimplexStep::Continue(ao)
    }
}

/// Handle the triangle case for GJK algorithm
pub fn handle_triangle_case(simplex: &mut Simplex) -> SimplexStep {
    let c = simplex.get_c().point;
    let b = simplex.get_b().point;
    let a = simplex.get_a().point;

    let ab = subtract_vectors(b, a);
    let ac = subtract_vectors(c, a);
    let abc = cross_product(ab, ac);
    let ao = negate_vector(a);

    if same_direction(cross_product(abc, ac), ao) {
        if same_direction(ac, ao) {
            simplex.remove(1);
            SimplexStep::Continue(triple_product(ac, ao, ac))
        } else {
            reduce_to_ab_or_a(simplex, ab, ao)
        }
    } else if same_direction(cross_product(ab, abc), ao) {
        reduce_to_ab_or_a(simplex, ab, ao)
    } else if same_direction(abc, ao) {
        SimplexStep::Continue(abc)
    } else {
        // origin is below the triangle; flip the winding so the next point lands above it
        simplex.swap(1, 2);
        SimplexStep::Continue(negate_vector(abc))
    }
}

fn reduce_to_ab_or_a(simplex: &mut Simplex, ab: Vector3, ao: Vector3) -> SimplexStep {
    if same_direction(ab, ao) {
        simplex.remove(0);
        SimplexStep::Continue(triple_product(ab, ao, ab))
    } else {
        simplex.keep_newest(1);
        SimplexStep::Continue(ao)
    }
}

/// Handle the tetrahedron case for GJK algorithm
///
/// The newest point `a` was found by searching past the opposite face, so only the three
/// faces through `a` can face the origin. The first one that does loses the vertex it does
/// not contain and the search goes on from that triangle. When none does the origin is
/// enclosed; an origin lying exactly on a face counts as enclosed.
pub fn handle_tetrahedron_case(simplex: &mut Simplex) -> SimplexStep {
    let a = simplex.get_a().point;
    let ao = negate_vector(a);
    let [v0, v1, v2] = [0, 1, 2].map(|i| simplex.get(i).point);

    let faces = [(v1, v2, v0), (v0, v2, v1), (v0, v1, v2)];
    for (dropped, &(p, q, opposite)) in faces.iter().enumerate() {
        if same_direction(outward_face_normal(a, p, q, opposite), ao) {
            simplex.remove(dropped);
            return handle_triangle_case(simplex);
        }
    }

    SimplexStep::ContainsOrigin(contact_point_from_witnesses(simplex))
}

/// Normal of the face `a`, `b`, `c` oriented away from `opposite`.
fn outward_face_normal(a: Vector3, b: Vector3, c: Vector3, opposite: Vector3) -> Vector3 {
    let normal = cross_product(subtract_vectors(b, a), subtract_vectors(c, a));
    if same_direction(normal, subtract_vectors(opposite, a)) {
        negate_vector(normal)
    } else {
        normal
    }
}

fn contact_point_from_witnesses(simplex: &Simplex) -> Vector3 {
    let points = simplex.points();
    match barycentric_weights_of_origin(simplex) {
        Some(weights) => {
            let on_a = interpolate(&weights, points.iter().map(|p| p.point_a));
            let on_b = interpolate(&weights, points.iter().map(|p| p.point_b));
            if vector_magnitude(subtract_vectors(on_a, on_b)) > WITNESS_MISMATCH_TOLERANCE {
                warn!("GJK witness points disagree: {:?} vs {:?}", on_a, on_b);
            }
            on_a
        }
        None => {
            warn!("Flat GJK tetrahedron, using the witness centroid as contact point");
            interpolate(&[0.25; 4], points.iter().map(|p| p.point_a))
        }
    }
}

fn interpolate(weights: &[f64; 4], points: impl Iterator<Item = Vector3>) -> Vector3 {
    weights
        .iter()
        .zip(points)
        .fold(ZERO_VECTOR, |acc, (&w, p)| add_vectors(acc, scale_vector(p, w)))
}

/// Barycentric coordinates of the origin with respect to a tetrahedral simplex.
///
/// Solves `T · (b1, b2, b3) = -v4` with `T = [v1 - v4 | v2 - v4 | v3 - v4]` and sets
/// `b4 = 1 - b1 - b2 - b3`.
///
/// # Returns
/// `None` when the tetrahedron is flat and `T` cannot be inverted.
///
/// # Panics
/// Panics unless the simplex holds exactly four points.
pub fn barycentric_weights_of_origin(simplex: &Simplex) -> Option<[f64; 4]> {
    assert_eq!(simplex.size(), 4, "barycentric weights need a tetrahedron");
    let [v1, v2, v3, v4] = [0, 1, 2, 3].map(|i| simplex.get(i).point);
    let (c1, c2, c3) = (subtract_vectors(v1, v4), subtract_vectors(v2, v4), subtract_vectors(v3, v4));
    let t = [
        [c1.0, c2.0, c3.0],
        [c1.1, c2.1, c3.1],
        [c1.2, c2.2, c3.2],
    ];
    let inverse = invert_matrix(&t)?;
    let (b1, b2, b3) = multiply_matrix_vector(&inverse, negate_vector(v4));
    Some([b1, b2, b3, 1.0 - b1 - b2 - b3])
}
