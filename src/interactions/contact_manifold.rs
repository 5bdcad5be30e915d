use crate::models::{CuboidFace, CuboidGeometry};
use crate::utils::{
    add_vectors, dot_product, negate_vector, normalize_vector, scale_vector, subtract_vectors, Vector3,
};

/// Face of `geometry` whose outward normal has the largest dot product with `direction`.
pub fn best_plane(geometry: &CuboidGeometry, direction: Vector3) -> (CuboidFace, Vector3) {
    most_aligned_face(geometry, |normal| dot_product(direction, normal))
}

fn most_aligned_face(geometry: &CuboidGeometry, score: impl Fn(Vector3) -> f64) -> (CuboidFace, Vector3) {
    let mut best = (CuboidFace::ALL[0], geometry.face_normal(CuboidFace::ALL[0]));
    let mut best_score = score(best.1);
    for &face in &CuboidFace::ALL[1..] {
        let normal = geometry.face_normal(face);
        let s = score(normal);
        if s > best_score {
            best_score = s;
            best = (face, normal);
        }
    }
    best
}

/// One Sutherland–Hodgman step: keeps the part of the polygon where `dot(p, n) >= offset`,
/// inserting a vertex wherever an edge crosses the clipping plane.
pub fn clip(points: &[Vector3], n: Vector3, offset: f64) -> Vec<Vector3> {
    let count = points.len();
    let distances: Vec<f64> = points.iter().map(|&p| dot_product(p, n) - offset).collect();
    let mut kept = Vec::with_capacity(count + 1);

    for i in 0..count {
        if distances[i] >= 0.0 {
            kept.push(points[i]);
        }
        let j = (i + 1) % count;
        if distances[i] * distances[j] < 0.0 {
            let edge = subtract_vectors(points[j], points[i]);
            let u = distances[i] / (distances[i] - distances[j]);
            kept.push(add_vectors(points[i], scale_vector(edge, u)));
        }
    }
    kept
}

/// Contact manifold between two overlapping boxes along the SAT `normal` (box1 → box2).
///
/// The reference face is whichever box's best face lines up more closely with the normal;
/// the incident face is the other box's face most opposed to the reference normal. The
/// incident face is clipped against the four side planes of the reference face, then points
/// that do not reach below the reference face are dropped.
///
/// # Returns
/// `None` when fewer than two points survive any clip, or when nothing penetrates.
pub fn get_contact_manifold(box1: &CuboidGeometry, box2: &CuboidGeometry, normal: Vector3) -> Option<Vec<Vector3>> {
    let (face1, normal1) = best_plane(box1, normal);
    let (face2, normal2) = best_plane(box2, negate_vector(normal));

    let (reference, ref_face, ref_normal, incident) =
        if dot_product(normal1, normal).abs() >= dot_product(normal2, normal).abs() {
            (box1, face1, normal1, box2)
        } else {
            (box2, face2, normal2, box1)
        };

    let (inc_face, _) = most_aligned_face(incident, |n| -dot_product(n, ref_normal));

    // v1 is adjacent to both v0 and v2, so these are the two edge directions of the face
    let ref_vertices = reference.face_vertices(ref_face);
    let ref_v1 = normalize_vector(subtract_vectors(ref_vertices[2], ref_vertices[1]));
    let ref_v2 = normalize_vector(subtract_vectors(ref_vertices[0], ref_vertices[1]));

    let side_planes = [
        (ref_v1, dot_product(ref_v1, ref_vertices[1])),
        (negate_vector(ref_v1), -dot_product(ref_v1, ref_vertices[2])),
        (ref_v2, dot_product(ref_v2, ref_vertices[1])),
        (negate_vector(ref_v2), -dot_product(ref_v2, ref_vertices[0])),
    ];

    let mut clipped = incident.face_vertices(inc_face).to_vec();
    for (n, offset) in side_planes {
        clipped = clip(&clipped, n, offset);
        if clipped.len() < 2 {
            return None;
        }
    }

    let inward = negate_vector(ref_normal);
    let face_depth = dot_product(inward, ref_vertices[0]);
    clipped.retain(|&p| dot_product(inward, p) - face_depth >= 0.0);

    if clipped.is_empty() { None } else { Some(clipped) }
}
