use log::trace;
use crate::interactions::{get_contact_manifold, gjk_collision_detection, sat, SatResult};
use crate::models::{Contact, CuboidFace, RigidBody, Shape3D};
use crate::utils::{
    add_vectors, average_point, dot_product, intersect_line_and_plane, negate_vector, scale_vector,
    subtract_vectors, try_normalize_vector, Vector3,
};

/// Used when two sphere centers coincide and no direction can be derived from them.
const FALLBACK_NORMAL: Vector3 = (0.0, 1.0, 0.0);

/// Normal and closest surface points before the contact arms are known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactDetails {
    pub normal: Vector3,
    pub obj1_closest: Vector3,
    pub obj2_closest: Vector3,
}

/// Full narrow-phase test: GJK decides whether the bodies intersect, then the contact is
/// refined according to the pair of shapes.
///
/// # Returns
/// `None` when the bodies do not intersect, including cuboid pairs whose manifold is empty.
pub fn detect_collision(body1: &RigidBody, body2: &RigidBody) -> Option<Contact> {
    let gjk = gjk_collision_detection(body1, body2)?;
    let mut contact_point = gjk.contact_point;
    let mut contact_points = Vec::new();
    let mut overlap_dist = None;

    let details = match (&body1.shape, &body2.shape) {
        (Shape3D::Sphere(_), Shape3D::Sphere(_)) => sphere_sphere_details(body1, body2),
        (Shape3D::Sphere(_), Shape3D::Cuboid(..)) => sphere_cuboid_details(body1, body2, false),
        (Shape3D::Cuboid(..), Shape3D::Sphere(_)) => sphere_cuboid_details(body2, body1, true),
        (Shape3D::Cuboid(..), Shape3D::Cuboid(..)) => {
            let cuboid = cuboid_cuboid_details(body1, body2)?;
            contact_point = cuboid.contact_point;
            contact_points = cuboid.contact_points;
            overlap_dist = Some(cuboid.overlap_dist);
            ContactDetails {
                normal: cuboid.normal,
                obj1_closest: contact_point,
                obj2_closest: contact_point,
            }
        }
    };

    trace!("{} - {} contact at {:?}, normal {:?}", body1.shape.name(), body2.shape.name(), contact_point, details.normal);

    Some(Contact {
        normal: details.normal,
        contact_point,
        contact_points,
        obj1_closest: details.obj1_closest,
        obj2_closest: details.obj2_closest,
        obj1_contact_arm: subtract_vectors(contact_point, body1.position),
        obj2_contact_arm: subtract_vectors(contact_point, body2.position),
        overlap_dist,
    })
}

/// Normal along the line of centers; closest points on each surface along it.
pub fn sphere_sphere_details(sphere1: &RigidBody, sphere2: &RigidBody) -> ContactDetails {
    let (r1, r2) = match (sphere1.shape, sphere2.shape) {
        (Shape3D::Sphere(r1), Shape3D::Sphere(r2)) => (r1, r2),
        _ => panic!("sphere_sphere_details called with a non-sphere"),
    };
    let normal = try_normalize_vector(subtract_vectors(sphere2.position, sphere1.position)).unwrap_or(FALLBACK_NORMAL);
    ContactDetails {
        normal,
        obj1_closest: add_vectors(sphere1.position, scale_vector(normal, r1)),
        obj2_closest: subtract_vectors(sphere2.position, scale_vector(normal, r2)),
    }
}

/// Contact between a sphere and a cuboid, assuming the sphere touches a face rather
/// than an edge or corner.
///
/// The chosen face is the one whose plane the sphere center lies farthest outside of.
/// `cuboid_first` says which body is "obj1" so the normal points from obj1 to obj2.
pub fn sphere_cuboid_details(sphere: &RigidBody, cuboid: &RigidBody, cuboid_first: bool) -> ContactDetails {
    let geometry = match cuboid.cuboid_geometry() {
        Some(geometry) => geometry,
        None => panic!("sphere_cuboid_details called with a non-cuboid"),
    };

    let mut face = CuboidFace::Top;
    let mut farthest = f64::NEG_INFINITY;
    for &candidate in &CuboidFace::ALL {
        let plane_point = geometry.corners[candidate.corner_indices()[0]];
        let distance = dot_product(subtract_vectors(sphere.position, plane_point), geometry.face_normal(candidate));
        if distance > farthest {
            farthest = distance;
            face = candidate;
        }
    }

    let face_normal = geometry.face_normal(face);
    let plane_point = geometry.corners[face.corner_indices()[0]];
    let into_cuboid = negate_vector(face_normal);
    let cuboid_closest = intersect_line_and_plane(sphere.position, plane_point, into_cuboid, face_normal)
        .unwrap_or(plane_point);
    let sphere_closest = sphere.support(into_cuboid);

    if cuboid_first {
        ContactDetails { normal: face_normal, obj1_closest: cuboid_closest, obj2_closest: sphere_closest }
    } else {
        ContactDetails { normal: into_cuboid, obj1_closest: sphere_closest, obj2_closest: cuboid_closest }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CuboidContact {
    pub normal: Vector3,
    pub overlap_dist: f64,
    pub contact_point: Vector3,
    pub contact_points: Vec<Vector3>,
}

/// SAT for the normal and depth, clipping for the manifold; the contact point is the
/// manifold average.
pub fn cuboid_cuboid_details(box1: &RigidBody, box2: &RigidBody) -> Option<CuboidContact> {
    let geometry1 = box1.cuboid_geometry()?;
    let geometry2 = box2.cuboid_geometry()?;

    let (normal, overlap_dist) = match sat(&geometry1, &geometry2) {
        SatResult::Separated => return None,
        SatResult::Overlap { normal, overlap_dist } => (normal, overlap_dist),
    };

    let contact_points = get_contact_manifold(&geometry1, &geometry2, normal)?;
    let contact_point = average_point(&contact_points)?;

    Some(CuboidContact { normal, overlap_dist, contact_point, contact_points })
}

/// Cheap bounding-sphere test, handy for diagnostics and as a sanity check on the GJK path.
pub fn bounding_spheres_overlap(body1: &RigidBody, body2: &RigidBody) -> bool {
    body1.bounds().overlaps(&body2.bounds())
}
