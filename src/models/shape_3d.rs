use crate::utils::{diagonal_matrix, Matrix3, PhysicsError, Vector3};

/// The convex primitives a rigid body can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape3D {
    /// Sphere with a radius
    Sphere(f64),
    /// Cuboid with full dimensions (width, height, depth) along the local x, y and z axes
    Cuboid(f64, f64, f64),
}

/// Faces of a cuboid in the order used by every per-face table in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CuboidFace {
    /// +y
    Top,
    /// -x
    Left,
    /// +x
    Right,
    /// -y
    Bottom,
    /// -z
    Back,
    /// +z
    Forward,
}

/// Sign pattern of each local corner; multiply by the half extents to get the corner.
pub const CUBOID_CORNER_SIGNS: [Vector3; 8] = [
    (1.0, 1.0, 1.0),
    (-1.0, 1.0, 1.0),
    (1.0, -1.0, 1.0),
    (1.0, 1.0, -1.0),
    (-1.0, -1.0, 1.0),
    (1.0, -1.0, -1.0),
    (-1.0, 1.0, -1.0),
    (-1.0, -1.0, -1.0),
];

impl CuboidFace {
    pub const ALL: [CuboidFace; 6] = [
        CuboidFace::Top,
        CuboidFace::Left,
        CuboidFace::Right,
        CuboidFace::Bottom,
        CuboidFace::Back,
        CuboidFace::Forward,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Indices into the corner array of the four corners of this face, anticlockwise
    /// when viewed from outside. Corner 1 is adjacent to corners 0 and 2, which the
    /// manifold clipper relies on.
    pub fn corner_indices(self) -> [usize; 4] {
        match self {
            CuboidFace::Top => [1, 0, 3, 6],
            CuboidFace::Left => [6, 7, 4, 1],
            CuboidFace::Right => [3, 0, 2, 5],
            CuboidFace::Bottom => [4, 7, 5, 2],
            CuboidFace::Back => [6, 3, 5, 7],
            CuboidFace::Forward => [1, 4, 2, 0],
        }
    }

    /// Corner indices `(origin, p, q)` whose edge cross product `(p - origin) × (q - origin)`
    /// points out of this face.
    pub fn normal_corner_indices(self) -> (usize, usize, usize) {
        match self {
            CuboidFace::Top => (0, 3, 1),
            CuboidFace::Left => (4, 1, 7),
            CuboidFace::Right => (2, 5, 0),
            CuboidFace::Bottom => (2, 4, 5),
            CuboidFace::Back => (5, 7, 3),
            CuboidFace::Forward => (2, 0, 4),
        }
    }
}

impl Shape3D {
    /// Creates a new sphere with the given radius
    pub fn new_sphere(radius: f64) -> Self {
        Shape3D::Sphere(radius)
    }

    /// Creates a new cuboid with the given dimensions
    pub fn new_cuboid(width: f64, height: f64, depth: f64) -> Self {
        Shape3D::Cuboid(width, height, depth)
    }

    /// Checks that every dimension is finite and strictly positive.
    pub fn validate(&self) -> Result<(), PhysicsError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        let ok = match *self {
            Shape3D::Sphere(radius) => valid(radius),
            Shape3D::Cuboid(w, h, d) => valid(w) && valid(h) && valid(d),
        };
        if ok { Ok(()) } else { Err(PhysicsError::InvalidDimension) }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape3D::Sphere(_) => "sphere",
            Shape3D::Cuboid(..) => "cuboid",
        }
    }

    /// Returns the body-frame inertia tensor around the center of mass.
    pub fn moment_of_inertia(&self, mass: f64) -> Matrix3 {
        match *self {
            Shape3D::Sphere(radius) => {
                // For a solid sphere, moment of inertia is (2/5) * m * r²
                let i = (2.0 / 5.0) * mass * radius.powi(2);
                diagonal_matrix(i, i, i)
            }
            Shape3D::Cuboid(w, h, d) => {
                // Ixx = (1/12) * m * (h² + d²)
                // Iyy = (1/12) * m * (w² + d²)
                // Izz = (1/12) * m * (w² + h²)
                let c = mass / 12.0;
                diagonal_matrix(
                    c * (h.powi(2) + d.powi(2)),
                    c * (w.powi(2) + d.powi(2)),
                    c * (w.powi(2) + h.powi(2)),
                )
            }
        }
    }

    /// Radius of the smallest sphere around the center that contains the shape
    /// in any orientation.
    pub fn bounding_radius(&self) -> f64 {
        match *self {
            Shape3D::Sphere(radius) => radius,
            Shape3D::Cuboid(w, h, d) => (w * w + h * h + d * d).sqrt() / 2.0,
        }
    }

    /// Unrotated corners relative to the center. Spheres have none.
    pub fn local_corners(&self) -> Option<[Vector3; 8]> {
        match *self {
            Shape3D::Sphere(_) => None,
            Shape3D::Cuboid(w, h, d) => {
                let (hw, hh, hd) = (w / 2.0, h / 2.0, d / 2.0);
                Some(CUBOID_CORNER_SIGNS.map(|(sx, sy, sz)| (sx * hw, sy * hh, sz * hd)))
            }
        }
    }
}
