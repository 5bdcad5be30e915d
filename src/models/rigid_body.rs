use crate::models::{CuboidFace, Quaternion, Shape3D};
use crate::utils::{
    add_vectors, cross_product, dot_product, multiply_matrices, normalize_vector, quadratic_form,
    scale_vector, subtract_vectors, transpose_matrix, invert_matrix, try_normalize_vector,
    Matrix3, PhysicsError, Vector3, ZERO_MATRIX, ZERO_VECTOR,
};

/// Bounding sphere used by the broad phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub center: Vector3,
    pub radius: f64,
}

impl Bounds {
    pub fn new(center: Vector3, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Conservative sphere-sphere overlap test.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        let d = subtract_vectors(self.center, other.center);
        let reach = self.radius + other.radius;
        dot_product(d, d) <= reach * reach
    }
}

/// World-space snapshot of a cuboid: corners, outward unit face normals and rotated
/// local axes. Built fresh from the body state every time it is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidGeometry {
    pub center: Vector3,
    pub corners: [Vector3; 8],
    pub outer_face_normals: [Vector3; 6],
    pub edge_vectors: [Vector3; 3],
}

impl CuboidGeometry {
    pub fn face_normal(&self, face: CuboidFace) -> Vector3 {
        self.outer_face_normals[face.index()]
    }

    /// The four corners of `face`, anticlockwise from outside.
    pub fn face_vertices(&self, face: CuboidFace) -> [Vector3; 4] {
        face.corner_indices().map(|i| self.corners[i])
    }

    /// Corner farthest along `direction`. Ties go to the lowest corner index.
    pub fn support(&self, direction: Vector3) -> Vector3 {
        let d = normalize_vector(direction);
        let mut best = self.corners[0];
        let mut best_dot = dot_product(subtract_vectors(best, self.center), d);
        for &corner in &self.corners[1..] {
            let projection = dot_product(subtract_vectors(corner, self.center), d);
            if projection > best_dot {
                best_dot = projection;
                best = corner;
            }
        }
        best
    }

    /// The `k` corners farthest along `direction`, best first. Ties keep corner order.
    pub fn support_top_k(&self, direction: Vector3, k: usize) -> Vec<Vector3> {
        let d = normalize_vector(direction);
        let mut ranked: Vec<(f64, Vector3)> = self
            .corners
            .iter()
            .map(|&c| (dot_product(subtract_vectors(c, self.center), d), c))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.into_iter().take(k).map(|(_, c)| c).collect()
    }

    /// Projects all corners onto `axis`, returning `(min, max)`.
    pub fn project(&self, axis: Vector3) -> (f64, f64) {
        self.corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &c| {
            let p = dot_product(axis, c);
            (min.min(p), max.max(p))
        })
    }
}

/// A simulated body: shared dynamic state plus the shape-specific geometry queries.
///
/// Fixed bodies behave as if they had infinite mass; neither the integrator nor the
/// resolver ever writes to them.
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub shape: Shape3D,
    pub position: Vector3,
    pub velocity: Vector3,
    /// Rotation axis scaled by angular speed in rad/s.
    pub angular_velocity: Vector3,
    /// Accumulated rotation as axis scaled by angle. Converted to a quaternion on demand.
    pub angular_rotation: Vector3,
    pub mass: f64,
    pub fixed: bool,
    pub restitution: f64,
    /// External force applied through the center of mass this frame.
    pub center_force: Vector3,
}

impl RigidBody {
    /// Creates a body after validating its parameters.
    ///
    /// # Errors
    /// `InvalidDimension`, `InvalidMass` or `InvalidRestitution` when the respective
    /// argument is out of range.
    pub fn new(shape: Shape3D, mass: f64, position: Vector3, restitution: f64) -> Result<Self, PhysicsError> {
        shape.validate()?;
        if !(mass.is_finite() && mass > 0.0) {
            return Err(PhysicsError::InvalidMass);
        }
        if !(0.0..=1.0).contains(&restitution) {
            return Err(PhysicsError::InvalidRestitution);
        }
        Ok(Self {
            shape,
            position,
            velocity: ZERO_VECTOR,
            angular_velocity: ZERO_VECTOR,
            angular_rotation: ZERO_VECTOR,
            mass,
            fixed: false,
            restitution,
            center_force: ZERO_VECTOR,
        })
    }

    /// # Example
    /// ```
    /// use rs_rigid_body::models::RigidBody;
    ///
    /// let ball = RigidBody::new_sphere(0.5, 2.0, (0.0, 1.0, 0.0), 0.8).unwrap();
    /// assert_eq!(ball.bounds().radius, 0.5);
    /// assert!(RigidBody::new_sphere(-1.0, 2.0, (0.0, 0.0, 0.0), 0.8).is_err());
    /// ```
    pub fn new_sphere(radius: f64, mass: f64, position: Vector3, restitution: f64) -> Result<Self, PhysicsError> {
        Self::new(Shape3D::new_sphere(radius), mass, position, restitution)
    }

    pub fn new_cuboid(
        width: f64,
        height: f64,
        depth: f64,
        mass: f64,
        position: Vector3,
        restitution: f64,
    ) -> Result<Self, PhysicsError> {
        Self::new(Shape3D::new_cuboid(width, height, depth), mass, position, restitution)
    }

    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Spin about `axis` at `speed` rad/s. A zero axis leaves the body without spin.
    pub fn with_angular_velocity(mut self, axis: Vector3, speed: f64) -> Self {
        self.angular_velocity = match try_normalize_vector(axis) {
            Ok(unit) => scale_vector(unit, speed),
            Err(_) => ZERO_VECTOR,
        };
        self
    }

    /// Initial orientation of `angle` radians about `axis`.
    pub fn with_rotation(mut self, axis: Vector3, angle: f64) -> Self {
        self.angular_rotation = match try_normalize_vector(axis) {
            Ok(unit) => scale_vector(unit, angle),
            Err(_) => ZERO_VECTOR,
        };
        self
    }

    /// Marks the body as immovable scenery.
    pub fn as_fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn is_sphere(&self) -> bool {
        matches!(self.shape, Shape3D::Sphere(_))
    }

    pub fn is_cuboid(&self) -> bool {
        matches!(self.shape, Shape3D::Cuboid(..))
    }

    /// Zero for fixed bodies.
    pub fn inverse_mass(&self) -> f64 {
        if self.fixed { 0.0 } else { 1.0 / self.mass }
    }

    pub fn apply_force(&mut self, force: Vector3) {
        self.center_force = add_vectors(self.center_force, force);
    }

    pub fn clear_forces(&mut self) {
        self.center_force = ZERO_VECTOR;
    }

    pub fn rotation(&self) -> Quaternion {
        Quaternion::from_rotation_vector(self.angular_rotation)
    }

    /// Body-to-world rotation matrix.
    pub fn rotation_matrix(&self) -> Matrix3 {
        self.rotation().to_rotation_matrix()
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.position, self.shape.bounding_radius())
    }

    /// Farthest point of the body along `direction`.
    ///
    /// # Panics
    /// Panics when `direction` is the zero vector.
    pub fn support(&self, direction: Vector3) -> Vector3 {
        match self.shape {
            Shape3D::Sphere(radius) => add_vectors(self.position, scale_vector(normalize_vector(direction), radius)),
            Shape3D::Cuboid(..) => match self.cuboid_geometry() {
                Some(geometry) => geometry.support(direction),
                None => self.position,
            },
        }
    }

    /// World-space corners, recomputed from the current position and rotation.
    pub fn corners(&self) -> Option<[Vector3; 8]> {
        let rotation = self.rotation();
        self.shape
            .local_corners()
            .map(|local| local.map(|c| add_vectors(rotation.rotate_point(c), self.position)))
    }

    /// Unit outward normals in `CuboidFace` order, derived from corner edge cross products.
    pub fn outer_face_normals(&self) -> Option<[Vector3; 6]> {
        self.corners().map(|corners| face_normals_from_corners(&corners))
    }

    pub fn face_corner_indices(&self, face: CuboidFace) -> Option<[usize; 4]> {
        self.is_cuboid().then_some(face.corner_indices())
    }

    pub fn cuboid_geometry(&self) -> Option<CuboidGeometry> {
        let corners = self.corners()?;
        let r = self.rotation_matrix();
        Some(CuboidGeometry {
            center: self.position,
            corners,
            outer_face_normals: face_normals_from_corners(&corners),
            edge_vectors: [
                (r[0][0], r[1][0], r[2][0]),
                (r[0][1], r[1][1], r[2][1]),
                (r[0][2], r[1][2], r[2][2]),
            ],
        })
    }

    /// World-frame inverse inertia tensor.
    ///
    /// With `R` the world-to-body rotation this is `Rᵗ · I₀⁻¹ · R`, recomputed on every call
    /// because the body keeps turning. Fixed bodies return the zero matrix.
    pub fn inverse_inertia(&self) -> Matrix3 {
        if self.fixed {
            return ZERO_MATRIX;
        }
        inverse_world_inertia(&self.shape.moment_of_inertia(self.mass), &self.rotation_matrix())
    }

    /// Kinetic energy as if the body had unit mass: `½ωᵀIω + ½|v|²`.
    pub fn normalised_kinetic_energy(&self) -> f64 {
        let body_inertia = self.shape.moment_of_inertia(1.0);
        let r = self.rotation_matrix();
        let world_inertia = multiply_matrices(&multiply_matrices(&r, &body_inertia), &transpose_matrix(&r));
        0.5 * quadratic_form(self.angular_velocity, &world_inertia) + 0.5 * dot_product(self.velocity, self.velocity)
    }
}

fn inverse_world_inertia(body_inertia: &Matrix3, body_to_world: &Matrix3) -> Matrix3 {
    match invert_matrix(body_inertia) {
        Some(inverse) => multiply_matrices(&multiply_matrices(body_to_world, &inverse), &transpose_matrix(body_to_world)),
        // Validated shapes with positive mass always have an invertible tensor.
        None => ZERO_MATRIX,
    }
}

fn face_normals_from_corners(corners: &[Vector3; 8]) -> [Vector3; 6] {
    CuboidFace::ALL.map(|face| {
        let (o, p, q) = face.normal_corner_indices();
        let normal = cross_product(subtract_vectors(corners[p], corners[o]), subtract_vectors(corners[q], corners[o]));
        normalize_vector(normal)
    })
}
