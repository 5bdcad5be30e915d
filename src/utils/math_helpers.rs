use crate::utils::{PhysicsError, EPSILON};

/// A 3D vector stored as `(x, y, z)`.
pub type Vector3 = (f64, f64, f64);

/// A row-major 3x3 matrix.
pub type Matrix3 = [[f64; 3]; 3];

pub const ZERO_VECTOR: Vector3 = (0.0, 0.0, 0.0);

pub const ZERO_MATRIX: Matrix3 = [[0.0; 3]; 3];

pub const IDENTITY_MATRIX: Matrix3 = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// Adds two vectors component-wise.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::add_vectors;
///
/// assert_eq!(add_vectors((1.0, 2.0, 3.0), (4.0, 5.0, 6.0)), (5.0, 7.0, 9.0));
/// ```
#[inline]
pub fn add_vectors(a: Vector3, b: Vector3) -> Vector3 {
    (a.0 + b.0, a.1 + b.1, a.2 + b.2)
}

/// Subtracts `b` from `a` component-wise.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::subtract_vectors;
///
/// assert_eq!(subtract_vectors((4.0, 5.0, 6.0), (1.0, 2.0, 3.0)), (3.0, 3.0, 3.0));
/// ```
#[inline]
pub fn subtract_vectors(a: Vector3, b: Vector3) -> Vector3 {
    (a.0 - b.0, a.1 - b.1, a.2 - b.2)
}

/// Multiplies every component of `v` by `scalar`.
#[inline]
pub fn scale_vector(v: Vector3, scalar: f64) -> Vector3 {
    (v.0 * scalar, v.1 * scalar, v.2 * scalar)
}

#[inline]
pub fn negate_vector(v: Vector3) -> Vector3 {
    (-v.0, -v.1, -v.2)
}

/// Calculates the dot product of two 3D vectors.
///
/// # Arguments
/// * `a` - The first vector.
/// * `b` - The second vector.
///
/// # Returns
/// The scalar `a · b`.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::dot_product;
///
/// assert_eq!(dot_product((1.0, 2.0, 3.0), (4.0, 5.0, 6.0)), 32.0);
/// ```
#[inline]
pub fn dot_product(a: Vector3, b: Vector3) -> f64 {
    a.0 * b.0 + a.1 * b.1 + a.2 * b.2
}

/// Calculates the cross product of two 3D vectors.
///
/// # Arguments
/// * `a` - The first vector.
/// * `b` - The second vector.
///
/// # Returns
/// The vector `a × b`, perpendicular to both inputs.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::cross_product;
///
/// assert_eq!(cross_product((1.0, 0.0, 0.0), (0.0, 1.0, 0.0)), (0.0, 0.0, 1.0));
/// ```
#[inline]
pub fn cross_product(a: Vector3, b: Vector3) -> Vector3 {
    (
        a.1 * b.2 - a.2 * b.1,
        a.2 * b.0 - a.0 * b.2,
        a.0 * b.1 - a.1 * b.0,
    )
}

#[inline]
pub fn squared_magnitude(v: Vector3) -> f64 {
    dot_product(v, v)
}

/// Calculates the Euclidean length of a vector.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::vector_magnitude;
///
/// assert_eq!(vector_magnitude((3.0, 4.0, 0.0)), 5.0);
/// ```
#[inline]
pub fn vector_magnitude(v: Vector3) -> f64 {
    squared_magnitude(v).sqrt()
}

/// Returns the unit vector pointing the same way as `v`.
///
/// # Panics
/// Panics when `v` has zero length. Use [`try_normalize_vector`] when the input
/// comes from simulation data rather than from the caller.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::normalize_vector;
///
/// assert_eq!(normalize_vector((0.0, 3.0, 0.0)), (0.0, 1.0, 0.0));
/// ```
pub fn normalize_vector(v: Vector3) -> Vector3 {
    let magnitude = vector_magnitude(v);
    assert!(magnitude > 0.0, "cannot normalize a zero-length vector");
    scale_vector(v, 1.0 / magnitude)
}

/// Checked form of [`normalize_vector`].
///
/// # Errors
/// Returns `PhysicsError::ZeroVector` when the magnitude is below `EPSILON`.
pub fn try_normalize_vector(v: Vector3) -> Result<Vector3, PhysicsError> {
    let magnitude = vector_magnitude(v);
    if magnitude < EPSILON {
        return Err(PhysicsError::ZeroVector);
    }
    Ok(scale_vector(v, 1.0 / magnitude))
}

/// True when the angle between `a` and `b` is strictly less than 90 degrees.
#[inline]
pub fn same_direction(a: Vector3, b: Vector3) -> bool {
    dot_product(a, b) > 0.0
}

/// Mean of a non-empty set of points.
pub fn average_point(points: &[Vector3]) -> Option<Vector3> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(ZERO_VECTOR, |acc, &p| add_vectors(acc, p));
    Some(scale_vector(sum, 1.0 / points.len() as f64))
}

pub fn diagonal_matrix(x: f64, y: f64, z: f64) -> Matrix3 {
    [[x, 0.0, 0.0], [0.0, y, 0.0], [0.0, 0.0, z]]
}

pub fn transpose_matrix(m: &Matrix3) -> Matrix3 {
    let mut t = ZERO_MATRIX;
    for (i, row) in m.iter().enumerate() {
        for (j, value) in row.iter().enumerate() {
            t[j][i] = *value;
        }
    }
    t
}

pub fn multiply_matrices(a: &Matrix3, b: &Matrix3) -> Matrix3 {
    let mut result = ZERO_MATRIX;
    for i in 0..3 {
        for j in 0..3 {
            result[i][j] = (0..3).map(|k| a[i][k] * b[k][j]).sum();
        }
    }
    result
}

pub fn multiply_matrix_vector(m: &Matrix3, v: Vector3) -> Vector3 {
    (
        m[0][0] * v.0 + m[0][1] * v.1 + m[0][2] * v.2,
        m[1][0] * v.0 + m[1][1] * v.1 + m[1][2] * v.2,
        m[2][0] * v.0 + m[2][1] * v.1 + m[2][2] * v.2,
    )
}

/// Evaluates the quadratic form `vᵀ · M · v`.
pub fn quadratic_form(v: Vector3, m: &Matrix3) -> f64 {
    dot_product(v, multiply_matrix_vector(m, v))
}

pub fn determinant(m: &Matrix3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Inverts a 3x3 matrix using the adjugate.
///
/// # Returns
/// `None` when the determinant is within `EPSILON` of zero.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::{invert_matrix, diagonal_matrix};
///
/// let inverse = invert_matrix(&diagonal_matrix(2.0, 4.0, 8.0)).unwrap();
/// assert_eq!(inverse, diagonal_matrix(0.5, 0.25, 0.125));
///
/// let singular = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]];
/// assert!(invert_matrix(&singular).is_none());
/// ```
pub fn invert_matrix(m: &Matrix3) -> Option<Matrix3> {
    let det = determinant(m);
    if det.abs() < EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    Some([
        [
            (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
            (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
            (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
        ],
        [
            (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
            (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
            (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
        ],
        [
            (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
            (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
            (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
        ],
    ])
}

/// Finds where the line `line_point + t * line_direction` meets a plane.
///
/// Both directions are normalized before solving, so their lengths do not matter.
///
/// # Arguments
/// * `line_point` - Any point on the line.
/// * `plane_point` - Any point on the plane.
/// * `line_direction` - Direction of the line (non-zero).
/// * `plane_normal` - Normal of the plane (non-zero).
///
/// # Returns
/// `None` when the line runs parallel to the plane.
///
/// # Example
/// ```
/// use rs_rigid_body::utils::intersect_line_and_plane;
///
/// let hit = intersect_line_and_plane(
///     (0.0, 0.0, 0.0),
///     (5.0, 14.0, 18.0),
///     (1.0, 1.0, 1.0),
///     (0.0, -1.0, 0.0),
/// ).unwrap();
/// assert!((hit.0 - 14.0).abs() < 1e-9 && (hit.1 - 14.0).abs() < 1e-9 && (hit.2 - 14.0).abs() < 1e-9);
/// ```
pub fn intersect_line_and_plane(
    line_point: Vector3,
    plane_point: Vector3,
    line_direction: Vector3,
    plane_normal: Vector3,
) -> Option<Vector3> {
    let direction = normalize_vector(line_direction);
    let normal = normalize_vector(plane_normal);
    let denominator = dot_product(direction, normal);
    if denominator.abs() < EPSILON {
        return None;
    }
    let t = dot_product(subtract_vectors(plane_point, line_point), normal) / denominator;
    Some(add_vectors(line_point, scale_vector(direction, t)))
}
