use crate::utils::{scale_vector, vector_magnitude, Matrix3, Vector3, EPSILON};

/// Quaternion representation for 3D rotations
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Creates a new identity quaternion (no rotation)
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn is_near_identity(&self, epsilon: f64) -> bool {
        (self.w - 1.0).abs() < epsilon &&
            self.x.abs() < epsilon &&
            self.y.abs() < epsilon &&
            self.z.abs() < epsilon
    }

    /// Creates a quaternion from axis-angle representation.
    ///
    /// The axis does not need to be unit length. A zero axis gives the identity.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let magnitude = vector_magnitude(axis);
        if magnitude < EPSILON {
            return Quaternion::identity();
        }

        let half_angle = angle / 2.0;
        let sin_half = half_angle.sin();
        let (nx, ny, nz) = scale_vector(axis, 1.0 / magnitude);

        Quaternion {
            w: half_angle.cos(),
            x: nx * sin_half,
            y: ny * sin_half,
            z: nz * sin_half,
        }
    }

    /// Creates a quaternion from a rotation vector whose direction is the axis and whose
    /// length is the angle in radians.
    pub fn from_rotation_vector(rotation: Vector3) -> Self {
        let angle = vector_magnitude(rotation);
        if angle < EPSILON {
            return Quaternion::identity();
        }
        Self::from_axis_angle(rotation, angle)
    }

    /// Converts back to `(unit axis, angle)` with the angle in `[0, 2π]`.
    ///
    /// A rotation of (almost) zero has no meaningful axis; `(1, 0, 0)` is returned for it.
    pub fn to_axis_angle(&self) -> (Vector3, f64) {
        let q = self.normalized();
        let w = q.w.clamp(-1.0, 1.0);
        let angle = 2.0 * w.acos();
        let s = (1.0 - w * w).sqrt();
        if s < EPSILON {
            return ((1.0, 0.0, 0.0), 0.0);
        }
        ((q.x / s, q.y / s, q.z / s), angle)
    }

    /// Returns the length/magnitude of the quaternion
    pub fn magnitude(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a normalized version of the quaternion
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < EPSILON {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Hamilton product `self * other` (apply `other` first, then `self`).
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Returns the conjugate of the quaternion
    pub fn conjugate(&self) -> Quaternion {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Rotates a point using `q * p * q*`.
    pub fn rotate_point(&self, point: Vector3) -> Vector3 {
        let p = Quaternion {
            w: 0.0,
            x: point.0,
            y: point.1,
            z: point.2,
        };

        let q = self.normalized();
        let rotated = q.multiply(&p).multiply(&q.conjugate());

        (rotated.x, rotated.y, rotated.z)
    }

    /// Rotation matrix equivalent of this (normalized) quaternion.
    pub fn to_rotation_matrix(&self) -> Matrix3 {
        let Quaternion { w, x, y, z } = self.normalized();
        [
            [1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y - w * z), 2.0 * (x * z + w * y)],
            [2.0 * (x * y + w * z), 1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z - w * x)],
            [2.0 * (x * z - w * y), 2.0 * (y * z + w * x), 1.0 - 2.0 * (x * x + y * y)],
        ]
    }
}
