use crate::utils::{Vector3, ZERO_VECTOR};

/// support point (for use with GJK)
///
/// `point` is a vertex of the Minkowski difference; `point_a` and `point_b` are the
/// witness points on each body that produced it (`point = point_a - point_b`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupportPoint {
    pub point: Vector3,
    pub point_a: Vector3,
    pub point_b: Vector3,
}

impl SupportPoint {
    pub fn new(point_a: Vector3, point_b: Vector3) -> Self {
        Self {
            point: (point_a.0 - point_b.0, point_a.1 - point_b.1, point_a.2 - point_b.2),
            point_a,
            point_b,
        }
    }
}

const EMPTY_SUPPORT_POINT: SupportPoint = SupportPoint {
    point: ZERO_VECTOR,
    point_a: ZERO_VECTOR,
    point_b: ZERO_VECTOR,
};

/// simplex (for use with GJK)
///
/// Holds up to four support points ordered oldest first. Each entry carries its own
/// witness points, so removing a vertex always removes its witnesses with it.
#[derive(Debug, Clone, Copy)]
pub struct Simplex {
    points: [SupportPoint; 4],
    len: usize,
}

impl Default for Simplex {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplex {
    pub fn new() -> Self {
        Self { points: [EMPTY_SUPPORT_POINT; 4], len: 0 }
    }

    /// # Panics
    /// Panics if the simplex already holds four points.
    pub fn add(&mut self, point: SupportPoint) {
        assert!(self.len < 4, "simplex cannot hold more than 4 points");
        self.points[self.len] = point;
        self.len += 1;
    }

    pub fn size(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn points(&self) -> &[SupportPoint] {
        &self.points[..self.len]
    }

    pub fn get(&self, index: usize) -> &SupportPoint {
        &self.points()[index]
    }

    /// Newest point.
    pub fn get_a(&self) -> &SupportPoint {
        &self.points[self.len - 1]
    }

    pub fn get_b(&self) -> &SupportPoint {
        &self.points[self.len - 2]
    }

    pub fn get_c(&self) -> &SupportPoint {
        &self.points[self.len - 3]
    }

    pub fn get_d(&self) -> &SupportPoint {
        &self.points[self.len - 4]
    }

    /// Removes the point at `index` (0 is the oldest), keeping the order of the rest.
    pub fn remove(&mut self, index: usize) {
        assert!(index < self.len, "simplex index {} out of range {}", index, self.len);
        self.points.copy_within(index + 1..self.len, index);
        self.len -= 1;
    }

    /// Drops everything except the newest `count` points.
    pub fn keep_newest(&mut self, count: usize) {
        let count = count.min(self.len);
        let start = self.len - count;
        self.points.copy_within(start..self.len, 0);
        self.len = count;
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        assert!(i < self.len && j < self.len, "simplex index out of range");
        self.points.swap(i, j);
    }

    pub fn minkowski_points(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.points().iter().map(|p| p.point)
    }
}
