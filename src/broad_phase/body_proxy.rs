use crate::models::{BodyHandle, Bounds, RigidBody};

/// What the broad phase needs to know about a body: where it is, how far it reaches and
/// whether it can move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyProxy {
    pub handle: BodyHandle,
    pub fixed: bool,
    pub bounds: Bounds,
}

impl BodyProxy {
    pub fn new(handle: BodyHandle, body: &RigidBody) -> Self {
        Self { handle, fixed: body.fixed, bounds: body.bounds() }
    }

    /// Two immovable bodies never need a narrow-phase test.
    pub fn can_interact_with(&self, other: &BodyProxy) -> bool {
        !(self.fixed && other.fixed)
    }
}

/// Collisions reported by a broad-phase query plus the number of narrow-phase tests it ran.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionQuery<C> {
    pub collisions: Vec<C>,
    pub num_checks: usize,
}

impl<C> Default for CollisionQuery<C> {
    fn default() -> Self {
        Self { collisions: Vec::new(), num_checks: 0 }
    }
}

impl<C> CollisionQuery<C> {
    /// Runs `detect` on one pair and records the outcome.
    pub(crate) fn test_pair<F>(&mut self, first: &BodyProxy, second: &BodyProxy, detect: &mut F)
    where
        F: FnMut(&BodyProxy, &BodyProxy) -> Option<C>,
    {
        self.num_checks += 1;
        if let Some(collision) = detect(first, second) {
            self.collisions.push(collision);
        }
    }

    pub(crate) fn merge(&mut self, other: CollisionQuery<C>) {
        self.collisions.extend(other.collisions);
        self.num_checks += other.num_checks;
    }
}
