mod contact_manifold;
mod gjk_collision_3d;
mod narrow_phase;
mod separating_axis;

pub use contact_manifold::*;
pub use gjk_collision_3d::*;
pub use narrow_phase::*;
pub use separating_axis::*;

#[cfg(test)]
mod contact_manifold_tests;
