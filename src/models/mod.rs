mod collision;
mod quaternion;
mod rigid_body;
mod shape_3d;
mod simplex;

pub use collision::*;
pub use quaternion::*;
pub use rigid_body::*;
pub use shape_3d::*;
pub use simplex::*;
