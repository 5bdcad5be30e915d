mod body_proxy;
mod brute_force;
mod octree;

pub use body_proxy::*;
pub use brute_force::*;
pub use octree::*;
