mod collision_resolver;
#[cfg(feature = "damping")]
mod damping;
mod integrator;
mod mutual_gravity;

pub use collision_resolver::*;
#[cfg(feature = "damping")]
pub use damping::*;
pub use integrator::*;
pub use mutual_gravity::*;

#[cfg(test)]
mod collision_resolver_tests;
