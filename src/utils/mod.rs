mod constants;
mod constants_config;
mod errors;
mod math_helpers;

pub use constants::*;
pub use constants_config::*;
pub use errors::*;
pub use math_helpers::*;

#[cfg(test)]
mod constants_config_tests;
#[cfg(test)]
mod errors_tests;
