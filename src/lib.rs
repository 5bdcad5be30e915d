pub mod utils;
pub mod models;
pub mod interactions;
pub mod broad_phase;
pub mod dynamics;
pub mod world;
pub mod apis;

pub use world::*;

/// ### General helper function
/// - Asserts that two floating point numbers are approximately equal.
///
/// ### Arguments
///
/// * `a` - The first floating point number.
/// * `b` - The second floating point number.
/// * `epsilon` - The maximum difference between `a` and `b` for them to be considered equal.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64, optional_message: Option<&str>) {
    match optional_message {
        Some(message) => assert!((a - b).abs() < epsilon, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!((a - b).abs() < epsilon, "Expected {} to be approximately equal to {} (epsilon: {})", a, b, epsilon),
    }
}

/// ### General helper function
/// - Asserts that two vectors are approximately equal component by component.
///
/// ### Arguments
///
/// * `a` - The first vector.
/// * `b` - The second vector.
/// * `epsilon` - The maximum difference allowed on each component.
/// * `optional_message` - An optional message to display if the assertion fails.
///
pub fn assert_vector_eq(a: utils::Vector3, b: utils::Vector3, epsilon: f64, optional_message: Option<&str>) {
    let close = (a.0 - b.0).abs() < epsilon && (a.1 - b.1).abs() < epsilon && (a.2 - b.2).abs() < epsilon;
    match optional_message {
        Some(message) => assert!(close, "a: {:?},\nb: {:?},\nepsilon: {:?},\n message: {:?}", a, b, epsilon, message),
        None => assert!(close, "Expected {:?} to be approximately equal to {:?} (epsilon: {})", a, b, epsilon),
    }
}
