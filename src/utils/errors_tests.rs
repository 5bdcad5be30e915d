use crate::utils::{invert_matrix, PhysicsError};

#[test]
fn test_error_messages() {
    assert_eq!(PhysicsError::InvalidMass.to_string(), "Invalid mass value");
    assert_eq!(PhysicsError::BodyNotFound(4).to_string(), "No body with handle 4");
    assert_eq!(
        PhysicsError::InvalidConfiguration("octree_size".to_string()).to_string(),
        "Invalid configuration: octree_size"
    );
    assert_eq!(
        PhysicsError::CalculationError("bodies 0 and 1 share a position".to_string()).to_string(),
        "Calculation error: bodies 0 and 1 share a position"
    );
}

#[test]
fn test_singular_matrix_is_not_an_error() {
    // a singular matrix is an expected outcome, reported through `Option`
    let singular = [[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [0.0, 0.0, 1.0]];
    assert_eq!(invert_matrix(&singular), None);
}

#[test]
fn test_errors_box_into_std_error() {
    let error: Box<dyn std::error::Error> = Box::new(PhysicsError::ZeroVector);
    assert_eq!(error.to_string(), "Zero-length vector has no direction");
}
