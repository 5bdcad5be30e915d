use std::f64::consts::PI;
use crate::{assert_float_eq, assert_vector_eq};
use crate::interactions::{best_plane, clip, get_contact_manifold};
use crate::models::{CuboidFace, CuboidGeometry, RigidBody};
use crate::utils::Vector3;

fn geometry(width: f64, height: f64, depth: f64, position: Vector3) -> CuboidGeometry {
    RigidBody::new_cuboid(width, height, depth, 1.0, position, 1.0)
        .unwrap()
        .cuboid_geometry()
        .unwrap()
}

fn assert_contains(points: &[Vector3], expected: Vector3) {
    assert!(
        points.iter().any(|p| (p.0 - expected.0).abs() < 1e-9 && (p.1 - expected.1).abs() < 1e-9 && (p.2 - expected.2).abs() < 1e-9),
        "{:?} not in {:?}",
        expected,
        points
    );
}

#[test]
fn test_best_plane() {
    let cube = geometry(1.0, 1.0, 1.0, (0.0, 0.0, 0.0));
    let (face, normal) = best_plane(&cube, (0.2, -1.0, 0.1));
    assert_eq!(face, CuboidFace::Bottom);
    assert_vector_eq(normal, (0.0, -1.0, 0.0), 1e-12, None);
    assert_eq!(best_plane(&cube, (0.0, 0.0, 3.0)).0, CuboidFace::Forward);
}

#[test]
fn test_clip_square_through_the_middle() {
    let square = [(-1.0, 0.0, -1.0), (1.0, 0.0, -1.0), (1.0, 0.0, 1.0), (-1.0, 0.0, 1.0)];
    let kept = clip(&square, (1.0, 0.0, 0.0), 0.0);
    assert_eq!(kept.len(), 4);
    assert_contains(&kept, (0.0, 0.0, -1.0));
    assert_contains(&kept, (1.0, 0.0, -1.0));
    assert_contains(&kept, (1.0, 0.0, 1.0));
    assert_contains(&kept, (0.0, 0.0, 1.0));
}

#[test]
fn test_clip_keeps_everything_inside() {
    let square = [(-1.0, 0.0, -1.0), (1.0, 0.0, -1.0), (1.0, 0.0, 1.0), (-1.0, 0.0, 1.0)];
    assert_eq!(clip(&square, (1.0, 0.0, 0.0), -5.0), square.to_vec());
    assert!(clip(&square, (1.0, 0.0, 0.0), 5.0).is_empty());
}

#[test]
fn test_manifold_along_x() {
    let a = geometry(1.0, 1.0, 1.0, (0.0, 0.0, 0.0));
    let b = geometry(1.0, 1.0, 1.0, (0.95, 0.0, 0.0));
    let points = get_contact_manifold(&a, &b, (1.0, 0.0, 0.0)).unwrap();
    assert_eq!(points.len(), 4);
    for p in &points {
        assert_float_eq(p.0, 0.45, 1e-9, None);
    }
    assert_contains(&points, (0.45, 0.5, 0.5));
    assert_contains(&points, (0.45, -0.5, -0.5));
}

#[test]
fn test_manifold_for_offset_cubes_is_the_shared_patch() {
    let a = geometry(1.0, 1.0, 1.0, (0.0, 0.0, 2.0));
    let b = geometry(1.0, 1.0, 1.0, (0.95, 0.95, 2.0));
    let points = get_contact_manifold(&a, &b, (0.0, 1.0, 0.0)).unwrap();
    assert_eq!(points.len(), 4);
    for p in &points {
        assert_float_eq(p.1, 0.45, 1e-9, None);
        assert!(p.0 >= 0.45 - 1e-9 && p.0 <= 0.5 + 1e-9);
    }
}

#[test]
fn test_manifold_for_rotated_box_is_an_edge() {
    let tall = geometry(1.0, 10.0, 1.0, (0.0, 0.0, 0.0));
    let x = 0.5 + 0.5_f64.sqrt() - 0.05;
    let turned = RigidBody::new_cuboid(1.0, 1.0, 1.0, 1.0, (x, 4.0, 0.0), 1.0)
        .unwrap()
        .with_rotation((0.0, 0.0, 1.0), PI / 4.0)
        .cuboid_geometry()
        .unwrap();
    let points = get_contact_manifold(&tall, &turned, (1.0, 0.0, 0.0)).unwrap();
    assert_eq!(points.len(), 2);
    assert_contains(&points, (0.45, 4.0, 0.5));
    assert_contains(&points, (0.45, 4.0, -0.5));
}

#[test]
fn test_manifold_on_big_floor_box() {
    let floor = geometry(10.0, 10.0, 10.0, (0.0, -5.0, 0.0));
    let cube = geometry(1.0, 1.0, 1.0, (0.0, 0.49, 0.0));
    let points = get_contact_manifold(&floor, &cube, (0.0, 1.0, 0.0)).unwrap();
    assert_eq!(points.len(), 4);
    for p in &points {
        assert_float_eq(p.1, -0.01, 1e-9, None);
    }
}

#[test]
fn test_no_manifold_without_penetration() {
    let a = geometry(1.0, 1.0, 1.0, (0.0, 0.0, 0.0));
    let b = geometry(1.0, 1.0, 1.0, (0.0, 1.2, 0.0));
    assert!(get_contact_manifold(&a, &b, (0.0, 1.0, 0.0)).is_none());
}
