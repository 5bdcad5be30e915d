// demos/basic_simulation.rs
// Run with `RUST_LOG=debug cargo run --example basic_simulation` to see per-frame output.

use log::info;
use rs_rigid_body::apis::scene_presets::{ball_pit, box_wall, three_body_orbit};
use rs_rigid_body::utils::PhysicsError;
use rs_rigid_body::PhysicsWorld;

fn report(name: &str, world: &PhysicsWorld) {
    println!("{} after {:.2}s:", name, world.elapsed_time());
    for (handle, body) in world.bodies().iter().enumerate().filter(|(_, body)| !body.fixed) {
        let (x, y, z) = body.position;
        let (vx, vy, vz) = body.velocity;
        println!("  body {:>2}: position=({:.3}, {:.3}, {:.3}) velocity=({:.3}, {:.3}, {:.3})", handle, x, y, z, vx, vy, vz);
    }
}

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    let mut pit = ball_pit(2, 3)?;
    let reports = pit.run(200)?;
    let collisions: usize = reports.iter().map(|report| report.collisions).sum();
    let checks: usize = reports.iter().map(|report| report.num_checks).sum();
    info!("ball pit: {} collisions from {} narrow-phase checks", collisions, checks);
    report("Ball pit", &pit);

    let mut wall = box_wall()?;
    wall.run(300)?;
    report("\nBox wall", &wall);
    for (handle, transform) in wall.transforms().iter().enumerate().skip(2) {
        let (axis, angle) = transform.rotation.to_axis_angle();
        println!("  box {} turned {:.3} rad about ({:.3}, {:.3}, {:.3})", handle, angle, axis.0, axis.1, axis.2);
    }

    let mut orbit = three_body_orbit()?;
    orbit.run(350)?;
    report("\nThree body orbit", &orbit);

    Ok(())
}
