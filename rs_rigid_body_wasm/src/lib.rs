// rs_rigid_body_wasm/src/lib.rs
// Browser-facing wrapper around a PhysicsWorld. The page owns the meshes and copies
// positions and rotations out once per frame.

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;
use rs_rigid_body::PhysicsWorld;
use rs_rigid_body::models::RigidBody;
use rs_rigid_body::utils::{BroadPhaseKind, PhysicsError, SimulationConfig};

fn to_js(error: PhysicsError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

#[wasm_bindgen]
pub struct WasmWorld {
    world: PhysicsWorld,
}

#[wasm_bindgen]
impl WasmWorld {
    /// `time_step` of zero or less falls back to the default step.
    #[wasm_bindgen(constructor)]
    pub fn new(gravity: f64, time_step: f64, brute_force: bool) -> Result<WasmWorld, JsValue> {
        let config = SimulationConfig::new(
            Some(gravity),
            (time_step > 0.0).then_some(time_step),
            None,
            None,
            brute_force.then_some(BroadPhaseKind::BruteForce),
        );
        PhysicsWorld::new(config).map(|world| Self { world }).map_err(to_js)
    }

    /// Adds a sphere and returns its index.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_sphere(
        &mut self,
        radius: f64,
        mass: f64,
        x: f64,
        y: f64,
        z: f64,
        vx: f64,
        vy: f64,
        vz: f64,
        restitution: f64,
        fixed: bool,
    ) -> Result<usize, JsValue> {
        let mut body = RigidBody::new_sphere(radius, mass, (x, y, z), restitution)
            .map_err(to_js)?
            .with_velocity((vx, vy, vz));
        body.fixed = fixed;
        Ok(self.world.add_body(body))
    }

    /// Adds a box rotated by `angle` about the axis `(ax, ay, az)` and returns its index.
    #[wasm_bindgen]
    #[allow(clippy::too_many_arguments)]
    pub fn add_cuboid(
        &mut self,
        width: f64,
        height: f64,
        depth: f64,
        mass: f64,
        x: f64,
        y: f64,
        z: f64,
        ax: f64,
        ay: f64,
        az: f64,
        angle: f64,
        restitution: f64,
        fixed: bool,
    ) -> Result<usize, JsValue> {
        let mut body = RigidBody::new_cuboid(width, height, depth, mass, (x, y, z), restitution)
            .map_err(to_js)?
            .with_rotation((ax, ay, az), angle);
        body.fixed = fixed;
        Ok(self.world.add_body(body))
    }

    /// Advances the world and returns the number of resolved collisions.
    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<usize, JsValue> {
        let report = self.world.step().map_err(to_js)?;
        if report.collisions > 0 {
            web_sys::console::debug_1(&JsValue::from_str(&format!(
                "{} collisions from {} checks",
                report.collisions, report.num_checks
            )));
        }
        Ok(report.collisions)
    }

    /// Positions packed as `[x0, y0, z0, x1, y1, z1, ...]`.
    #[wasm_bindgen]
    pub fn positions(&self) -> Float64Array {
        let flat: Vec<f64> = self
            .world
            .transforms()
            .iter()
            .flat_map(|transform| {
                let (x, y, z) = transform.position;
                [x, y, z]
            })
            .collect();
        Float64Array::from(flat.as_slice())
    }

    /// Rotations as quaternions packed `[x, y, z, w]` per body, the order three.js expects.
    #[wasm_bindgen]
    pub fn rotations(&self) -> Float64Array {
        let flat: Vec<f64> = self
            .world
            .transforms()
            .iter()
            .flat_map(|transform| {
                let q = transform.rotation;
                [q.x, q.y, q.z, q.w]
            })
            .collect();
        Float64Array::from(flat.as_slice())
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.world.len()
    }

    #[wasm_bindgen(getter)]
    pub fn elapsed_time(&self) -> f64 {
        self.world.elapsed_time()
    }
}
