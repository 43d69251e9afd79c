//! Boids-style layout demo: registers the simulation types, then prints
//! the composed WGSL module and the wgpu vertex layouts built from the
//! same descriptors.
//!
//! Run with `cargo run --example boids`.

use glam::Vec2;
use wgsl_types::{
    build_vertex_layouts, compose_shader, wgsl_struct, TypeRegistry, VertexAttributeRef,
    VertexBufferDef,
};

wgsl_struct! {
    pub struct SimParams {
        pub delta_t: f32 = 0.04,
        pub avoid_distance: f32 = 0.025,
        pub c_mass_distance: f32 = 0.1,
        pub c_vel_distance: f32 = 0.025,
        pub avoid_scale: f32 = 0.05,
        pub c_mass_scale: f32 = 0.02,
        pub c_vel_scale: f32 = 0.005,
    }
}

wgsl_struct! {
    pub struct Particle {
        pub pos: Vec2,
        pub vel: Vec2,
    }
}

wgsl_struct! {
    pub struct Vertex {
        pub pos: Vec2,
    }
}

wgsl_struct! {
    /// Storage-buffer tail holding the live particles. The `pad0` field
    /// keeps `elements` on the 8-byte boundary `vec2<f32>` demands.
    pub struct Particles {
        #[atomic] pub count: u32,
        pub pad0: u32,
        #[runtime_array] pub elements: [Particle; 64] = [Particle::default(); 64],
    }
}

const COMPUTE_BODY: &str = "\
@group(0) @binding(0) var<uniform> params : SimParams;
@group(0) @binding(1) var<storage, read_write> data : Particles;

@compute @workgroup_size(64)
fn step(@builtin(global_invocation_id) id : vec3<u32>) {
  let p = data.elements[id.x];
  data.elements[id.x].pos = p.pos + p.vel * params.delta_t;
}
";

fn main() {
    env_logger::init();

    let mut registry = TypeRegistry::new();
    let sim_params = registry.must_register::<SimParams>();
    let particle = registry.must_register::<Particle>();
    let vertex = registry.must_register::<Vertex>();
    let particles = registry.must_register::<Particles>();

    let shader = compose_shader(
        &[sim_params.clone(), particle.clone(), particles.clone()],
        COMPUTE_BODY,
    );
    println!("--- composed WGSL module ---");
    println!("{shader}");

    println!("--- descriptors ---");
    print!("{sim_params}");
    print!("{particle}");
    print!("{particles}");

    let layouts = build_vertex_layouts(
        &[
            VertexBufferDef::per_instance(&particle),
            VertexBufferDef::per_vertex(&vertex),
        ],
        &[
            VertexAttributeRef { buffer: 0, field: "pos" },
            VertexAttributeRef { buffer: 0, field: "vel" },
            VertexAttributeRef { buffer: 1, field: "pos" },
        ],
    )
    .expect("vertex fields are registered");

    println!("--- vertex layouts ---");
    for (index, layout) in layouts.iter().enumerate() {
        println!(
            "buffer {index}: stride {} bytes, step {:?}",
            layout.array_stride, layout.step_mode
        );
        for attr in &layout.attributes {
            println!(
                "  @location({}) {:?} at offset {}",
                attr.shader_location, attr.format, attr.offset
            );
        }
    }
}
