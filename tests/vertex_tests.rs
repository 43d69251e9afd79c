//! Vertex Interop & Shader Composition Tests
//!
//! Tests for:
//! - `vertex_format`: per-type mapping and unsupported types
//! - `build_vertex_layouts`: strides, offsets, step modes, sequential
//!   shader locations across buffers
//! - Unknown attribute fields reported with struct context
//! - `as_wgpu` borrowing into pipeline-descriptor form
//! - `compose_shader`: prologue order and duplicate elimination

use glam::{Vec2, Vec3, Vec4};
use wgpu::{VertexFormat, VertexStepMode};
use wgsl_types::{
    build_vertex_layouts, compose_shader, vertex_format, wgsl_struct, LayoutError, TypeRegistry,
    VertexAttributeRef, VertexBufferDef,
};

// ============================================================================
// Fixtures
// ============================================================================

wgsl_struct! {
    struct Particle {
        pos: Vec2,
        vel: Vec2,
    }
}

wgsl_struct! {
    struct Corner {
        pos: Vec2,
    }
}

wgsl_struct! {
    struct Sprite {
        tint: Vec4,
        scale: f32,
        layer: i32,
        mask: u32,
        pad: f32,
        dir: Vec3,
    }
}

wgsl_struct! {
    struct Clip {
        frames: [f32; 4],
    }
}

// ============================================================================
// Format mapping
// ============================================================================

#[test]
fn vertex_formats_map_per_type() {
    let mut registry = TypeRegistry::new();
    let sprite = registry.register::<Sprite>().unwrap();
    let corner = registry.register::<Corner>().unwrap();

    let cases = [
        ("tint", VertexFormat::Float32x4),
        ("scale", VertexFormat::Float32),
        ("layer", VertexFormat::Sint32),
        ("mask", VertexFormat::Uint32),
        ("dir", VertexFormat::Float32x3),
    ];
    for (name, format) in cases {
        let field = sprite.field(name).unwrap();
        assert_eq!(vertex_format(&field.ty).unwrap(), format, "format of {name}");
    }
    let pos = corner.field("pos").unwrap();
    assert_eq!(vertex_format(&pos.ty).unwrap(), VertexFormat::Float32x2);
}

#[test]
fn arrays_have_no_vertex_format() {
    let mut registry = TypeRegistry::new();
    let clip = registry.register::<Clip>().unwrap();
    let err = vertex_format(&clip.field("frames").unwrap().ty).unwrap_err();
    match err {
        LayoutError::NoVertexFormat { type_name } => {
            assert_eq!(type_name, "array<f32, 4>");
        }
        other => panic!("expected missing vertex format, got: {other}"),
    }
}

// ============================================================================
// Buffer layouts
// ============================================================================

#[test]
fn layouts_take_strides_offsets_and_locations_from_descriptors() {
    let mut registry = TypeRegistry::new();
    let particle = registry.register::<Particle>().unwrap();
    let corner = registry.register::<Corner>().unwrap();

    let layouts = build_vertex_layouts(
        &[
            VertexBufferDef::per_instance(&particle),
            VertexBufferDef::per_vertex(&corner),
        ],
        &[
            VertexAttributeRef { buffer: 0, field: "pos" },
            VertexAttributeRef { buffer: 0, field: "vel" },
            VertexAttributeRef { buffer: 1, field: "pos" },
        ],
    )
    .unwrap();

    assert_eq!(layouts.len(), 2);

    let instance = &layouts[0];
    assert_eq!(instance.array_stride, 16);
    assert_eq!(instance.step_mode, VertexStepMode::Instance);
    assert_eq!(instance.attributes.len(), 2);
    assert_eq!(instance.attributes[0].format, VertexFormat::Float32x2);
    assert_eq!(instance.attributes[0].offset, 0);
    assert_eq!(instance.attributes[0].shader_location, 0);
    assert_eq!(instance.attributes[1].offset, 8);
    assert_eq!(instance.attributes[1].shader_location, 1);

    let vertex = &layouts[1];
    assert_eq!(vertex.array_stride, 8);
    assert_eq!(vertex.step_mode, VertexStepMode::Vertex);
    assert_eq!(vertex.attributes.len(), 1);
    assert_eq!(vertex.attributes[0].offset, 0);
    assert_eq!(vertex.attributes[0].shader_location, 2);
}

#[test]
fn unknown_attribute_field_names_the_buffer_struct() {
    let mut registry = TypeRegistry::new();
    let particle = registry.register::<Particle>().unwrap();

    let err = build_vertex_layouts(
        &[VertexBufferDef::per_vertex(&particle)],
        &[VertexAttributeRef { buffer: 0, field: "missing" }],
    )
    .unwrap_err();
    match err {
        LayoutError::UnknownField { struct_name, field } => {
            assert_eq!(struct_name, "Particle");
            assert_eq!(field, "missing");
        }
        other => panic!("expected unknown field, got: {other}"),
    }
}

#[test]
fn as_wgpu_borrows_the_owned_layout() {
    let mut registry = TypeRegistry::new();
    let particle = registry.register::<Particle>().unwrap();

    let layouts = build_vertex_layouts(
        &[VertexBufferDef::per_vertex(&particle)],
        &[
            VertexAttributeRef { buffer: 0, field: "pos" },
            VertexAttributeRef { buffer: 0, field: "vel" },
        ],
    )
    .unwrap();

    let wgpu_layout = layouts[0].as_wgpu();
    assert_eq!(wgpu_layout.array_stride, 16);
    assert_eq!(wgpu_layout.step_mode, VertexStepMode::Vertex);
    assert_eq!(wgpu_layout.attributes.len(), 2);
}

// ============================================================================
// Shader composition
// ============================================================================

#[test]
fn compose_shader_prepends_declarations_once() {
    let mut registry = TypeRegistry::new();
    let particle = registry.register::<Particle>().unwrap();
    let corner = registry.register::<Corner>().unwrap();
    let body = "@vertex fn vs_main() {}\n";

    let module = compose_shader(
        &[particle.clone(), corner.clone(), particle.clone()],
        body,
    );
    assert_eq!(
        module,
        format!("{}\n{}\n{}", particle.to_wgsl(), corner.to_wgsl(), body)
    );
    assert_eq!(module.match_indices("struct Particle").count(), 1);
    assert!(module.ends_with(body));
}
