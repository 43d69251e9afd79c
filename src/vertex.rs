//! Vertex-buffer interop: turns accepted descriptors into wgpu vertex
//! state, with strides from descriptor sizes and attribute offsets from
//! the validated field offsets.

use wgpu::{VertexAttribute, VertexFormat, VertexStepMode};

use crate::errors::{LayoutError, Result};
use crate::structs::StructDef;
use crate::types::WgslType;

/// The `wgpu::VertexFormat` carrying a field of this WGSL type.
///
/// Only scalars and `f32` vectors have vertex-format equivalents; arrays,
/// atomics, matrices, and nested structs are an error.
pub fn vertex_format(ty: &WgslType) -> Result<VertexFormat> {
    match ty.name.as_ref() {
        "f32" => Ok(VertexFormat::Float32),
        "i32" => Ok(VertexFormat::Sint32),
        "u32" => Ok(VertexFormat::Uint32),
        "vec2<f32>" => Ok(VertexFormat::Float32x2),
        "vec3<f32>" => Ok(VertexFormat::Float32x3),
        "vec4<f32>" => Ok(VertexFormat::Float32x4),
        other => Err(LayoutError::NoVertexFormat {
            type_name: other.to_string(),
        }),
    }
}

/// One vertex buffer: the registered struct stored in it and how it steps.
#[derive(Debug, Clone, Copy)]
pub struct VertexBufferDef<'a> {
    /// Descriptor of the struct the buffer holds; its size is the stride.
    pub def: &'a StructDef,
    /// Advance per vertex or per instance.
    pub step_mode: VertexStepMode,
}

impl<'a> VertexBufferDef<'a> {
    /// A buffer stepped once per vertex.
    #[must_use]
    pub fn per_vertex(def: &'a StructDef) -> Self {
        Self {
            def,
            step_mode: VertexStepMode::Vertex,
        }
    }

    /// A buffer stepped once per instance.
    #[must_use]
    pub fn per_instance(def: &'a StructDef) -> Self {
        Self {
            def,
            step_mode: VertexStepMode::Instance,
        }
    }
}

/// A shader vertex input: which buffer it reads and which field feeds it.
///
/// `@location` indices are assigned sequentially in the order the
/// attributes are listed.
#[derive(Debug, Clone, Copy)]
pub struct VertexAttributeRef<'a> {
    /// Index into the buffer list passed to [`build_vertex_layouts`].
    pub buffer: usize,
    /// Field of that buffer's struct.
    pub field: &'a str,
}

/// A vertex buffer layout that owns its attribute list.
#[derive(Debug, Clone)]
pub struct OwnedVertexBufferLayout {
    pub array_stride: u64,
    pub step_mode: VertexStepMode,
    pub attributes: Vec<VertexAttribute>,
}

impl OwnedVertexBufferLayout {
    /// Borrows the layout in the form pipeline descriptors take.
    #[must_use]
    pub fn as_wgpu(&self) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: self.array_stride,
            step_mode: self.step_mode,
            attributes: &self.attributes,
        }
    }
}

/// Builds one layout per buffer from registered descriptors.
///
/// Stride is the registered struct's size, offsets are the validated field
/// offsets, formats come from [`vertex_format`], and shader locations
/// count up in `attributes` order across all buffers.
///
/// # Panics
///
/// Panics if an attribute names a buffer index outside `buffers`.
pub fn build_vertex_layouts(
    buffers: &[VertexBufferDef<'_>],
    attributes: &[VertexAttributeRef<'_>],
) -> Result<Vec<OwnedVertexBufferLayout>> {
    let mut layouts: Vec<OwnedVertexBufferLayout> = buffers
        .iter()
        .map(|buffer| OwnedVertexBufferLayout {
            array_stride: buffer.def.size as u64,
            step_mode: buffer.step_mode,
            attributes: Vec::new(),
        })
        .collect();

    for (location, attr) in attributes.iter().enumerate() {
        let def = buffers[attr.buffer].def;
        let field = def.field(attr.field).ok_or_else(|| LayoutError::UnknownField {
            struct_name: def.name.to_string(),
            field: attr.field.to_string(),
        })?;
        layouts[attr.buffer].attributes.push(VertexAttribute {
            format: vertex_format(&field.ty)?,
            offset: field.offset as u64,
            shader_location: location as u32,
        });
    }

    Ok(layouts)
}
