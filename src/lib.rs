//! Byte-exact Rust to WGSL struct layouts.
//!
//! Declare a `#[repr(C)]` struct with [`wgsl_struct!`], register it in a
//! [`TypeRegistry`], and get back a [`StructDef`]: the WGSL declaration
//! text, validated field offsets, and the metadata vertex/bind-group
//! layouts are built from. Registration checks every field offset the
//! Rust compiler assigned against the WGSL alignment rules, so a layout
//! mismatch fails at startup instead of corrupting GPU memory at a
//! distance.
//!
//! ```rust
//! use glam::Vec2;
//! use wgsl_types::{wgsl_struct, TypeRegistry};
//!
//! wgsl_struct! {
//!     pub struct Particle {
//!         pub pos: Vec2,
//!         pub vel: Vec2,
//!     }
//! }
//!
//! let mut registry = TypeRegistry::new();
//! let particle = registry.register::<Particle>().unwrap();
//! assert_eq!(particle.size, 16);
//! assert_eq!(particle.offset_of("vel").unwrap(), 8);
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod errors;
pub mod registry;
pub mod shader;
pub mod structs;
pub mod types;
pub mod vertex;

mod macros;

pub use errors::{LayoutError, Result};
pub use registry::TypeRegistry;
pub use shader::compose_shader;
pub use structs::{Field, FieldLayout, StructDef, StructLayout, WgslStruct};
pub use types::{primitive, FieldShape, WgslElem, WgslFieldType, WgslType};
pub use vertex::{
    build_vertex_layouts, vertex_format, OwnedVertexBufferLayout, VertexAttributeRef,
    VertexBufferDef,
};
