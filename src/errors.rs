//! Error Types
//!
//! This module defines the error types reported by layout validation and
//! descriptor lookups.
//!
//! # Overview
//!
//! The main error type [`LayoutError`] covers all failure modes:
//! - a field type with no WGSL mapping
//! - a host offset that violates a WGSL alignment rule
//! - malformed declarations (duplicate fields, misplaced runtime arrays,
//!   atomics combined with arrays)
//! - lookups for fields or vertex formats that do not exist
//!
//! All of these are structural errors: they are detected synchronously
//! during registration (or lookup), returned to the immediate caller, and
//! never retried.
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, LayoutError>`.
//!
//! ```rust,ignore
//! use wgsl_types::{Result, TypeRegistry};
//!
//! fn startup(registry: &mut TypeRegistry) -> Result<()> {
//!     registry.register::<MyUniforms>()?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// The error type for layout validation and descriptor lookups.
///
/// Every variant names the offending struct and field, with enough context
/// to fix the declaration without reading the validation internals.
#[derive(Error, Debug)]
pub enum LayoutError {
    // ========================================================================
    // Field resolution errors
    // ========================================================================
    /// A field's type (after array reduction) has no primitive mapping and
    /// no registered struct descriptor.
    #[error("unhandled type `{type_name}` for field `{field}` of `{struct_name}` (register nested structs before their containers)")]
    UnsupportedFieldType {
        /// Shader-visible name of the struct being registered
        struct_name: &'static str,
        /// The field whose type failed to resolve
        field: &'static str,
        /// Fully-qualified host name of the unresolved element type
        type_name: &'static str,
    },

    /// A field's host-assigned offset is not a multiple of the alignment
    /// WGSL requires for its resolved type.
    #[error("incompatible offset for field `{field}` of `{struct_name}`: host offset is {offset} but WGSL requires {align}-byte alignment for `{type_name}`")]
    AlignmentViolation {
        /// Shader-visible name of the struct being registered
        struct_name: &'static str,
        /// The misaligned field
        field: &'static str,
        /// Offset assigned by the Rust compiler
        offset: usize,
        /// Alignment WGSL requires for the field's type
        align: usize,
        /// WGSL spelling of the resolved field type
        type_name: String,
    },

    // ========================================================================
    // Declaration errors
    // ========================================================================
    /// `#[atomic]` combined with an array type.
    #[error("field `{field}` of `{struct_name}` combines `atomic` with an array type")]
    AtomicArray {
        /// Shader-visible name of the struct being registered
        struct_name: &'static str,
        /// The offending field
        field: &'static str,
    },

    /// A `#[runtime_array]` field declared before the end of the struct.
    #[error("runtime array field `{field}` of `{struct_name}` must be the last declared field")]
    RuntimeArrayNotLast {
        /// Shader-visible name of the struct being registered
        struct_name: &'static str,
        /// The misplaced field
        field: &'static str,
    },

    /// The same field name declared twice in one layout.
    #[error("duplicate field `{field}` in struct `{struct_name}`")]
    DuplicateField {
        /// Shader-visible name of the struct being registered
        struct_name: &'static str,
        /// The repeated name
        field: &'static str,
    },

    // ========================================================================
    // Lookup errors
    // ========================================================================
    /// Offset or format lookup for a field name absent from a descriptor.
    #[error("unknown field `{field}` in struct `{struct_name}`")]
    UnknownField {
        /// Shader-visible name of the descriptor queried
        struct_name: String,
        /// The requested field name
        field: String,
    },

    /// A descriptor with no `wgpu::VertexFormat` equivalent was requested
    /// as a vertex attribute.
    #[error("no vertex format for WGSL type `{type_name}`")]
    NoVertexFormat {
        /// WGSL spelling of the unsupported type
        type_name: String,
    },
}

/// Alias for `Result<T, LayoutError>`.
pub type Result<T> = std::result::Result<T, LayoutError>;
