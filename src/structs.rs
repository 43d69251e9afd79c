//! Struct declarations, accepted descriptors, and WGSL emission.
//!
//! Two layers live here. [`StructLayout`] / [`FieldLayout`] are the input
//! side: the shape a host type declares, with offsets taken from the Rust
//! compiler. [`StructDef`] / [`Field`] are the output side: the descriptor
//! the registry hands back once every field passed alignment validation.

use std::borrow::Cow;
use std::fmt;

use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;

use crate::errors::{LayoutError, Result};
use crate::types::{FieldShape, WgslType};

// ============================================================================
// Declared layout (input side)
// ============================================================================

/// One declared field: its name, the offset the Rust compiler assigned,
/// and its element shape plus layout tags.
#[derive(Debug, Clone)]
pub struct FieldLayout {
    /// Field name as declared.
    pub name: &'static str,
    /// Host byte offset, from `core::mem::offset_of!`. Never computed by
    /// this crate; only validated.
    pub offset: usize,
    /// Element identity and array length.
    pub shape: FieldShape,
    /// Emit the field as `atomic<T>`.
    pub atomic: bool,
    /// Emit an array field as the unsized `array<T>`.
    pub runtime_array: bool,
}

/// A composite type's declared shape, as fed to
/// [`TypeRegistry::register_layout`](crate::TypeRegistry::register_layout).
///
/// [`wgsl_struct!`](crate::wgsl_struct) builds this from the compiler's own
/// layout facts; it can also be built by hand for shapes assembled at run
/// time.
#[derive(Debug, Clone)]
pub struct StructLayout {
    /// Shader-visible struct name.
    pub wgsl_name: &'static str,
    /// Fully-qualified host type name; the registry key.
    pub rust_name: &'static str,
    /// `size_of` the host type, trailing padding included.
    pub size: usize,
    /// Fields in declaration order.
    pub fields: Vec<FieldLayout>,
}

// ============================================================================
// Accepted descriptors (output side)
// ============================================================================

/// A field that passed alignment validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Field name as declared.
    pub name: &'static str,
    /// Validated host byte offset.
    pub offset: usize,
    /// Resolved WGSL type, wrappers applied.
    pub ty: WgslType,
}

/// An accepted struct descriptor: the WGSL-side mirror of one registered
/// host type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    /// Shader-visible struct name.
    pub name: Cow<'static, str>,
    /// Fully-qualified host type name the descriptor was registered under.
    pub rust_name: &'static str,
    /// Host `size_of`, compiler-inserted padding included. Callers must
    /// not recompute this from field sizes.
    pub size: usize,
    /// Maximum alignment over the resolved field types; the alignment the
    /// struct requires when it embeds in another.
    pub align: usize,
    /// Field names in declaration order.
    pub field_order: Vec<&'static str>,
    /// Field descriptors by name. Holds exactly the names in
    /// [`StructDef::field_order`].
    pub fields: FxHashMap<&'static str, Field>,
}

impl StructDef {
    /// Renders the WGSL struct declaration.
    ///
    /// The output is byte-exact: one field per line in declaration order,
    /// two-space indent, ` : ` separator, trailing comma, and a final
    /// newline. Declarations from several descriptors concatenate directly
    /// into a shader prologue, so the formatting is part of the contract.
    #[must_use]
    pub fn to_wgsl(&self) -> String {
        let mut out = format!("struct {} {{\n", self.name);
        for name in &self.field_order {
            let field = &self.fields[name];
            out.push_str(&format!("  {} : {},\n", field.name, field.ty.name));
        }
        out.push_str("}\n");
        out
    }

    /// Byte offset of `field` inside the host struct.
    pub fn offset_of(&self, field: &str) -> Result<usize> {
        self.fields
            .get(field)
            .map(|f| f.offset)
            .ok_or_else(|| LayoutError::UnknownField {
                struct_name: self.name.to_string(),
                field: field.to_string(),
            })
    }

    /// Field descriptor by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}

impl fmt::Display for StructDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "struct {} ({}), {} bytes", self.name, self.rust_name, self.size)?;
        for (i, name) in self.field_order.iter().enumerate() {
            let field = &self.fields[name];
            writeln!(f, "  {i}: {} `{}` at offset {}", field.name, field.ty.name, field.offset)?;
        }
        Ok(())
    }
}

// ============================================================================
// Declared-struct trait
// ============================================================================

/// Implemented by [`wgsl_struct!`](crate::wgsl_struct) for every declared
/// struct.
///
/// The `Pod` bound means any value (or slice) of the type reinterprets as
/// raw bytes for buffer uploads, with
/// [`StructDef::size`] always equal to `size_of::<Self>()`.
pub trait WgslStruct: Pod + Zeroable {
    /// Shader-visible struct name.
    const NAME: &'static str;

    /// The declared shape, offsets taken from the Rust compiler's layout.
    fn layout() -> StructLayout;

    /// The value as the exact bytes a GPU buffer receives.
    fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
