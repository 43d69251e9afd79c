//! The struct registry and the layout validation behind registration.
//!
//! Registration is a startup activity: each GPU-visible struct is
//! registered once, nested structs before the structs that embed them.
//! Writes take `&mut self`, so the single-writer registration phase is
//! enforced by the borrow checker; once registration is done the registry
//! is shared by `&` for lookups.

use rustc_hash::FxHashMap;

use crate::errors::{LayoutError, Result};
use crate::structs::{Field, FieldLayout, StructDef, StructLayout, WgslStruct};
use crate::types::{self, WgslType};

/// Registry of accepted struct descriptors, keyed by fully-qualified host
/// type name.
///
/// One composite type may embed another only if the inner type was
/// registered first; the registry is what resolves those references.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    structs: FxHashMap<&'static str, StructDef>,
}

impl TypeRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `T`'s declared layout, validating every field offset
    /// against the WGSL alignment rules.
    ///
    /// On success the caller receives its own copy of the descriptor and
    /// the registry keeps another; registering the same type again
    /// overwrites the stored entry.
    pub fn register<T: WgslStruct>(&mut self) -> Result<StructDef> {
        self.register_layout(&T::layout())
    }

    /// Panicking variant of [`TypeRegistry::register`], for the fixed type
    /// sets a program declares at startup. Never use it for type shapes
    /// influenced by external input.
    ///
    /// # Panics
    ///
    /// Panics if the layout is rejected.
    pub fn must_register<T: WgslStruct>(&mut self) -> StructDef {
        match self.register::<T>() {
            Ok(def) => def,
            Err(err) => panic!("registering {}: {err}", std::any::type_name::<T>()),
        }
    }

    /// Value-level entry point: registers an explicitly built declaration.
    ///
    /// [`TypeRegistry::register`] routes through here with the layout the
    /// [`wgsl_struct!`](crate::wgsl_struct) macro emitted.
    pub fn register_layout(&mut self, layout: &StructLayout) -> Result<StructDef> {
        let mut def = StructDef {
            name: layout.wgsl_name.into(),
            rust_name: layout.rust_name,
            size: layout.size,
            align: 1,
            field_order: Vec::with_capacity(layout.fields.len()),
            fields: FxHashMap::default(),
        };

        for (index, field) in layout.fields.iter().enumerate() {
            let last = index + 1 == layout.fields.len();
            let ty = self.resolve_field(layout, field, last)?;

            if field.offset % ty.align_of != 0 {
                return Err(LayoutError::AlignmentViolation {
                    struct_name: layout.wgsl_name,
                    field: field.name,
                    offset: field.offset,
                    align: ty.align_of,
                    type_name: ty.name.into_owned(),
                });
            }

            def.align = def.align.max(ty.align_of);
            let accepted = Field {
                name: field.name,
                offset: field.offset,
                ty,
            };
            if def.fields.insert(field.name, accepted).is_some() {
                return Err(LayoutError::DuplicateField {
                    struct_name: layout.wgsl_name,
                    field: field.name,
                });
            }
            def.field_order.push(field.name);
        }

        if let Some(prev) = self.structs.insert(def.rust_name, def.clone()) {
            log::debug!(
                "re-registered `{}` as `{}` ({} -> {} bytes)",
                def.rust_name,
                def.name,
                prev.size,
                def.size
            );
        } else {
            log::debug!(
                "registered `{}` as `{}`: {} fields, {} bytes",
                def.rust_name,
                def.name,
                def.field_order.len(),
                def.size
            );
        }
        Ok(def)
    }

    /// Descriptor for a registered type, by fully-qualified host name.
    #[must_use]
    pub fn get(&self, rust_name: &str) -> Option<&StructDef> {
        self.structs.get(rust_name)
    }

    /// Descriptor for `T`, if registered.
    #[must_use]
    pub fn get_of<T: WgslStruct>(&self) -> Option<&StructDef> {
        self.structs.get(std::any::type_name::<T>())
    }

    /// Number of registered structs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    /// Whether nothing has been registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Resolves one declared field to its WGSL type, wrappers applied.
    fn resolve_field(
        &self,
        layout: &StructLayout,
        field: &FieldLayout,
        last: bool,
    ) -> Result<WgslType> {
        let elem = match types::primitive(field.shape.elem_id) {
            Some(ty) => ty,
            None => match self.structs.get(field.shape.elem_name) {
                Some(nested) => WgslType {
                    name: nested.name.clone(),
                    align_of: nested.align,
                    size_of: nested.size,
                },
                None => {
                    return Err(LayoutError::UnsupportedFieldType {
                        struct_name: layout.wgsl_name,
                        field: field.name,
                        type_name: field.shape.elem_name,
                    });
                }
            },
        };

        let mut ty = elem;
        if field.atomic {
            if field.shape.array_len.is_some() {
                return Err(LayoutError::AtomicArray {
                    struct_name: layout.wgsl_name,
                    field: field.name,
                });
            }
            // TODO: reject atomic on elements other than i32/u32; WGSL only
            // defines atomic<i32> and atomic<u32>.
            ty = ty.atomic();
        }
        if let Some(len) = field.shape.array_len {
            ty = if field.runtime_array {
                if !last {
                    return Err(LayoutError::RuntimeArrayNotLast {
                        struct_name: layout.wgsl_name,
                        field: field.name,
                    });
                }
                ty.runtime_array(len)
            } else {
                ty.array(len)
            };
        }
        Ok(ty)
    }
}
