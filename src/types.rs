//! WGSL type descriptors, the primitive lookup table, and the traits that
//! describe what a Rust type looks like when used as a struct field.

use std::any::TypeId;
use std::borrow::Cow;
use std::sync::OnceLock;

use glam::{Mat3A, Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

// ============================================================================
// Type descriptors
// ============================================================================

/// A resolved WGSL type: its source spelling and its memory layout.
///
/// Covers primitives (`f32`, `i32`, `u32`), vectors and matrices, and the
/// derived `atomic` / `array` wrappers built by the methods below.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WgslType {
    /// WGSL source spelling, e.g. `vec3<f32>` or `array<u32, 4>`.
    pub name: Cow<'static, str>,
    /// Byte boundary a value must start on, per the WGSL layout rules.
    pub align_of: usize,
    /// Byte footprint, including type-intrinsic padding.
    pub size_of: usize,
}

impl WgslType {
    pub(crate) const fn new(name: &'static str, align_of: usize, size_of: usize) -> Self {
        Self {
            name: Cow::Borrowed(name),
            align_of,
            size_of,
        }
    }

    /// Wraps the type as `atomic<T>`. Alignment and size are unchanged.
    #[must_use]
    pub fn atomic(self) -> Self {
        Self {
            name: format!("atomic<{}>", self.name).into(),
            ..self
        }
    }

    /// Wraps the type as `array<T, N>`: size scales with the length, the
    /// element alignment carries over.
    #[must_use]
    pub fn array(self, len: usize) -> Self {
        Self {
            name: format!("array<{}, {}>", self.name, len).into(),
            align_of: self.align_of,
            size_of: self.size_of * len,
        }
    }

    /// Wraps the type as the unsized `array<T>`. The declared WGSL type
    /// carries no length, but the host side still reserves `capacity`
    /// elements, so the size arithmetic matches [`WgslType::array`].
    #[must_use]
    pub fn runtime_array(self, capacity: usize) -> Self {
        Self {
            name: format!("array<{}>", self.name).into(),
            align_of: self.align_of,
            size_of: self.size_of * capacity,
        }
    }
}

// ============================================================================
// Primitive table (host type -> WGSL descriptor)
// ============================================================================

/// Looks up the WGSL descriptor for a host scalar, vector, or matrix type.
///
/// Misses are not an error at this level; registration reports them with
/// struct and field context.
#[must_use]
pub fn primitive(id: TypeId) -> Option<WgslType> {
    static TABLE: OnceLock<FxHashMap<TypeId, WgslType>> = OnceLock::new();
    TABLE
        .get_or_init(|| {
            let mut table = FxHashMap::default();
            table.insert(TypeId::of::<f32>(), WgslType::new("f32", 4, 4));
            table.insert(TypeId::of::<i32>(), WgslType::new("i32", 4, 4));
            table.insert(TypeId::of::<u32>(), WgslType::new("u32", 4, 4));
            table.insert(TypeId::of::<Vec2>(), WgslType::new("vec2<f32>", 8, 8));
            table.insert(TypeId::of::<Vec3>(), WgslType::new("vec3<f32>", 16, 12));
            table.insert(TypeId::of::<Vec4>(), WgslType::new("vec4<f32>", 16, 16));
            table.insert(TypeId::of::<Mat4>(), WgslType::new("mat4x4<f32>", 16, 64));
            table.insert(TypeId::of::<Mat3A>(), WgslType::new("mat3x3<f32>", 16, 48));
            table
        })
        .get(&id)
        .cloned()
}

// ============================================================================
// Field shape traits
// ============================================================================

/// Marker for types usable as a field *element*: scalars, vectors,
/// matrices, and [`wgsl_struct!`](crate::wgsl_struct)-declared structs.
///
/// Arrays are built on top of elements by the `[T; N]` impl of
/// [`WgslFieldType`], so arrays of arrays never typecheck.
pub trait WgslElem: 'static {}

/// The declared shape of one struct field: the element identity after
/// array reduction, plus the array length if the field is an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldShape {
    /// Identity of the element type, for the primitive table.
    pub elem_id: TypeId,
    /// Fully-qualified host name of the element, for registry lookup of
    /// nested structs and for error reporting.
    pub elem_name: &'static str,
    /// Declared length for array fields.
    pub array_len: Option<usize>,
}

impl FieldShape {
    /// The shape of a bare (non-array) element field.
    #[must_use]
    pub fn elem<T: WgslElem>() -> Self {
        Self {
            elem_id: TypeId::of::<T>(),
            elem_name: std::any::type_name::<T>(),
            array_len: None,
        }
    }
}

/// Types that can appear as a field in a
/// [`wgsl_struct!`](crate::wgsl_struct) declaration.
pub trait WgslFieldType: 'static {
    /// The field's declared shape.
    fn shape() -> FieldShape;
}

macro_rules! impl_elem {
    ($($ty:ty),* $(,)?) => {$(
        impl WgslElem for $ty {}
        impl WgslFieldType for $ty {
            fn shape() -> FieldShape {
                FieldShape::elem::<$ty>()
            }
        }
    )*};
}

impl_elem!(f32, i32, u32, Vec2, Vec3, Vec4, Mat4, Mat3A);

impl<T: WgslElem, const N: usize> WgslFieldType for [T; N] {
    fn shape() -> FieldShape {
        FieldShape {
            array_len: Some(N),
            ..FieldShape::elem::<T>()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atomic_preserves_layout() {
        let ty = primitive(TypeId::of::<i32>()).unwrap().atomic();
        assert_eq!(ty.name, "atomic<i32>");
        assert_eq!(ty.align_of, 4);
        assert_eq!(ty.size_of, 4);
    }

    #[test]
    fn fixed_array_scales_size_only() {
        let ty = primitive(TypeId::of::<Vec2>()).unwrap().array(3);
        assert_eq!(ty.name, "array<vec2<f32>, 3>");
        assert_eq!(ty.align_of, 8);
        assert_eq!(ty.size_of, 24);
    }

    #[test]
    fn runtime_array_drops_length_from_name() {
        let ty = primitive(TypeId::of::<u32>()).unwrap().runtime_array(16);
        assert_eq!(ty.name, "array<u32>");
        assert_eq!(ty.size_of, 64);
    }

    #[test]
    fn primitive_table_matches_wgsl_layouts() {
        let cases: [(TypeId, &str, usize, usize); 8] = [
            (TypeId::of::<f32>(), "f32", 4, 4),
            (TypeId::of::<i32>(), "i32", 4, 4),
            (TypeId::of::<u32>(), "u32", 4, 4),
            (TypeId::of::<Vec2>(), "vec2<f32>", 8, 8),
            (TypeId::of::<Vec3>(), "vec3<f32>", 16, 12),
            (TypeId::of::<Vec4>(), "vec4<f32>", 16, 16),
            (TypeId::of::<Mat4>(), "mat4x4<f32>", 16, 64),
            (TypeId::of::<Mat3A>(), "mat3x3<f32>", 16, 48),
        ];
        for (id, name, align, size) in cases {
            let ty = primitive(id).unwrap();
            assert_eq!(ty.name, name);
            assert_eq!(ty.align_of, align, "alignment of {name}");
            assert_eq!(ty.size_of, size, "size of {name}");
        }
    }

    #[test]
    fn unmapped_types_miss_the_table() {
        assert!(primitive(TypeId::of::<f64>()).is_none());
        assert!(primitive(TypeId::of::<bool>()).is_none());
    }

    #[test]
    fn array_shape_reduces_to_element() {
        let shape = <[i32; 2] as WgslFieldType>::shape();
        assert_eq!(shape.elem_id, TypeId::of::<i32>());
        assert_eq!(shape.array_len, Some(2));
    }
}
