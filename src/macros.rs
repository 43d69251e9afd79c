//! The `wgsl_struct!` declaration macro.

/// Declares a `#[repr(C)]` plain-old-data struct together with the layout
/// facts registration validates.
///
/// One declaration produces the Rust struct (with `Clone`, `Copy`,
/// `Debug`, `bytemuck::Pod`, and `bytemuck::Zeroable` derives), a
/// `Default` impl, and the [`WgslStruct`](crate::WgslStruct) impl whose
/// field offsets come from `core::mem::offset_of!`. The struct can then be
/// used as a field element in later declarations.
///
/// Per field:
/// - `= expr` sets the `Default` value (otherwise `Default::default()`;
///   array fields longer than 32 elements need an explicit `= [elem; N]`).
/// - `#[atomic]` emits the field as `atomic<T>`.
/// - `#[runtime_array]` emits an array field as the unsized `array<T>`;
///   the declared Rust length is the host-side capacity.
///
/// ```rust
/// use wgsl_types::{wgsl_struct, TypeRegistry};
///
/// wgsl_struct! {
///     pub struct Counters {
///         pub frame: u32 = 1,
///         #[atomic] pub hits: u32,
///     }
/// }
///
/// let mut registry = TypeRegistry::new();
/// let def = registry.register::<Counters>().unwrap();
/// assert_eq!(def.size, 8);
/// assert_eq!(def.to_wgsl(), "struct Counters {\n  frame : u32,\n  hits : atomic<u32>,\n}\n");
/// ```
#[macro_export]
macro_rules! wgsl_struct {
    // ------------------------------------------------------------------
    // Entry
    // ------------------------------------------------------------------
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$tag:ident])*
                $fvis:vis $fname:ident : $fty:ty $(= $default:expr)?
            ),* $(,)?
        }
    ) => {
        $crate::wgsl_struct!(@def_struct
            $(#[$meta])* $vis struct $name {
                $( $fvis $fname : $fty ),* }
        );

        $crate::wgsl_struct!(@impl_default
            $name {
                $( $fname : $fty $(= $default)? ),* }
        );

        $crate::wgsl_struct!(@impl_field_type $name);

        $crate::wgsl_struct!(@impl_wgsl_struct
            $name {
                $( [$($tag)*] $fname : $fty ),* }
        );

        $( $( $crate::wgsl_struct!(@check_tag $tag); )* )*
    };

    (@def_struct $(#[$meta:meta])* $vis:vis struct $name:ident { $( $fvis:vis $fname:ident : $fty:ty ),* }) => {
        #[repr(C)]
        #[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
        $(#[$meta])*
        $vis struct $name {
            $( $fvis $fname : $fty, )*
        }
    };

    (@impl_default $name:ident { $( $fname:ident : $fty:ty $(= $default:expr)? ),* }) => {
        impl Default for $name {
            fn default() -> Self {
                Self {
                    $( $fname: $crate::wgsl_struct!(@val_or_default $fty $(, $default)?), )*
                }
            }
        }
    };
    (@val_or_default $fty:ty, $val:expr) => { $val };
    (@val_or_default $fty:ty) => { <$fty as Default>::default() };

    // ------------------------------------------------------------------
    // Field-element impls, so the struct nests in later declarations
    // ------------------------------------------------------------------
    (@impl_field_type $name:ident) => {
        impl $crate::WgslElem for $name {}
        impl $crate::WgslFieldType for $name {
            fn shape() -> $crate::FieldShape {
                $crate::FieldShape::elem::<$name>()
            }
        }
    };

    // ------------------------------------------------------------------
    // Layout facts: offsets from the compiler, tags from the declaration
    // ------------------------------------------------------------------
    (@impl_wgsl_struct $name:ident { $( [$($tag:ident)*] $fname:ident : $fty:ty ),* }) => {
        impl $crate::WgslStruct for $name {
            const NAME: &'static str = stringify!($name);

            fn layout() -> $crate::StructLayout {
                $crate::StructLayout {
                    wgsl_name: Self::NAME,
                    rust_name: ::core::any::type_name::<Self>(),
                    size: ::core::mem::size_of::<Self>(),
                    fields: ::std::vec![
                        $(
                            $crate::FieldLayout {
                                name: stringify!($fname),
                                offset: ::core::mem::offset_of!($name, $fname),
                                shape: <$fty as $crate::WgslFieldType>::shape(),
                                atomic: $crate::wgsl_struct!(@has_atomic [$($tag)*]),
                                runtime_array: $crate::wgsl_struct!(@has_runtime_array [$($tag)*]),
                            },
                        )*
                    ],
                }
            }
        }
    };

    (@has_atomic []) => { false };
    (@has_atomic [atomic $($rest:ident)*]) => { true };
    (@has_atomic [$other:ident $($rest:ident)*]) => {
        $crate::wgsl_struct!(@has_atomic [$($rest)*])
    };

    (@has_runtime_array []) => { false };
    (@has_runtime_array [runtime_array $($rest:ident)*]) => { true };
    (@has_runtime_array [$other:ident $($rest:ident)*]) => {
        $crate::wgsl_struct!(@has_runtime_array [$($rest)*])
    };

    (@check_tag atomic) => {};
    (@check_tag runtime_array) => {};
    (@check_tag $other:ident) => {
        compile_error!(concat!("unknown wgsl_struct field tag `", stringify!($other), "`"));
    };
}
