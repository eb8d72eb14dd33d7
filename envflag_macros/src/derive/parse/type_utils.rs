//! Type introspection helpers.
//!
//! These utilities perform shallow, purely syntactic inspection of
//! `syn::Type` values to classify a field as a scalar, a `Vec` of scalars,
//! an `Option` of a scalar, or unsupported. Type aliases are not seen
//! through: `type Port = u16;` classifies as unsupported.

use syn::{GenericArgument, PathArguments, Type};

/// Type names recognised as scalars, paired with their `ScalarKind` variant.
const SCALARS: [(&str, &str); 14] = [
    ("String", "String"),
    ("bool", "Bool"),
    ("f32", "F32"),
    ("f64", "F64"),
    ("i8", "I8"),
    ("i16", "I16"),
    ("i32", "I32"),
    ("i64", "I64"),
    ("u8", "U8"),
    ("u16", "U16"),
    ("u32", "U32"),
    ("u64", "U64"),
    ("Duration", "Duration"),
    ("Url", "Url"),
];

/// Classified shape of a field, naming the `ScalarKind` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldShape {
    Scalar(&'static str),
    List(&'static str),
    Optional(&'static str),
    Unsupported,
}

impl FieldShape {
    pub(crate) const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Classifies `ty`.
pub(crate) fn field_shape(ty: &Type) -> FieldShape {
    if let Some(inner) = vec_inner(ty) {
        return scalar_kind(inner).map_or(FieldShape::Unsupported, FieldShape::List);
    }
    if let Some(inner) = option_inner(ty) {
        return scalar_kind(inner).map_or(FieldShape::Unsupported, FieldShape::Optional);
    }
    scalar_kind(ty).map_or(FieldShape::Unsupported, FieldShape::Scalar)
}

/// Returns the `ScalarKind` variant for a scalar type.
///
/// Only the final path segment is compared, so `std::time::Duration` and
/// `url::Url` match as well as their bare names. Segments with generic
/// arguments never match.
pub(crate) fn scalar_kind(ty: &Type) -> Option<&'static str> {
    let Type::Path(p) = ty else {
        return None;
    };
    if p.qself.is_some() {
        return None;
    }
    let last = p.path.segments.last()?;
    if !matches!(last.arguments, PathArguments::None) {
        return None;
    }
    SCALARS
        .iter()
        .find(|(name, _)| last.ident == name)
        .map(|(_, variant)| *variant)
}

/// Extract the first type argument from a `PathArguments` container.
fn extract_first_type_argument(args: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(angle_args) = args else {
        return None;
    };
    let first = angle_args.args.first()?;
    let GenericArgument::Type(inner) = first else {
        return None;
    };
    Some(inner)
}

/// Returns the generic parameter if `ty` is the provided wrapper.
///
/// The check is shallow: it inspects only the outermost path and supports
/// common fully-qualified forms like `std::option::Option<T>`.
fn type_inner<'a>(ty: &'a Type, wrapper: &str) -> Option<&'a Type> {
    let Type::Path(p) = ty else {
        return None;
    };
    let last = p.path.segments.last()?;
    if last.ident != wrapper {
        return None;
    }
    extract_first_type_argument(&last.arguments)
}

/// Returns the inner type if `ty` is `Option<T>`.
pub(crate) fn option_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, "Option")
}

/// Extracts the element type `T` if `ty` is `Vec<T>`.
pub(crate) fn vec_inner(ty: &Type) -> Option<&Type> {
    type_inner(ty, "Vec")
}
