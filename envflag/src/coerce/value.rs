//! Typed values produced by coercion and their conversion into field types.

use std::time::Duration;

use url::Url;

/// A coerced configuration value.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// Text value.
    String(String),
    /// Boolean value.
    Bool(bool),
    /// 32-bit float.
    F32(f32),
    /// 64-bit float.
    F64(f64),
    /// 8-bit signed integer.
    I8(i8),
    /// 16-bit signed integer.
    I16(i16),
    /// 32-bit signed integer.
    I32(i32),
    /// 64-bit signed integer.
    I64(i64),
    /// 8-bit unsigned integer.
    U8(u8),
    /// 16-bit unsigned integer.
    U16(u16),
    /// 32-bit unsigned integer.
    U32(u32),
    /// 64-bit unsigned integer.
    U64(u64),
    /// Signed duration in nanoseconds.
    Duration(i64),
    /// Parsed URL.
    Url(Url),
    /// List of scalar values.
    List(Vec<Value>),
}

/// Conversion from a coerced [`Value`] into a concrete field type.
///
/// Returns `None` when the value does not fit, in which case the field is
/// left unchanged.
pub trait FromValue: Sized {
    /// Converts `value` into `Self`.
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! scalar_from_value {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_from_value! {
    String => String,
    Bool => bool,
    F32 => f32,
    F64 => f64,
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    Url => Url,
}

impl FromValue for Duration {
    fn from_value(value: Value) -> Option<Self> {
        let Value::Duration(nanos) = value else {
            return None;
        };
        // Negative durations have no `std::time::Duration` representation.
        u64::try_from(nanos).ok().map(Self::from_nanos)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Option<Self> {
        let Value::List(items) = value else {
            return None;
        };
        Some(items.into_iter().filter_map(T::from_value).collect())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Option<Self> {
        T::from_value(value).map(Some)
    }
}
