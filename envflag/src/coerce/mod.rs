//! Conversion of raw source strings into typed field values.
//!
//! Shapes form a closed set: every field is a scalar, a list of scalars, an
//! optional scalar, or unsupported. Unsupported shapes never produce a value,
//! so their fields always keep their defaults.

mod duration;
mod value;

use serde::Serialize;

pub use duration::parse_duration;
pub use value::{FromValue, Value};

/// Separator used to split list values when a field does not override it.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Scalar kinds understood by the coercion engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarKind {
    /// Text, taken verbatim.
    String,
    /// `true` or `false`.
    Bool,
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// 8-bit signed integer.
    I8,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
    /// 64-bit signed integer.
    I64,
    /// 8-bit unsigned integer.
    U8,
    /// 16-bit unsigned integer.
    U16,
    /// 32-bit unsigned integer.
    U32,
    /// 64-bit unsigned integer.
    U64,
    /// Unit-suffixed duration such as `90m` or `1h30m`.
    Duration,
    /// Absolute URL.
    Url,
}

/// Declared shape of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Shape {
    /// A single value.
    Scalar(ScalarKind),
    /// A list of values split on the field's separator.
    List(ScalarKind),
    /// An `Option` around a single value; resolved values are wrapped in
    /// `Some`.
    Optional(ScalarKind),
    /// A type the engine cannot produce; resolution leaves the field alone.
    Unsupported,
}

impl Shape {
    /// Returns `true` when values of this shape can be coerced.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Coerces `raw` into a value of `shape`.
///
/// Returns `None` when a scalar fails to parse or the shape is unsupported.
/// Lists never fail: elements that do not parse are dropped.
///
/// # Examples
///
/// ```rust
/// use envflag::{ScalarKind, Shape, Value, coerce};
///
/// let port = coerce("8080", Shape::Scalar(ScalarKind::U16), ",");
/// assert_eq!(port, Some(Value::U16(8080)));
/// assert_eq!(coerce("eighty", Shape::Scalar(ScalarKind::U16), ","), None);
/// ```
#[must_use]
pub fn coerce(raw: &str, shape: Shape, separator: &str) -> Option<Value> {
    match shape {
        Shape::Scalar(kind) | Shape::Optional(kind) => parse_scalar(raw, kind),
        Shape::List(kind) => Some(Value::List(coerce_list(raw, kind, separator))),
        Shape::Unsupported => None,
    }
}

/// Splits `raw` on `separator` and parses each part as `kind`, keeping only
/// the parts that parse, in their original order.
///
/// An empty `raw` yields an empty list. An empty `separator` falls back to
/// [`DEFAULT_SEPARATOR`].
///
/// # Examples
///
/// ```rust
/// use envflag::{ScalarKind, Value, coerce_list};
///
/// let parsed = coerce_list("1,abc,3", ScalarKind::I64, ",");
/// assert_eq!(parsed, vec![Value::I64(1), Value::I64(3)]);
/// ```
#[must_use]
pub fn coerce_list(raw: &str, kind: ScalarKind, separator: &str) -> Vec<Value> {
    if raw.is_empty() {
        return Vec::new();
    }
    let sep = if separator.is_empty() {
        DEFAULT_SEPARATOR
    } else {
        separator
    };
    raw.split(sep)
        .filter_map(|part| parse_scalar(part, kind))
        .collect()
}

fn parse_scalar(raw: &str, kind: ScalarKind) -> Option<Value> {
    let value = match kind {
        ScalarKind::String => Value::String(raw.to_owned()),
        ScalarKind::Bool => Value::Bool(parse_bool(raw)?),
        ScalarKind::F32 => Value::F32(raw.parse().ok()?),
        ScalarKind::F64 => Value::F64(raw.parse().ok()?),
        ScalarKind::I8 => Value::I8(raw.parse().ok()?),
        ScalarKind::I16 => Value::I16(raw.parse().ok()?),
        ScalarKind::I32 => Value::I32(raw.parse().ok()?),
        ScalarKind::I64 => Value::I64(raw.parse().ok()?),
        ScalarKind::U8 => Value::U8(raw.parse().ok()?),
        ScalarKind::U16 => Value::U16(raw.parse().ok()?),
        ScalarKind::U32 => Value::U32(raw.parse().ok()?),
        ScalarKind::U64 => Value::U64(raw.parse().ok()?),
        ScalarKind::Duration => Value::Duration(parse_duration(raw)?),
        ScalarKind::Url => Value::Url(url::Url::parse(raw).ok()?),
    };
    Some(value)
}

/// Accepts `1`, `t`, `true` and their false counterparts, in lower, upper
/// or title case.
fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}
