//! Field descriptor tables and the traits the field walker drives.

use std::time::Duration;

use url::Url;

use crate::{Shape, TargetKindError, Value};

/// Static metadata for one field of a [`Record`].
///
/// Tables of descriptors are normally emitted by `#[derive(Configure)]`, but
/// can be written by hand with the `const` builder methods.
///
/// ```rust
/// use envflag::{FieldDescriptor, ScalarKind, Shape};
///
/// const PEERS: FieldDescriptor =
///     FieldDescriptor::new("peers", Shape::List(ScalarKind::String)).with_separator(";");
/// assert_eq!(PEERS.separator(), ";");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    ident: &'static str,
    shape: Shape,
    flag: Option<&'static str>,
    env: Option<&'static str>,
    file_env: Option<&'static str>,
    separator: Option<&'static str>,
    writable: bool,
}

impl FieldDescriptor {
    /// Creates a writable descriptor with derived names.
    ///
    /// # Panics
    ///
    /// Panics when `ident` is empty. In a `const` table this surfaces as a
    /// compile-time error.
    #[must_use]
    pub const fn new(ident: &'static str, shape: Shape) -> Self {
        assert!(!ident.is_empty(), "field identifier must not be empty");
        Self {
            ident,
            shape,
            flag: None,
            env: None,
            file_env: None,
            separator: None,
            writable: true,
        }
    }

    /// Overrides the flag name; `"-"` disables flag lookup.
    #[must_use]
    pub const fn with_flag(mut self, flag: &'static str) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Overrides the environment variable name; `"-"` disables it.
    #[must_use]
    pub const fn with_env(mut self, env: &'static str) -> Self {
        self.env = Some(env);
        self
    }

    /// Overrides the file-indirection variable name; `"-"` disables it.
    #[must_use]
    pub const fn with_file_env(mut self, file_env: &'static str) -> Self {
        self.file_env = Some(file_env);
        self
    }

    /// Overrides the list separator.
    #[must_use]
    pub const fn with_separator(mut self, separator: &'static str) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Marks the field as not writable from outside its record.
    #[must_use]
    pub const fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    /// Field identifier as written in the record.
    #[must_use]
    pub const fn ident(&self) -> &'static str {
        self.ident
    }

    /// Declared shape.
    #[must_use]
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Explicit flag name, if any.
    #[must_use]
    pub const fn flag_override(&self) -> Option<&'static str> {
        self.flag
    }

    /// Explicit environment variable name, if any.
    #[must_use]
    pub const fn env_override(&self) -> Option<&'static str> {
        self.env
    }

    /// Explicit file-indirection variable name, if any.
    #[must_use]
    pub const fn file_env_override(&self) -> Option<&'static str> {
        self.file_env
    }

    /// List separator, falling back to [`crate::DEFAULT_SEPARATOR`].
    #[must_use]
    pub const fn separator(&self) -> &'static str {
        match self.separator {
            Some(separator) => separator,
            None => crate::DEFAULT_SEPARATOR,
        }
    }

    /// Whether the walker may write this field.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.writable
    }
}

/// A configuration record the field walker can populate.
///
/// Implemented by `#[derive(Configure)]`. Hand-written implementations must
/// keep [`Record::fields`] and [`Record::assign`] in agreement: index `i` of
/// the table names the field `assign(i, ..)` writes.
pub trait Record {
    /// Name of the record type, used in diagnostics.
    fn record_name(&self) -> &'static str;

    /// Descriptor table, in declaration order.
    fn fields(&self) -> &'static [FieldDescriptor];

    /// Writes `value` into the field at `index`.
    ///
    /// Returns `false`, leaving the field untouched, when the value does not
    /// convert into the field's type or the index is unknown.
    fn assign(&mut self, index: usize, value: Value) -> bool;

    /// Debug rendering of the field's current value, used as the documented
    /// default.
    fn default_display(&self, index: usize) -> Option<String>;
}

/// Something the walker can be pointed at.
///
/// Only a mutable reference to a [`Record`] is a valid target. Records passed
/// by value and references to scalars are rejected before any field is read.
pub trait Target {
    /// Borrows the target as a record.
    ///
    /// # Errors
    ///
    /// Returns [`TargetKindError`] describing why the target cannot be
    /// populated.
    fn as_record(&mut self) -> Result<&mut dyn Record, TargetKindError>;
}

impl<R: Record> Target for &mut R {
    fn as_record(&mut self) -> Result<&mut dyn Record, TargetKindError> {
        Ok(&mut **self)
    }
}

macro_rules! non_record_targets {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Target for &mut $ty {
                fn as_record(&mut self) -> Result<&mut dyn Record, TargetKindError> {
                    Err(TargetKindError::NotRecord {
                        type_name: std::any::type_name::<$ty>(),
                    })
                }
            }

            impl Target for $ty {
                fn as_record(&mut self) -> Result<&mut dyn Record, TargetKindError> {
                    Err(TargetKindError::NotReference {
                        type_name: std::any::type_name::<$ty>(),
                    })
                }
            }
        )*
    };
}

non_record_targets!(
    String, bool, f32, f64, i8, i16, i32, i64, u8, u16, u32, u64, Duration, Url,
);
