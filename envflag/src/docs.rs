//! Serialisable description of a record's external names.
//!
//! The same names the resolver queries are listed per field, so tooling can
//! generate help pages or deployment manifests without running a pass.

use serde::Serialize;

use crate::{CanonicalNames, Record, Shape};

/// Description of every writable field of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordDocs {
    /// Name of the record type.
    pub record: String,
    /// Writable fields, in declaration order.
    pub fields: Vec<FieldDocs>,
}

/// External names and shape of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDocs {
    /// Field identifier.
    pub name: String,
    /// Flag name, unless the flag source is disabled.
    pub flag: Option<String>,
    /// Environment variable, unless disabled.
    pub env: Option<String>,
    /// File-indirection variable, unless disabled.
    pub file_env: Option<String>,
    /// Declared shape.
    pub shape: Shape,
    /// Separator for list shapes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    /// Rendering of the field's current value.
    pub default: Option<String>,
}

impl RecordDocs {
    /// Describes `record`, using its current values as defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use envflag::Configure;
    /// use envflag::docs::RecordDocs;
    ///
    /// #[derive(Configure)]
    /// #[expect(non_snake_case, reason = "field named after its external key")]
    /// struct Limits {
    ///     pub MaxConns: u32,
    /// }
    ///
    /// let docs = RecordDocs::of(&Limits { MaxConns: 16 });
    /// let field = &docs.fields[0];
    /// assert_eq!(field.flag.as_deref(), Some("max.conns"));
    /// assert_eq!(field.env.as_deref(), Some("MAX_CONNS"));
    /// assert_eq!(field.default.as_deref(), Some("16"));
    /// ```
    #[must_use]
    pub fn of(record: &dyn Record) -> Self {
        let fields = record
            .fields()
            .iter()
            .enumerate()
            .filter(|(_, field)| field.is_writable())
            .map(|(index, field)| {
                let names = CanonicalNames::for_field(field);
                FieldDocs {
                    name: field.ident().to_owned(),
                    flag: names.active_flag().map(str::to_owned),
                    env: names.active_env().map(str::to_owned),
                    file_env: names.active_file_env().map(str::to_owned),
                    shape: field.shape(),
                    separator: matches!(field.shape(), Shape::List(_))
                        .then(|| field.separator().to_owned()),
                    default: record.default_display(index),
                }
            })
            .collect();
        Self {
            record: record.record_name().to_owned(),
            fields,
        }
    }
}
