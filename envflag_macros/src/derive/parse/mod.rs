//! Parsing utilities for the `Configure` derive macro.

use syn::meta::ParseNestedMeta;
use syn::{Attribute, Data, DeriveInput, Fields, Visibility};

mod literals;
mod type_utils;

use literals::{lit_non_empty_str, lit_str};
pub(crate) use type_utils::{FieldShape, field_shape};

/// Struct-level attributes.
#[derive(Default, Clone)]
pub(crate) struct StructAttrs {
    /// Overrides the generated crate path for dependency aliasing.
    ///
    /// When set via `#[envflag(crate = "my_alias")]`, generated code
    /// references types through `my_alias::` instead of `::envflag::`.
    pub crate_path: Option<syn::Path>,
}

/// Field-level attributes recognised by `#[derive(Configure)]`.
///
/// Each override is kept verbatim, including the `"-"` skip marker; the
/// runtime interprets it.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldAttrs {
    pub flag: Option<String>,
    pub env: Option<String>,
    pub file_env: Option<String>,
    pub separator: Option<String>,
}

/// One named field with everything the generator needs.
pub(crate) struct ParsedField {
    pub ident: syn::Ident,
    pub ty: syn::Type,
    pub shape: FieldShape,
    pub writable: bool,
    pub attrs: FieldAttrs,
}

/// The parsed derive input.
pub(crate) struct ParsedInput {
    pub struct_attrs: StructAttrs,
    pub fields: Vec<ParsedField>,
}

/// Iterate all `#[envflag(...)]` attributes once and apply a callback.
fn parse_envflag<F>(attrs: &[Attribute], mut f: F) -> syn::Result<()>
where
    F: FnMut(&ParseNestedMeta) -> syn::Result<()>,
{
    for attr in attrs.iter().filter(|a| a.path().is_ident("envflag")) {
        attr.parse_nested_meta(|meta| f(&meta))?;
    }
    Ok(())
}

/// Extracts `#[envflag(...)]` metadata applied to a struct.
///
/// Only `crate` is recognised; any other key is rejected.
pub(crate) fn parse_struct_attrs(attrs: &[Attribute]) -> syn::Result<StructAttrs> {
    let mut out = StructAttrs::default();
    parse_envflag(attrs, |meta| {
        if meta.path.is_ident("crate") {
            let s = lit_str(meta, "crate")?;
            let path: syn::Path =
                syn::parse_str(&s.value()).map_err(|e| syn::Error::new(s.span(), e))?;
            out.crate_path = Some(path);
            Ok(())
        } else {
            Err(meta.error("unknown envflag struct attribute; expected `crate`"))
        }
    })?;
    Ok(out)
}

/// Parses field-level `#[envflag(...)]` attributes.
///
/// Recognised keys are `flag`, `env`, `file_env` and `separator`, each taking
/// a non-empty string literal. Unknown keys are rejected so misspellings do
/// not silently fall back to derived names.
pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    parse_envflag(attrs, |meta| {
        let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
            return Err(meta.error("expected an identifier key"));
        };
        let slot = match key.as_str() {
            "flag" => &mut out.flag,
            "env" => &mut out.env,
            "file_env" => &mut out.file_env,
            "separator" => &mut out.separator,
            _ => {
                return Err(meta.error(format!(
                    "unknown envflag attribute `{key}`; expected one of `flag`, `env`, \
                     `file_env`, or `separator`"
                )));
            }
        };
        *slot = Some(lit_non_empty_str(meta, &key)?);
        Ok(())
    })?;
    Ok(out)
}

/// Fields outside their record's module can only write `pub` and
/// `pub(...)` fields; `pub(self)` is as private as no modifier.
fn is_writable(vis: &Visibility) -> bool {
    match vis {
        Visibility::Public(_) => true,
        Visibility::Restricted(restricted) => !restricted.path.is_ident("self"),
        Visibility::Inherited => false,
    }
}

/// Gathers the struct's fields and attribute metadata in one pass.
///
/// Enums, unions, tuple structs and unit structs are rejected.
pub(crate) fn parse_input(input: &DeriveInput) -> syn::Result<ParsedInput> {
    let struct_attrs = parse_struct_attrs(&input.attrs)?;
    let named = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "Configure requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "Configure can only be derived for structs",
            ));
        }
    };

    let mut fields = Vec::with_capacity(named.len());
    for field in named {
        let Some(ident) = field.ident.clone() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        fields.push(ParsedField {
            ident,
            ty: field.ty.clone(),
            shape: field_shape(&field.ty),
            writable: is_writable(&field.vis),
            attrs: parse_field_attrs(&field.attrs)?,
        });
    }
    Ok(ParsedInput {
        struct_attrs,
        fields,
    })
}
