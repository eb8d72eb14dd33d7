//! Expansion pipeline for `#[derive(Configure)]`: parse, then generate.

mod crate_path;
mod generate;
pub(crate) mod parse;

use proc_macro2::TokenStream;
use syn::DeriveInput;

/// Expands the derive for `input`.
///
/// # Errors
///
/// Returns a [`syn::Error`] for inputs that are not structs with named
/// fields, or that carry malformed `#[envflag(...)]` attributes.
pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream> {
    let parsed = parse::parse_input(input)?;
    let krate = crate_path::resolve(parsed.struct_attrs.crate_path.as_ref());
    Ok(generate::record_impl(input, &parsed, &krate))
}
