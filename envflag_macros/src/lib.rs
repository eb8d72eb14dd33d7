//! Procedural macros for `envflag`.
//!
//! `#[derive(Configure)]` turns a struct with named fields into an
//! `envflag::Record`: it emits a static field descriptor table, recognising
//! field shapes from their declared types, plus the glue that writes resolved
//! values back into the struct.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod derive;

/// Derive macro for `envflag::Record`.
///
/// Field attributes, all optional:
///
/// - `#[envflag(flag = "name")]`: flag name, `"-"` to disable the flag;
/// - `#[envflag(env = "NAME")]`: environment variable, `"-"` to disable;
/// - `#[envflag(file_env = "NAME_FILE")]`: file-indirection variable, `"-"`
///   to disable;
/// - `#[envflag(separator = ";")]`: list separator (default `,`).
///
/// The struct attribute `#[envflag(crate = "path")]` points generated code at
/// a renamed `envflag` dependency.
///
/// Private fields are recorded as read-only and never written.
#[proc_macro_derive(Configure, attributes(envflag))]
pub fn derive_configure(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive::expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
