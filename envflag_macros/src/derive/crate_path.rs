//! Crate path resolution for dependency aliasing support.
//!
//! Converts the optional `#[envflag(crate = "...")]` attribute value into a
//! `TokenStream` that replaces hardcoded `::envflag` paths in generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Resolve the crate path from the parsed struct attribute.
///
/// Defaults to `::envflag` when no override is present.
pub(crate) fn resolve(crate_path: Option<&syn::Path>) -> TokenStream {
    crate_path.map_or_else(|| quote! { ::envflag }, |path| quote! { #path })
}

#[cfg(test)]
mod tests {
    //! Unit tests for crate path resolution with default and custom paths.

    use super::*;
    use anyhow::{Result, ensure};
    use rstest::rstest;

    #[rstest]
    #[case::default(None, ":: envflag")]
    #[case::custom(Some("my_alias"), "my_alias")]
    #[case::nested(Some("deps::envflag"), "deps :: envflag")]
    fn resolve_produces_expected_tokens(
        #[case] input: Option<&str>,
        #[case] expected: &str,
    ) -> Result<()> {
        let parsed = input.map(syn::parse_str::<syn::Path>).transpose()?;
        let tokens = resolve(parsed.as_ref());
        ensure!(tokens.to_string() == expected, "got {tokens}");
        Ok(())
    }
}
