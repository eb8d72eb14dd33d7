//! Literal parsing helpers for derive attributes.

use syn::meta::ParseNestedMeta;
use syn::{Lit, LitStr};

/// Parses a string literal from an attribute value.
///
/// # Examples
///
/// ```rust,ignore
/// # use syn::meta::ParseNestedMeta;
/// # fn demo(meta: &ParseNestedMeta) -> syn::Result<()> {
/// let s = lit_str(meta, "flag")?;
/// assert_eq!(s.value(), "db");
/// # Ok(())
/// # }
/// ```
pub(crate) fn lit_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<LitStr> {
    let literal = meta.value()?.parse::<Lit>()?;
    match literal {
        Lit::Str(s) => Ok(s),
        other => Err(syn::Error::new(other.span(), format!("{key} must be a string"))),
    }
}

/// Parses a string literal that must not be empty.
///
/// An empty override would silently disable nothing; `"-"` is the marker for
/// turning a source off.
pub(crate) fn lit_non_empty_str(meta: &ParseNestedMeta, key: &str) -> syn::Result<String> {
    let s = lit_str(meta, key)?;
    let value = s.value();
    if value.is_empty() {
        return Err(syn::Error::new(
            s.span(),
            format!("{key} must not be empty; use \"-\" to disable a source"),
        ));
    }
    Ok(value)
}
