//! Token generation for `#[derive(Configure)]`.
//!
//! Produces two impls for the input struct:
//!
//! - `Record`, carrying a `const` descriptor table, the `assign` write-back
//!   match and the `default_display` renderer;
//! - `Target` for the struct by value, which rejects the call because the
//!   results could never reach the caller.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::DeriveInput;
use syn::ext::IdentExt;

use super::parse::{FieldShape, ParsedField, ParsedInput};

/// Builds the `FieldDescriptor` constructor expression for `field`.
pub(crate) fn descriptor_tokens(field: &ParsedField, krate: &TokenStream) -> TokenStream {
    let ident = field.ident.unraw().to_string();
    let shape = shape_tokens(field.shape, krate);
    let mut tokens = quote! { #krate::FieldDescriptor::new(#ident, #shape) };
    let overrides = [
        ("with_flag", field.attrs.flag.as_deref()),
        ("with_env", field.attrs.env.as_deref()),
        ("with_file_env", field.attrs.file_env.as_deref()),
        ("with_separator", field.attrs.separator.as_deref()),
    ];
    for (method, value) in overrides {
        if let Some(value) = value {
            let call = format_ident!("{method}");
            tokens = quote! { #tokens.#call(#value) };
        }
    }
    if !field.writable {
        tokens = quote! { #tokens.read_only() };
    }
    tokens
}

fn shape_tokens(shape: FieldShape, krate: &TokenStream) -> TokenStream {
    let scalar = |name: &str| {
        let variant = format_ident!("{name}");
        quote! { #krate::ScalarKind::#variant }
    };
    match shape {
        FieldShape::Scalar(variant) => {
            let kind = scalar(variant);
            quote! { #krate::Shape::Scalar(#kind) }
        }
        FieldShape::List(variant) => {
            let kind = scalar(variant);
            quote! { #krate::Shape::List(#kind) }
        }
        FieldShape::Optional(variant) => {
            let kind = scalar(variant);
            quote! { #krate::Shape::Optional(#kind) }
        }
        FieldShape::Unsupported => quote! { #krate::Shape::Unsupported },
    }
}

/// Fields the walker can actually write, with their table indices.
fn assignable(fields: &[ParsedField]) -> impl Iterator<Item = (Literal, &ParsedField)> {
    fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.writable && field.shape.is_supported())
        .map(|(index, field)| (Literal::usize_unsuffixed(index), field))
}

/// Builds the `assign` match arms.
pub(crate) fn assign_arms(fields: &[ParsedField], krate: &TokenStream) -> Vec<TokenStream> {
    assignable(fields)
        .map(|(index, field)| {
            let name = &field.ident;
            let ty = &field.ty;
            quote! {
                #index => match <#ty as #krate::FromValue>::from_value(value) {
                    ::core::option::Option::Some(converted) => {
                        self.#name = converted;
                        true
                    }
                    ::core::option::Option::None => false,
                }
            }
        })
        .collect()
}

/// Builds the `default_display` match arms.
pub(crate) fn display_arms(fields: &[ParsedField]) -> Vec<TokenStream> {
    assignable(fields)
        .map(|(index, field)| {
            let name = &field.ident;
            quote! {
                #index => ::core::option::Option::Some(::std::format!("{:?}", self.#name))
            }
        })
        .collect()
}

/// Generates the complete derive output.
pub(crate) fn record_impl(
    input: &DeriveInput,
    parsed: &ParsedInput,
    krate: &TokenStream,
) -> TokenStream {
    let ident = &input.ident;
    let record_name = ident.unraw().to_string();
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let descriptors: Vec<TokenStream> = parsed
        .fields
        .iter()
        .map(|field| descriptor_tokens(field, krate))
        .collect();
    let assign = assign_arms(&parsed.fields, krate);
    let display = display_arms(&parsed.fields);

    quote! {
        impl #impl_generics #krate::Record for #ident #ty_generics #where_clause {
            fn record_name(&self) -> &'static str {
                #record_name
            }

            fn fields(&self) -> &'static [#krate::FieldDescriptor] {
                const FIELDS: &[#krate::FieldDescriptor] = &[#(#descriptors),*];
                FIELDS
            }

            fn assign(&mut self, index: usize, value: #krate::Value) -> bool {
                match index {
                    #(#assign,)*
                    _ => {
                        ::core::mem::drop(value);
                        false
                    }
                }
            }

            fn default_display(&self, index: usize) -> ::core::option::Option<::std::string::String> {
                match index {
                    #(#display,)*
                    _ => ::core::option::Option::None,
                }
            }
        }

        impl #impl_generics #krate::Target for #ident #ty_generics #where_clause {
            fn as_record(
                &mut self,
            ) -> ::core::result::Result<&mut dyn #krate::Record, #krate::TargetKindError> {
                ::core::result::Result::Err(#krate::TargetKindError::NotReference {
                    type_name: ::core::any::type_name::<Self>(),
                })
            }
        }
    }
}
