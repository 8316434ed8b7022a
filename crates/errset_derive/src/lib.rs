//! Derive macro for `errset` error domains.
//!
//! `#[derive(ErrorDomain)]` turns a fieldless enum into an error domain:
//! - implements the `ErrorDomain` trait (variant list, discriminant codes,
//!   code/name lookups),
//! - implements `DomainEnum: PartialEq<ErrorSet<S>>` for every set over the
//!   domain, so raw variants compare against set values directly,
//! - emits const checks that every discriminant is non-negative and fits in
//!   16 bits (variant pairs must pack into a `u32` for two-way dispatch),
//! - emits a snake_case companion module holding one singleton error-set
//!   marker per variant (`enum StoreError { Timeout }` gets
//!   `store_error::Timeout`).
//!
//! The enum must live at module scope (the companion module refers back to
//! it via `super::`).

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derive the `ErrorDomain` trait and singleton markers for a fieldless
/// enum.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, ErrorDomain)]
/// enum StoreError {
///     Timeout,
///     Refused,
/// }
///
/// // Generates `impl ErrorDomain for StoreError` plus:
/// // mod store_error {
/// //     pub struct Timeout;   // VariantSet with CODES = [0]
/// //     pub struct Refused;   // VariantSet with CODES = [1]
/// // }
/// ```
#[proc_macro_derive(ErrorDomain)]
pub fn derive_error_domain(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "ErrorDomain can only be derived for enums",
        ));
    };
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ErrorDomain does not support generic enums",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "an error domain needs at least one variant",
        ));
    }
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ErrorDomain requires fieldless variants",
            ));
        }
    }

    let name = &input.ident;
    let vis = &input.vis;
    let idents: Vec<_> = data.variants.iter().map(|v| &v.ident).collect();
    let names: Vec<String> = idents.iter().map(|i| i.to_string()).collect();

    let module = format_ident!("{}", to_snake_case(&name.to_string()));
    let module_doc = format!("Singleton error-set markers for [`{name}`].");
    let marker_docs: Vec<String> = names
        .iter()
        .map(|n| format!("The single-variant error set holding [`{name}::{n}`](super::{name}::{n})."))
        .collect();

    Ok(quote! {
        impl ::errset::ErrorDomain for #name {
            const VARIANTS: &'static [Self] = &[#(Self::#idents),*];

            fn code(self) -> u32 {
                self as u32
            }

            fn from_code(code: u32) -> ::core::option::Option<Self> {
                #(
                    if code == Self::#idents as u32 {
                        return ::core::option::Option::Some(Self::#idents);
                    }
                )*
                ::core::option::Option::None
            }

            fn name(self) -> &'static str {
                match self {
                    #(Self::#idents => #names),*
                }
            }
        }

        // Raw-value comparison (`DomainEnum == ErrorSet<_>`). The mirrored
        // direction would leave the set's type parameter uncovered, so only
        // this orientation exists; compare via `.value()` otherwise.
        impl<S> ::core::cmp::PartialEq<::errset::ErrorSet<S>> for #name
        where
            S: ::errset::VariantSet<Domain = #name>,
        {
            fn eq(&self, other: &::errset::ErrorSet<S>) -> bool {
                *self == other.value()
            }
        }

        const _: () = {
            #(
                assert!(
                    (#name::#idents as i128) >= 0 && (#name::#idents as i128) <= u16::MAX as i128,
                    "error-domain discriminants must be non-negative and fit in 16 bits"
                );
            )*
        };

        #[doc = #module_doc]
        #vis mod #module {
            #(
                #[doc = #marker_docs]
                pub(super) struct #idents;

                impl ::errset::VariantSet for #idents {
                    type Domain = super::#name;

                    const CODES: &'static [u32] = &[super::#name::#idents as u32];
                }
            )*
        }
    })
}

/// Convert a CamelCase type name to the snake_case companion-module name.
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            for low in ch.to_lowercase() {
                out.push(low);
            }
        } else {
            out.push(ch);
        }
    }
    out
}
