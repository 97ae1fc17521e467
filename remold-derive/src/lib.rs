//! Derive macros for `remold`.
//!
//! This crate generates two kinds of code:
//! - `#[derive(Mask)]` reads `#[mask(...)]` field attributes and emits a
//!   `Maskable` implementation that walks the value.
//! - `#[derive(Convert)]` reads `#[convert(...)]` attributes on a target type
//!   and emits one `ConvertFrom` implementation per named source type.
//!
//! It does **not** define categories or masking rules. Those live in the main
//! `remold` crate and are applied at runtime.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::default_trait_access,
    clippy::doc_markdown,
    clippy::if_not_else,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::enum_glob_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::result_large_err,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

#[cfg(feature = "slog")]
use proc_macro2::Span;
use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
#[cfg(feature = "slog")]
use syn::parse_quote;
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_convert;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
mod types;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::{add_apply_mask_bounds, add_debug_bounds, add_maskable_bounds};

/// Derives `remold::Maskable` (and related impls) for structs and enums.
///
/// # Container Attributes
///
/// These attributes are placed on the struct/enum itself:
///
/// - `#[mask(skip_debug)]` - Opt out of `Debug` impl generation. Use this when you need a
///   custom `Debug` implementation or the type already derives `Debug` elsewhere.
///
/// # Field Attributes
///
/// - **No annotation**: The field passes through unchanged. Use this for fields that don't contain
///   maskable data, including external types like `chrono::DateTime` or `rust_decimal::Decimal`.
///
/// - `#[mask]`: For scalar types (i32, bool, char, etc.), resets the field to its default value.
///   For struct/enum types that derive `Mask`, walks into them using `Maskable`. **Not for
///   strings**: the `Maskable` impl for `String` is a passthrough, so a bare `#[mask]` on a
///   string field leaves it unmasked — use `#[mask(Category)]` or `#[mask(custom(...))]`.
///
/// - `#[mask(Category)]`: Treats the field as a maskable string-like value and applies the
///   category's rule. Works for `String`, `Option<String>`, `Vec<String>`, `Box<String>`.
///   The type must implement `ApplyMask`.
///
/// - `#[mask(custom(prefix = N, suffix = M, mask_char = 'c'))]`: Applies an inline keep rule:
///   the first `N` and last `M` characters stay visible and the middle is replaced with
///   `mask_char`. All keys are optional; defaults are `0`, `0`, `'*'`.
///
/// Unions are rejected at compile time.
///
/// # Additional Generated Impls
///
/// - `Debug`: when *not* building with `cfg(any(test, feature = "testing"))`, tagged fields are
///   formatted as the string `"[MASKED]"` rather than their values. Use `#[mask(skip_debug)]`
///   on the container to opt out.
/// - `slog::Value` (behind `cfg(feature = "slog")`): implemented by cloning the value and routing
///   it through `remold::slog::IntoMaskedJson`. **Note:** this impl requires the type to
///   implement `Clone`. The derive first looks for a top-level `slog` crate; if not found, it
///   checks the `REMOLD_SLOG_CRATE` env var for an alternate path (e.g., `my_log::slog`). If
///   neither is available, compilation fails with a clear error.
#[proc_macro_derive(Mask, attributes(mask))]
pub fn derive_mask(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand_mask(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Derives one `remold::ConvertFrom<Source>` impl per `#[convert(from = Source)]` attribute.
///
/// The derive goes on the **target** type. For every target field the generated impl reads the
/// same-named source field, clones it, and converts it with `Into` (so identical types and
/// lossless widenings both work). Source fields with no target counterpart are never read.
///
/// # Container Attributes
///
/// - `#[convert(from = path::To::Source)]` - Names a source type. Repeat the attribute to
///   generate impls for several sources.
///
/// # Field Attributes
///
/// - `#[convert(default)]`: The field is not copied and is initialized with
///   `Default::default()`. Use this for fields only a finishing step can populate.
///
/// - `#[convert(rename = source_field)]`: Copy from a differently named source field.
///
/// Only structs with named fields are supported; enums, unions, and tuple structs are rejected
/// at compile time.
#[proc_macro_derive(Convert, attributes(convert))]
pub fn derive_convert(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_convert::expand_convert(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the remold crate root.
///
/// Handles crate renaming (e.g., `my_remold = { package = "remold", ... }`)
/// and internal usage (when derive is used inside the remold crate itself).
fn crate_root() -> proc_macro2::TokenStream {
    match crate_name("remold") {
        Ok(FoundCrate::Itself) => quote! { crate },
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Err(_) => quote! { ::remold },
    }
}

/// Returns the token stream to reference the slog crate root.
///
/// Handles crate renaming (e.g., `my_slog = { package = "slog", ... }`).
/// If the top-level `slog` crate is not available, falls back to the
/// `REMOLD_SLOG_CRATE` env var, which should be a path like `my_log::slog`.
#[cfg(feature = "slog")]
fn slog_crate() -> Result<proc_macro2::TokenStream> {
    match crate_name("slog") {
        Ok(FoundCrate::Itself) => Ok(quote! { crate }),
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            Ok(quote! { ::#ident })
        }
        Err(_) => {
            let env_value = std::env::var("REMOLD_SLOG_CRATE").map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    "slog support is enabled, but no top-level `slog` crate was found. \
Set the REMOLD_SLOG_CRATE env var to a path (e.g., `my_log::slog`) or add \
`slog` as a direct dependency.",
                )
            })?;
            let path = syn::parse_str::<syn::Path>(&env_value).map_err(|_| {
                syn::Error::new(
                    Span::call_site(),
                    format!("REMOLD_SLOG_CRATE must be a valid Rust path (got `{env_value}`)"),
                )
            })?;
            Ok(quote! { #path })
        }
    }
}

fn crate_path(item: &str) -> proc_macro2::TokenStream {
    let root = crate_root();
    let item_ident = syn::parse_str::<syn::Path>(item).expect("remold crate path should parse");
    quote! { #root::#item_ident }
}

struct DeriveOutput {
    mask_body: TokenStream,
    walked_generics: Vec<Ident>,
    applied_generics: Vec<Ident>,
    debug_masked_body: TokenStream,
    debug_masked_generics: Vec<Ident>,
    debug_unmasked_body: TokenStream,
    debug_unmasked_generics: Vec<Ident>,
}

#[allow(clippy::too_many_lines)]
fn expand_mask(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { skip_debug } = parse_container_options(&attrs)?;

    let crate_root = crate_root();

    let derive_output = match &data {
        Data::Struct(data) => {
            let output = derive_struct(&ident, data.clone(), &generics)?;
            DeriveOutput {
                mask_body: output.mask_body,
                walked_generics: output.walked_generics,
                applied_generics: output.applied_generics,
                debug_masked_body: output.debug_masked_body,
                debug_masked_generics: output.debug_masked_generics,
                debug_unmasked_body: output.debug_unmasked_body,
                debug_unmasked_generics: output.debug_unmasked_generics,
            }
        }
        Data::Enum(data) => {
            let output = derive_enum(&ident, data.clone(), &generics)?;
            DeriveOutput {
                mask_body: output.mask_body,
                walked_generics: output.walked_generics,
                applied_generics: output.applied_generics,
                debug_masked_body: output.debug_masked_body,
                debug_masked_generics: output.debug_masked_generics,
                debug_unmasked_body: output.debug_unmasked_body,
                debug_unmasked_generics: output.debug_unmasked_generics,
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Mask` cannot be derived for unions",
            ));
        }
    };

    let mask_generics = add_maskable_bounds(generics.clone(), &derive_output.walked_generics);
    let mask_generics = add_apply_mask_bounds(mask_generics, &derive_output.applied_generics);
    let (impl_generics, ty_generics, where_clause) = mask_generics.split_for_impl();
    let debug_masked_generics =
        add_debug_bounds(generics.clone(), &derive_output.debug_masked_generics);
    let (debug_masked_impl_generics, debug_masked_ty_generics, debug_masked_where_clause) =
        debug_masked_generics.split_for_impl();
    let debug_unmasked_generics =
        add_debug_bounds(generics.clone(), &derive_output.debug_unmasked_generics);
    let (debug_unmasked_impl_generics, debug_unmasked_ty_generics, debug_unmasked_where_clause) =
        debug_unmasked_generics.split_for_impl();
    let mask_body = &derive_output.mask_body;
    let debug_masked_body = &derive_output.debug_masked_body;
    let debug_unmasked_body = &derive_output.debug_unmasked_body;
    let debug_impl = if skip_debug {
        quote! {}
    } else {
        quote! {
            #[cfg(any(test, feature = "testing"))]
            impl #debug_unmasked_impl_generics ::core::fmt::Debug for #ident #debug_unmasked_ty_generics #debug_unmasked_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_unmasked_body
                }
            }

            #[cfg(not(any(test, feature = "testing")))]
            #[allow(unused_variables)]
            impl #debug_masked_impl_generics ::core::fmt::Debug for #ident #debug_masked_ty_generics #debug_masked_where_clause {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    #debug_masked_body
                }
            }
        }
    };

    // Only generate slog impl when the slog feature is enabled on remold-derive.
    // If slog is not available, emit a clear error with instructions.
    #[cfg(feature = "slog")]
    let slog_impl = {
        let slog_crate = slog_crate()?;
        let mut slog_generics = generics;
        let slog_where_clause = slog_generics.make_where_clause();
        let self_ty: syn::Type = parse_quote!(#ident #ty_generics);
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::core::clone::Clone));
        // IntoMaskedJson requires Self: Serialize, so we add this bound to enable
        // generic types to work with slog when their type parameters implement Serialize.
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: ::serde::Serialize));
        slog_where_clause
            .predicates
            .push(parse_quote!(#self_ty: #crate_root::slog::IntoMaskedJson));
        let (slog_impl_generics, slog_ty_generics, slog_where_clause) =
            slog_generics.split_for_impl();
        quote! {
            impl #slog_impl_generics #slog_crate::Value for #ident #slog_ty_generics #slog_where_clause {
                fn serialize(
                    &self,
                    _record: &#slog_crate::Record<'_>,
                    key: #slog_crate::Key,
                    serializer: &mut dyn #slog_crate::Serializer,
                ) -> #slog_crate::Result {
                    let masked = #crate_root::slog::IntoMaskedJson::into_masked_json(self.clone());
                    #slog_crate::Value::serialize(&masked, _record, key, serializer)
                }
            }
        }
    };

    #[cfg(not(feature = "slog"))]
    let slog_impl = quote! {};

    let trait_impl = quote! {
        impl #impl_generics #crate_root::Maskable for #ident #ty_generics #where_clause {
            fn mask(self) -> Self {
                use #crate_root::Maskable as _;
                #mask_body
            }
        }

        #debug_impl

        #slog_impl

        // `slog` already provides `impl<V: Value> Value for &V`, so a reference
        // impl here would conflict with the blanket impl.
    };
    Ok(trait_impl)
}
