//! Implementation of `#[derive(Convert)]`.
//!
//! The derive goes on the *target* type and emits one `ConvertFrom<Source>`
//! impl per `#[convert(from = Source)]` container attribute. Field mapping is
//! resolved entirely at compile time: each target field is initialized from
//! the same-named source field (or the field named by `#[convert(rename)]`),
//! cloned and widened through `Into`. Source fields with no target
//! counterpart are never touched.

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{spanned::Spanned, Attribute, Data, DeriveInput, Fields, Meta, Result};

use crate::crate_path;

/// Options parsed from a single field's `#[convert(...)]` attributes.
#[derive(Clone, Debug, Default)]
struct FieldOptions {
    /// Initialize with `Default::default()` instead of copying.
    use_default: bool,
    /// Copy from a differently named source field.
    rename: Option<syn::Ident>,
}

/// Parses container-level `#[convert(from = ...)]` attributes.
///
/// Returns one source path per attribute, in declaration order.
fn parse_source_types(attrs: &[Attribute]) -> Result<Vec<syn::Path>> {
    let mut sources = Vec::new();

    for attr in attrs {
        if !attr.path().is_ident("convert") {
            continue;
        }

        match &attr.meta {
            Meta::List(_) => {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("from") {
                        let value = meta.value()?;
                        let source: syn::Path = value.parse()?;
                        sources.push(source);
                        Ok(())
                    } else {
                        Err(meta.error(
                            "unknown container option; expected `from = SourceType`",
                        ))
                    }
                })?;
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected #[convert(from = SourceType)]",
                ));
            }
        }
    }

    Ok(sources)
}

/// Parses field-level `#[convert(...)]` attributes.
fn parse_field_options(attrs: &[Attribute]) -> Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("convert") {
            continue;
        }

        match &attr.meta {
            Meta::List(_) => {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("default") {
                        options.use_default = true;
                        Ok(())
                    } else if meta.path.is_ident("rename") {
                        let value = meta.value()?;
                        let source_field: syn::Ident = value.parse()?;
                        options.rename = Some(source_field);
                        Ok(())
                    } else {
                        Err(meta.error(
                            "unknown field option; expected `default` or `rename = source_field`",
                        ))
                    }
                })?;
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "expected #[convert(default)] or #[convert(rename = source_field)]",
                ));
            }
        }

        if options.use_default && options.rename.is_some() {
            return Err(syn::Error::new_spanned(
                attr,
                "`default` and `rename` cannot be combined on the same field",
            ));
        }
    }

    Ok(options)
}

pub(crate) fn expand_convert(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let sources = parse_source_types(&attrs)?;
    if sources.is_empty() {
        return Err(syn::Error::new(
            ident.span(),
            "missing #[convert(from = SourceType)] attribute",
        ));
    }

    let fields = match &data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            Fields::Unnamed(_) | Fields::Unit => {
                return Err(syn::Error::new(
                    ident.span(),
                    "`Convert` requires a struct with named fields",
                ));
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span(),
                "`Convert` cannot be derived for enums",
            ));
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`Convert` cannot be derived for unions",
            ));
        }
    };

    // Field initializers are independent of the source type's name, so they
    // are built once and reused for every generated impl.
    let mut initializers = Vec::new();
    for field in fields {
        let span = field.span();
        let options = parse_field_options(&field.attrs)?;
        let field_ident = field
            .ident
            .as_ref()
            .expect("named field should have an identifier");

        let initializer = if options.use_default {
            quote_spanned! { span =>
                #field_ident: ::core::default::Default::default()
            }
        } else {
            let source_field = options.rename.as_ref().unwrap_or(field_ident);
            quote_spanned! { span =>
                #field_ident: ::core::convert::Into::into(
                    ::core::clone::Clone::clone(&source.#source_field),
                )
            }
        };
        initializers.push(initializer);
    }

    let convert_from_path = crate_path("ConvertFrom");
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let impls = sources.iter().map(|source| {
        quote! {
            impl #impl_generics #convert_from_path<#source> for #ident #ty_generics #where_clause {
                fn convert_from(source: &#source) -> Self {
                    Self {
                        #(#initializers),*
                    }
                }
            }
        }
    });

    Ok(quote! { #(#impls)* })
}
