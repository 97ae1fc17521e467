//! Struct-specific `Maskable` derivation.
//!
//! This module generates traversal logic for struct fields and collects generic
//! parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    crate_path,
    strategy::{parse_field_strategy, Strategy},
    transform::{generate_field_transform, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) mask_body: TokenStream,
    pub(crate) walked_generics: Vec<Ident>,
    pub(crate) applied_generics: Vec<Ident>,
    pub(crate) debug_masked_body: TokenStream,
    pub(crate) debug_masked_generics: Vec<Ident>,
    pub(crate) debug_unmasked_body: TokenStream,
    pub(crate) debug_unmasked_generics: Vec<Ident>,
}

struct StructParts {
    mask_body: TokenStream,
    walked_generics: Vec<Ident>,
    applied_generics: Vec<Ident>,
    debug_masked_body: TokenStream,
    debug_masked_generics: Vec<Ident>,
    debug_unmasked_body: TokenStream,
    debug_unmasked_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    name: &Ident,
    data: DataStruct,
    generics: &syn::Generics,
) -> Result<StructDeriveOutput> {
    let maskable_path = crate_path("Maskable");
    let StructParts {
        mask_body,
        walked_generics,
        applied_generics,
        debug_masked_body,
        debug_masked_generics,
        debug_unmasked_body,
        debug_unmasked_generics,
    } = match data.fields {
        Fields::Named(fields) => derive_named_struct(name, fields, generics, &maskable_path)?,
        Fields::Unnamed(fields) => derive_unnamed_struct(name, fields, generics, &maskable_path)?,
        Fields::Unit => StructParts {
            mask_body: quote! { self },
            walked_generics: Vec::new(),
            applied_generics: Vec::new(),
            debug_masked_body: quote! {
                f.write_str(stringify!(#name))
            },
            debug_masked_generics: Vec::new(),
            debug_unmasked_body: quote! {
                f.write_str(stringify!(#name))
            },
            debug_unmasked_generics: Vec::new(),
        },
    };

    Ok(StructDeriveOutput {
        mask_body,
        walked_generics,
        applied_generics,
        debug_masked_body,
        debug_masked_generics,
        debug_unmasked_body,
        debug_unmasked_generics,
    })
}

fn derive_named_struct(
    name: &Ident,
    fields: syn::FieldsNamed,
    generics: &syn::Generics,
    maskable_path: &TokenStream,
) -> Result<StructParts> {
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut walked_generics = Vec::new();
    let mut applied_generics = Vec::new();
    let mut debug_masked_fields = Vec::new();
    let mut debug_unmasked_fields = Vec::new();
    let mut debug_masked_generics = Vec::new();
    let mut debug_unmasked_generics = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        maskable_path,
        walked_generics: &mut walked_generics,
        applied_generics: &mut applied_generics,
        debug_masked_generics: &mut debug_masked_generics,
        debug_unmasked_generics: &mut debug_unmasked_generics,
    };

    for field in fields.named {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let ident = field.ident.expect("named field should have an identifier");
        let binding = ident.clone();
        let ty = &field.ty;
        bindings.push(ident);

        let is_tagged = !matches!(&strategy, Strategy::PassThrough);
        let transform = generate_field_transform(&mut ctx, ty, &binding, span, &strategy)?;

        let debug_masked_field = if is_tagged {
            quote_spanned! { span =>
                debug.field(stringify!(#binding), &"[MASKED]");
            }
        } else {
            quote_spanned! { span =>
                debug.field(stringify!(#binding), #binding);
            }
        };
        let debug_unmasked_field = quote_spanned! { span =>
            debug.field(stringify!(#binding), #binding);
        };

        transforms.push(transform);
        debug_masked_fields.push(debug_masked_field);
        debug_unmasked_fields.push(debug_unmasked_field);
    }

    Ok(StructParts {
        mask_body: quote! {
            let Self { #(#bindings),* } = self;
            #(#transforms)*
            Self { #(#bindings),* }
        },
        walked_generics,
        applied_generics,
        debug_masked_body: quote! {
            match self {
                Self { #(#bindings),* } => {
                    let mut debug = f.debug_struct(stringify!(#name));
                    #(#debug_masked_fields)*
                    debug.finish()
                }
            }
        },
        debug_masked_generics,
        debug_unmasked_body: quote! {
            match self {
                Self { #(#bindings),* } => {
                    let mut debug = f.debug_struct(stringify!(#name));
                    #(#debug_unmasked_fields)*
                    debug.finish()
                }
            }
        },
        debug_unmasked_generics,
    })
}

fn derive_unnamed_struct(
    name: &Ident,
    fields: syn::FieldsUnnamed,
    generics: &syn::Generics,
    maskable_path: &TokenStream,
) -> Result<StructParts> {
    let mut bindings = Vec::new();
    let mut transforms = Vec::new();
    let mut walked_generics = Vec::new();
    let mut applied_generics = Vec::new();
    let mut debug_masked_fields = Vec::new();
    let mut debug_unmasked_fields = Vec::new();
    let mut debug_masked_generics = Vec::new();
    let mut debug_unmasked_generics = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        maskable_path,
        walked_generics: &mut walked_generics,
        applied_generics: &mut applied_generics,
        debug_masked_generics: &mut debug_masked_generics,
        debug_unmasked_generics: &mut debug_unmasked_generics,
    };

    for (index, field) in fields.unnamed.into_iter().enumerate() {
        let ident = format_ident!("field_{index}");
        let binding = ident.clone();
        let span = field.span();
        let ty = &field.ty;
        let strategy = parse_field_strategy(&field.attrs)?;
        bindings.push(ident);

        let is_tagged = !matches!(&strategy, Strategy::PassThrough);
        let transform = generate_field_transform(&mut ctx, ty, &binding, span, &strategy)?;

        let debug_masked_field = if is_tagged {
            quote_spanned! { span =>
                debug.field(&"[MASKED]");
            }
        } else {
            quote_spanned! { span =>
                debug.field(#binding);
            }
        };
        let debug_unmasked_field = quote_spanned! { span =>
            debug.field(#binding);
        };

        transforms.push(transform);
        debug_masked_fields.push(debug_masked_field);
        debug_unmasked_fields.push(debug_unmasked_field);
    }

    Ok(StructParts {
        mask_body: quote! {
            let Self ( #(#bindings),* ) = self;
            #(#transforms)*
            Self ( #(#bindings),* )
        },
        walked_generics,
        applied_generics,
        debug_masked_body: quote! {
            match self {
                Self ( #(#bindings),* ) => {
                    let mut debug = f.debug_tuple(stringify!(#name));
                    #(#debug_masked_fields)*
                    debug.finish()
                }
            }
        },
        debug_masked_generics,
        debug_unmasked_body: quote! {
            match self {
                Self ( #(#bindings),* ) => {
                    let mut debug = f.debug_tuple(stringify!(#name));
                    #(#debug_unmasked_fields)*
                    debug.finish()
                }
            }
        },
        debug_unmasked_generics,
    })
}
