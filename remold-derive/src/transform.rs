//! Shared field transformation logic for struct and enum derivation.
//!
//! This module holds the common code for generating field transformations
//! used by both `derive_struct` and `derive_enum`.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;
use syn::Result;

use crate::{
    crate_path,
    generics::collect_generics_from_type,
    strategy::{CustomRule, Strategy},
    types::is_scalar_type,
};

/// Accumulated state during field processing.
///
/// This struct groups the mutable vectors that collect generics and output tokens
/// during traversal of struct fields or enum variants.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) maskable_path: &'a TokenStream,
    pub(crate) walked_generics: &'a mut Vec<Ident>,
    pub(crate) applied_generics: &'a mut Vec<Ident>,
    pub(crate) debug_masked_generics: &'a mut Vec<Ident>,
    pub(crate) debug_unmasked_generics: &'a mut Vec<Ident>,
}

/// Generates the transform token stream for a single field.
///
/// ## Field Transformation Rules
///
/// | Annotation | Behavior |
/// |------------|----------|
/// | None | Pass through unchanged (identity) |
/// | `#[mask]` | Walk containers OR reset scalars to default |
/// | `#[mask(Category)]` | Apply the category rule recursively through wrappers |
/// | `#[mask(custom(...))]` | Apply the inline keep rule recursively through wrappers |
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    binding: &Ident,
    span: Span,
    strategy: &Strategy,
) -> Result<TokenStream> {
    let maskable_path = ctx.maskable_path;

    match strategy {
        // No annotation: pass through unchanged
        // This allows external types (DateTime, Decimal, etc.) to work without issues
        Strategy::PassThrough => {
            // No trait bounds needed - any type can pass through
            // Still track for Debug impl
            collect_generics_from_type(ty, ctx.generics, ctx.debug_unmasked_generics);
            Ok(quote_spanned! { span =>
                // Field passes through unchanged (no #[mask] annotation)
                let #binding = #binding;
            })
        }
        // Bare #[mask]: walk containers or reset scalars
        Strategy::Walk => {
            if is_scalar_type(ty) {
                // Scalars reset to their default value
                let reset_path = crate_path("reset_scalar");
                Ok(quote_spanned! { span =>
                    let #binding = #reset_path(#binding);
                })
            } else {
                // Non-scalars: walk using Maskable
                collect_generics_from_type(ty, ctx.generics, ctx.walked_generics);
                collect_generics_from_type(ty, ctx.generics, ctx.debug_masked_generics);
                collect_generics_from_type(ty, ctx.generics, ctx.debug_unmasked_generics);
                Ok(quote_spanned! { span =>
                    let #binding = #maskable_path::mask(#binding);
                })
            }
        }
        // #[mask(Category)]: apply the category rule recursively.
        // Uses ApplyMask which handles any nesting depth:
        // String, Option<String>, Vec<String>, Option<Vec<String>>, etc.
        Strategy::Category(category) => {
            if is_scalar_type(ty) {
                Err(syn::Error::new(
                    span,
                    "scalar fields cannot use a category: use bare #[mask]. \
                    Scalars reset to their default value (0, false, etc.).",
                ))
            } else {
                collect_generics_from_type(ty, ctx.generics, ctx.applied_generics);
                collect_generics_from_type(ty, ctx.generics, ctx.debug_unmasked_generics);
                let category = category.clone();
                let apply_path = crate_path("ApplyMask");
                let rule_bind_path = crate_path("CategoryRule");
                Ok(quote_spanned! { span =>
                    let #binding = #apply_path::apply_rule(
                        #binding,
                        &<#category as #rule_bind_path>::rule(),
                    );
                })
            }
        }
        // #[mask(custom(...))]: build the keep rule inline and apply it the
        // same way a category rule is applied.
        Strategy::Custom(rule) => {
            if is_scalar_type(ty) {
                Err(syn::Error::new(
                    span,
                    "scalar fields cannot use a custom rule: use bare #[mask]. \
                    Scalars reset to their default value (0, false, etc.).",
                ))
            } else {
                collect_generics_from_type(ty, ctx.generics, ctx.applied_generics);
                collect_generics_from_type(ty, ctx.generics, ctx.debug_unmasked_generics);
                let CustomRule {
                    prefix,
                    suffix,
                    mask_char,
                } = rule.clone();
                let apply_path = crate_path("ApplyMask");
                let rule_path = crate_path("MaskRule");
                Ok(quote_spanned! { span =>
                    let #binding = #apply_path::apply_rule(
                        #binding,
                        &#rule_path::keep(#prefix, #suffix).with_mask_char(#mask_char),
                    );
                })
            }
        }
    }
}
