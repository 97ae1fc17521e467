//! Parsing of `#[mask(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, LitChar, LitInt, Meta, Result};

/// Inline rule carried by `#[mask(custom(...))]`.
///
/// Mirrors the shape of `MaskRule::keep(prefix, suffix).with_mask_char(c)`:
/// the first `prefix` and last `suffix` characters stay visible, the middle
/// is replaced with `mask_char`.
#[derive(Clone, Debug)]
pub(crate) struct CustomRule {
    pub(crate) prefix: usize,
    pub(crate) suffix: usize,
    pub(crate) mask_char: char,
}

impl Default for CustomRule {
    fn default() -> Self {
        Self {
            prefix: 0,
            suffix: 0,
            mask_char: '*',
        }
    }
}

/// Field transformation strategy based on `#[mask(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `PassThrough` | Field passes through unchanged |
/// | `#[mask]` | `Walk` | Walk containers OR reset scalars |
/// | `#[mask(Category)]` | `Category(Category)` | Apply category rule |
/// | `#[mask(custom(...))]` | `Custom(rule)` | Apply inline keep rule |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// No annotation: pass through unchanged.
    ///
    /// This is the default for fields without `#[mask(...)]`.
    /// External types like `DateTime<Utc>` or `Decimal` work automatically.
    PassThrough,
    /// Bare `#[mask]`: walk containers or reset scalars.
    ///
    /// - For scalars (i32, bool, etc.): reset to the default value
    /// - For structs: walk using `Maskable::mask`
    Walk,
    /// `#[mask(Category)]`: apply the category's rule.
    ///
    /// The category type (e.g., `Mobile`, `BankCard`) determines how the
    /// value is masked via `CategoryRule`.
    Category(syn::Path),
    /// `#[mask(custom(...))]`: apply a caller-supplied keep rule.
    Custom(CustomRule),
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[mask] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

fn parse_custom_rule(list: &syn::MetaList) -> Result<CustomRule> {
    let mut rule = CustomRule::default();
    list.parse_nested_meta(|meta| {
        if meta.path.is_ident("prefix") {
            let lit: LitInt = meta.value()?.parse()?;
            rule.prefix = lit.base10_parse()?;
            Ok(())
        } else if meta.path.is_ident("suffix") {
            let lit: LitInt = meta.value()?.parse()?;
            rule.suffix = lit.base10_parse()?;
            Ok(())
        } else if meta.path.is_ident("mask_char") {
            let lit: LitChar = meta.value()?.parse()?;
            rule.mask_char = lit.value();
            Ok(())
        } else {
            Err(meta.error("unknown custom option; expected `prefix`, `suffix`, or `mask_char`"))
        }
    })?;
    Ok(rule)
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("mask") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                // Bare #[mask] - walk containers or reset scalars
                set_strategy(&mut strategy, Strategy::Walk, attr.span())?;
            }
            Meta::List(list) => {
                // Either a category path (#[mask(Mobile)]) or an inline
                // custom rule (#[mask(custom(prefix = 3))])
                match syn::parse2::<Meta>(list.tokens.clone()) {
                    Ok(Meta::Path(path)) if path.is_ident("custom") => {
                        set_strategy(
                            &mut strategy,
                            Strategy::Custom(CustomRule::default()),
                            attr.span(),
                        )?;
                    }
                    Ok(Meta::Path(path)) => {
                        set_strategy(&mut strategy, Strategy::Category(path), attr.span())?;
                    }
                    Ok(Meta::List(inner)) if inner.path.is_ident("custom") => {
                        let rule = parse_custom_rule(&inner)?;
                        set_strategy(&mut strategy, Strategy::Custom(rule), attr.span())?;
                    }
                    _ => {
                        return Err(syn::Error::new(
                            attr.span(),
                            "expected a category type (e.g., #[mask(Mobile)]) or \
#[mask(custom(prefix = N, suffix = M, mask_char = 'c'))]",
                        ));
                    }
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[mask]",
                ));
            }
        }
    }

    // Default: no annotation means pass through unchanged
    Ok(strategy.unwrap_or(Strategy::PassThrough))
}
