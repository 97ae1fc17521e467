//! Container-level options for `#[derive(Mask)]`.

use syn::{Attribute, Meta, Result};

/// Options set on the type itself rather than on its fields.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Suppress the generated `Debug` impl so the caller can write their own.
    pub(crate) skip_debug: bool,
}

/// Collects options from every container-level `#[mask(...)]` attribute.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut skip_debug = false;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("mask")) {
        match &attr.meta {
            // bare `#[mask]` on the type carries no options
            Meta::Path(_) => {}
            Meta::List(_) => attr.parse_nested_meta(|entry| {
                if entry.path.is_ident("skip_debug") {
                    skip_debug = true;
                    Ok(())
                } else {
                    Err(entry.error(
                        "unrecognized option for container-level #[mask]; \
                         the only supported option is `skip_debug`",
                    ))
                }
            })?,
            Meta::NameValue(named) => {
                return Err(syn::Error::new_spanned(
                    named,
                    "container-level #[mask] does not take `name = value` options",
                ));
            }
        }
    }

    Ok(ContainerOptions { skip_debug })
}
