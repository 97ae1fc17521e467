//! Masking rules, traversal, and entrypoints.
//!
//! This module ties the pieces together:
//!
//! - **`rule`**: Policy layer - how to mask (`MaskRule`, `CategoryRule`)
//! - **`apply`**: Application layer - the masking machinery (`Maskable`, `ApplyMask`)
//!
//! Category markers live in `crate::category`.

mod apply;
mod rule;

pub use apply::{mask, mask_value, ApplyMask, MaskString, Maskable};
#[doc(hidden)]
pub use apply::reset_scalar;
pub use rule::{CategoryRule, HideSpec, KeepSpec, MaskRule, MASKED_PLACEHOLDER};
