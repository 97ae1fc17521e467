//! Typed record conversion and field masking.
//!
//! This crate covers the two chores on either side of a DTO boundary:
//!
//! - **Conversion**: build a target record from a source record by copying
//!   same-named fields, optionally followed by a caller-supplied finishing
//!   step for fields the copy cannot derive. Batch forms handle slices with
//!   or without empty slots.
//! - **Masking**: tag fields with a redaction category and produce a masked
//!   copy at the emission boundary, right before serializing or logging.
//!
//! Both are driven by derives:
//! - `#[derive(Convert)]` on the target type generates the field mapping per
//!   concrete (source, target) pair at compile time. Unmatched source fields
//!   are ignored; target-only fields are tagged `#[convert(default)]` and
//!   filled by the finishing step.
//! - `#[derive(Mask)]` walks the type and applies each tagged field's
//!   category rule (or an inline `custom(...)` rule) when `mask()` is called.
//!
//! Key rules for masking:
//! - Use `#[mask(Category)]` for string-like leaf values.
//! - Use `#[mask]` for scalars and nested `Mask` types.
//! - Unannotated fields pass through unchanged.
//! - `Debug` always prints `"[MASKED]"` for tagged fields; rules apply only
//!   when calling `.mask()`.
//!
//! What this crate does:
//! - defines category marker types and the [`MaskCategory`] trait
//! - defines masking rules and the `mask` entrypoint
//! - defines the [`ConvertFrom`] contract and batch conversion helpers
//! - provides integrations behind feature flags (e.g. `slog`)
//!
//! What it does not do:
//! - perform I/O or logging
//! - validate the business meaning of copied or masked values
//!
//! The `Convert` and `Mask` derive macros live in `remold-derive` and are
//! re-exported from the crate root.

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
    clippy::option_if_let_else,
    clippy::from_over_into
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use remold_derive::{Convert, Mask};

#[allow(unused_extern_crates)]
extern crate self as remold;

// Module declarations
#[cfg(feature = "category")]
mod category;
#[cfg(feature = "convert")]
mod convert;
#[cfg(feature = "mask")]
mod mask;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
#[cfg(feature = "category")]
pub use category::{Address, BankCard, Email, IdNumber, MaskCategory, Mobile, Money, Name};
#[cfg(feature = "convert")]
pub use convert::{
    convert_all_to, convert_all_to_with, convert_batch_preserving, convert_batch_preserving_with,
    convert_batch_to, convert_batch_to_with, ConvertError, ConvertFrom, ConvertTo,
};
#[cfg(feature = "mask")]
pub use mask::{
    mask, mask_value, ApplyMask, CategoryRule, HideSpec, KeepSpec, MaskRule, MaskString, Maskable,
    MASKED_PLACEHOLDER,
};
#[doc(hidden)]
#[cfg(feature = "mask")]
pub use mask::reset_scalar;
