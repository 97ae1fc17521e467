//! Record-to-record conversion built on compile-time field mapping.
//!
//! The `Convert` derive generates a [`ConvertFrom`] impl per (source, target)
//! pair: every target field is copied from the same-named source field
//! (cloned, then widened via `Into`), and fields tagged `#[convert(default)]`
//! are initialized with their default instead. Source fields with no target
//! counterpart are never read, so narrowing to a partial target is silent and
//! intentional.
//!
//! On top of that trait this module provides:
//!
//! - single-value conversion with an optional *finishing step*, a closure run
//!   after the field copy to set fields the generic copy cannot derive
//!   (formatted strings, classifications, aggregates);
//! - batch conversion over slices, in two flavors: dense input (`&[S]`) and
//!   sparse input (`&[Option<S>]`) where empty slots are either dropped
//!   (skip mode) or kept in place (preserve mode).
//!
//! All operations are pure and synchronous: the source is never mutated, every
//! occupied slot yields a freshly constructed target, and there is no shared
//! state between calls. Batch input must be non-empty; this mirrors the
//! contract of the system this crate grew out of and fails eagerly with
//! [`ConvertError::InvalidArgument`] before any element is converted.

use thiserror::Error;

/// Error raised by batch conversion precondition checks.
///
/// A single kind covers all precondition violations. Field mismatches are not
/// runtime errors: a target field with no same-named source field fails to
/// compile, and a source field with no target counterpart compiles to nothing.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ConvertError {
    /// A required input did not satisfy its precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

fn ensure_not_empty<T>(sources: &[T]) -> Result<(), ConvertError> {
    if sources.is_empty() {
        return Err(ConvertError::InvalidArgument("sources must not be empty"));
    }
    Ok(())
}

/// Constructs `Self` by copying same-named fields out of `source`.
///
/// Implementations are normally generated by `#[derive(Convert)]` on the
/// target type, with `#[convert(from = Source)]` naming each source. The
/// generated code is equivalent to:
///
/// ```rust
/// use remold::{ConvertFrom, ConvertTo};
///
/// struct User {
///     id: u64,
///     name: String,
///     email: String,
/// }
///
/// struct UserSummary {
///     id: u64,
///     name: String,
/// }
///
/// impl ConvertFrom<User> for UserSummary {
///     fn convert_from(source: &User) -> Self {
///         Self {
///             id: source.id.clone().into(),
///             name: source.name.clone().into(),
///         }
///     }
/// }
///
/// let user = User {
///     id: 7,
///     name: "zhang".to_string(),
///     email: "z@example.com".to_string(),
/// };
/// let summary: UserSummary = user.convert_to();
/// assert_eq!(summary.id, 7);
/// ```
pub trait ConvertFrom<S>: Sized {
    /// Builds a new target populated from `source`. The source is not mutated.
    #[must_use]
    fn convert_from(source: &S) -> Self;
}

/// Conversion entrypoints available on every source value.
///
/// Blanket-implemented for all types; the target type picks the
/// [`ConvertFrom`] impl.
pub trait ConvertTo: Sized {
    /// Converts `self` into a freshly constructed `T`.
    #[must_use]
    fn convert_to<T>(&self) -> T
    where
        T: ConvertFrom<Self>;

    /// Converts `self` into `T`, then runs `finish` on the (source, target)
    /// pair so the caller can set fields the field copy cannot reach.
    #[must_use]
    fn convert_to_with<T, F>(&self, finish: F) -> T
    where
        T: ConvertFrom<Self>,
        F: FnOnce(&Self, &mut T);
}

impl<S> ConvertTo for S {
    fn convert_to<T>(&self) -> T
    where
        T: ConvertFrom<S>,
    {
        T::convert_from(self)
    }

    fn convert_to_with<T, F>(&self, finish: F) -> T
    where
        T: ConvertFrom<S>,
        F: FnOnce(&S, &mut T),
    {
        let mut target = T::convert_from(self);
        finish(self, &mut target);
        target
    }
}

/// Converts a dense slice of sources, in order.
///
/// Fails with [`ConvertError::InvalidArgument`] if `sources` is empty.
pub fn convert_all_to<S, T>(sources: &[S]) -> Result<Vec<T>, ConvertError>
where
    T: ConvertFrom<S>,
{
    convert_all_to_with(sources, |_, _| {})
}

/// Converts a dense slice of sources, running `finish` on every pair.
///
/// Fails with [`ConvertError::InvalidArgument`] if `sources` is empty.
pub fn convert_all_to_with<S, T, F>(sources: &[S], mut finish: F) -> Result<Vec<T>, ConvertError>
where
    T: ConvertFrom<S>,
    F: FnMut(&S, &mut T),
{
    ensure_not_empty(sources)?;
    Ok(sources
        .iter()
        .map(|source| source.convert_to_with(&mut finish))
        .collect())
}

/// Converts a sparse slice of sources, dropping empty slots (skip mode).
///
/// The result length equals the input length minus the number of `None`
/// slots, and result order matches the order of occupied slots.
///
/// Fails with [`ConvertError::InvalidArgument`] if `sources` is empty.
pub fn convert_batch_to<S, T>(sources: &[Option<S>]) -> Result<Vec<T>, ConvertError>
where
    T: ConvertFrom<S>,
{
    convert_batch_to_with(sources, |_, _| {})
}

/// Skip-mode batch conversion with a finishing step.
///
/// Fails with [`ConvertError::InvalidArgument`] if `sources` is empty.
pub fn convert_batch_to_with<S, T, F>(
    sources: &[Option<S>],
    mut finish: F,
) -> Result<Vec<T>, ConvertError>
where
    T: ConvertFrom<S>,
    F: FnMut(&S, &mut T),
{
    ensure_not_empty(sources)?;
    Ok(sources
        .iter()
        .flatten()
        .map(|source| source.convert_to_with(&mut finish))
        .collect())
}

/// Converts a sparse slice of sources, keeping empty slots in place
/// (preserve mode).
///
/// The result length equals the input length exactly; each `None` slot stays
/// `None` at its original position.
///
/// Fails with [`ConvertError::InvalidArgument`] if `sources` is empty.
pub fn convert_batch_preserving<S, T>(
    sources: &[Option<S>],
) -> Result<Vec<Option<T>>, ConvertError>
where
    T: ConvertFrom<S>,
{
    convert_batch_preserving_with(sources, |_, _| {})
}

/// Preserve-mode batch conversion with a finishing step.
///
/// Fails with [`ConvertError::InvalidArgument`] if `sources` is empty.
pub fn convert_batch_preserving_with<S, T, F>(
    sources: &[Option<S>],
    mut finish: F,
) -> Result<Vec<Option<T>>, ConvertError>
where
    T: ConvertFrom<S>,
    F: FnMut(&S, &mut T),
{
    ensure_not_empty(sources)?;
    Ok(sources
        .iter()
        .map(|slot| {
            slot.as_ref()
                .map(|source| source.convert_to_with(&mut finish))
        })
        .collect())
}
