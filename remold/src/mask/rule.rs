//! Masking rules for string-like values.
//!
//! A rule decides how much of one string survives masking. Rules know nothing
//! about structs, fields, or categories; they transform a single value at a
//! time and count Unicode scalar values, not bytes.

use std::borrow::Cow;

use crate::category::{Address, BankCard, Email, IdNumber, MaskCategory, Mobile, Money, Name};

/// Default placeholder used for full masking.
pub const MASKED_PLACEHOLDER: &str = "[MASKED]";

const DEFAULT_MASK_CHAR: char = '*';

/// Edge-span bookkeeping shared by [`KeepSpec`] and [`HideSpec`]: how many
/// leading and trailing scalars a rule singles out, and the symbol written
/// over masked positions.
#[derive(Clone, Copy, Debug)]
struct EdgeSpans {
    prefix: usize,
    suffix: usize,
    mask_char: char,
}

impl EdgeSpans {
    fn new(prefix: usize, suffix: usize) -> Self {
        Self {
            prefix,
            suffix,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }

    /// Length of the middle segment, or `None` when the edge spans meet or
    /// cross (which includes every value of `total` up to `prefix + suffix`,
    /// and the empty string in particular).
    fn middle_len(self, total: usize) -> Option<usize> {
        self.prefix
            .checked_add(self.suffix)
            .and_then(|edges| total.checked_sub(edges))
            .filter(|middle| *middle > 0)
    }
}

/// Keeps the configured edges of a value readable and masks everything in
/// between.
///
/// Values short enough that the kept edges cover them come back unchanged.
#[derive(Clone, Copy, Debug)]
pub struct KeepSpec(EdgeSpans);

impl KeepSpec {
    /// Keeps the first `count` scalar values readable.
    #[must_use]
    pub fn first(count: usize) -> Self {
        Self(EdgeSpans::new(count, 0))
    }

    /// Keeps the last `count` scalar values readable.
    #[must_use]
    pub fn last(count: usize) -> Self {
        Self(EdgeSpans::new(0, count))
    }

    /// Keeps `prefix` leading and `suffix` trailing scalar values readable.
    #[must_use]
    pub fn both(prefix: usize, suffix: usize) -> Self {
        Self(EdgeSpans::new(prefix, suffix))
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.0.mask_char = mask_char;
        self
    }

    pub(crate) fn apply_to(&self, value: &str) -> String {
        let spans = self.0;
        let total = value.chars().count();
        let Some(middle) = spans.middle_len(total) else {
            // the kept edges already cover the whole value
            return value.to_owned();
        };

        let mut out = String::with_capacity(value.len());
        let mut scalars = value.chars();
        out.extend(scalars.by_ref().take(spans.prefix));
        out.extend(std::iter::repeat(spans.mask_char).take(middle));
        out.extend(scalars.skip(middle));
        out
    }
}

/// Masks the configured edges of a value and leaves the middle readable.
///
/// The inverse of [`KeepSpec`]: when the edge spans cover the whole value,
/// every scalar is masked.
#[derive(Clone, Copy, Debug)]
pub struct HideSpec(EdgeSpans);

impl HideSpec {
    /// Masks the first `count` scalar values.
    #[must_use]
    pub fn first(count: usize) -> Self {
        Self(EdgeSpans::new(count, 0))
    }

    /// Masks the last `count` scalar values.
    #[must_use]
    pub fn last(count: usize) -> Self {
        Self(EdgeSpans::new(0, count))
    }

    /// Masks `prefix` leading and `suffix` trailing scalar values.
    #[must_use]
    pub fn both(prefix: usize, suffix: usize) -> Self {
        Self(EdgeSpans::new(prefix, suffix))
    }

    /// Uses a specific masking character.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.0.mask_char = mask_char;
        self
    }

    pub(crate) fn apply_to(&self, value: &str) -> String {
        let spans = self.0;
        let total = value.chars().count();
        let Some(middle) = spans.middle_len(total) else {
            // overlapping spans leave nothing readable
            return std::iter::repeat(spans.mask_char).take(total).collect();
        };

        let mut out = String::with_capacity(value.len());
        out.extend(std::iter::repeat(spans.mask_char).take(spans.prefix));
        out.extend(value.chars().skip(spans.prefix).take(middle));
        out.extend(std::iter::repeat(spans.mask_char).take(spans.suffix));
        out
    }
}

/// Associates a category type with a concrete string masking rule.
///
/// The rule is defined per category type and is independent of runtime context.
pub trait CategoryRule: MaskCategory {
    /// Returns the rule for this category.
    fn rule() -> MaskRule;
}

/// A masking strategy for string-like values.
///
/// All strategies operate on Unicode scalar values and return an owned `String`.
#[derive(Clone, Debug)]
pub enum MaskRule {
    /// Replace the entire value with a fixed placeholder.
    Full {
        /// The placeholder text to use.
        // `Cow` so callers can provide borrowed or owned placeholders
        placeholder: Cow<'static, str>,
    },
    /// Keep configured edge segments readable, mask the middle.
    Keep(KeepSpec),
    /// Mask configured edge segments, leave the middle readable.
    Hide(HideSpec),
}

impl MaskRule {
    /// Full masking with [`MASKED_PLACEHOLDER`].
    #[must_use]
    pub fn full() -> Self {
        Self::full_with(MASKED_PLACEHOLDER)
    }

    /// Full masking with a custom placeholder.
    #[must_use]
    pub fn full_with<P>(placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        Self::Full {
            placeholder: placeholder.into(),
        }
    }

    /// Keeps only the first `prefix` scalar values readable.
    #[must_use]
    pub fn keep_first(prefix: usize) -> Self {
        Self::Keep(KeepSpec::first(prefix))
    }

    /// Keeps only the last `suffix` scalar values readable.
    #[must_use]
    pub fn keep_last(suffix: usize) -> Self {
        Self::Keep(KeepSpec::last(suffix))
    }

    /// Keeps the first `prefix` and last `suffix` scalar values readable.
    ///
    /// This is the shape of the custom category: caller-supplied reveal
    /// lengths with everything in between masked.
    #[must_use]
    pub fn keep(prefix: usize, suffix: usize) -> Self {
        Self::Keep(KeepSpec::both(prefix, suffix))
    }

    /// Wraps an explicitly built [`KeepSpec`].
    #[must_use]
    pub fn keep_with(spec: KeepSpec) -> Self {
        Self::Keep(spec)
    }

    /// Masks the first `prefix` scalar values.
    #[must_use]
    pub fn hide_first(prefix: usize) -> Self {
        Self::Hide(HideSpec::first(prefix))
    }

    /// Masks the last `suffix` scalar values.
    #[must_use]
    pub fn hide_last(suffix: usize) -> Self {
        Self::Hide(HideSpec::last(suffix))
    }

    /// Masks the first `prefix` and last `suffix` scalar values.
    #[must_use]
    pub fn hide(prefix: usize, suffix: usize) -> Self {
        Self::Hide(HideSpec::both(prefix, suffix))
    }

    /// Wraps an explicitly built [`HideSpec`].
    #[must_use]
    pub fn hide_with(spec: HideSpec) -> Self {
        Self::Hide(spec)
    }

    /// Overrides the masking character used by keep/hide rules.
    ///
    /// No effect on [`MaskRule::Full`]: full masking substitutes a
    /// placeholder string, it does not mask individual characters.
    #[must_use]
    pub fn with_mask_char(self, mask_char: char) -> Self {
        match self {
            full @ Self::Full { .. } => full,
            Self::Keep(spec) => Self::Keep(spec.with_mask_char(mask_char)),
            Self::Hide(spec) => Self::Hide(spec.with_mask_char(mask_char)),
        }
    }

    /// Applies the rule to `value`.
    ///
    /// This method is total (it does not return errors).
    #[must_use]
    pub fn apply_to(&self, value: &str) -> String {
        match self {
            Self::Full { placeholder } => placeholder.clone().into_owned(),
            Self::Keep(spec) => spec.apply_to(value),
            Self::Hide(spec) => spec.apply_to(value),
        }
    }
}

impl Default for MaskRule {
    fn default() -> Self {
        Self::full()
    }
}

macro_rules! default_rules {
    ($($category:ty => $rule:expr),* $(,)?) => {
        $(
            impl CategoryRule for $category {
                fn rule() -> MaskRule {
                    $rule
                }
            }
        )*
    };
}

// Default rules for the built-in categories.
default_rules! {
    Name => MaskRule::keep_first(1),
    Mobile => MaskRule::keep(3, 4),
    IdNumber => MaskRule::keep(6, 4),
    BankCard => MaskRule::keep_last(4),
    Email => MaskRule::keep_first(2),
    Address => MaskRule::keep_first(6),
    Money => MaskRule::full_with("******"),
}
