//! Domain layer: types that contain or are maskable data.
//!
//! This module defines the traits behind the `Mask` derive:
//!
//! - [`MaskString`]: types that *are* maskable data (String, Cow<str>)
//! - [`ApplyMask`]: applies a [`MaskRule`] through wrapper shapes
//! - [`Maskable`]: types that *contain* maskable data and can be traversed
//!
//! ## Field Handling
//!
//! The derive macro generates different code based on field annotations:
//!
//! | Annotation | Generated Code | Behavior |
//! |------------|----------------|----------|
//! | None | Pass through | Field unchanged (external types work!) |
//! | `#[mask]` | `Maskable::mask` or default reset | Walk or reset scalars |
//! | `#[mask(Category)]` | `ApplyMask::apply_rule` | Apply category rule |
//! | `#[mask(custom(...))]` | `ApplyMask::apply_rule` | Apply inline keep rule |
//!
//! ## Container Implementations
//!
//! This module provides `Maskable` implementations for common std containers
//! (`Option`, `Vec`, `Box`, maps, sets). When walking into these containers,
//! they recursively apply masking to their contents.
//!
//! ## External Types
//!
//! External types (like `chrono::DateTime`) don't implement `Maskable`, and
//! that's fine! Fields without `#[mask]` pass through unchanged, so external
//! types work automatically without any special handling.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    hash::Hash,
};

use super::rule::MaskRule;

// =============================================================================
// MaskString - Types that ARE maskable data (leaf values)
// =============================================================================

/// String-like payloads that can be masked via rules.
///
/// The masking engine treats these values as strings for the purpose of rule
/// application. Scalar values (numbers, booleans, chars) are not `MaskString`
/// and instead reset to their defaults via bare `#[mask]`.
///
/// ## Foreign string-like types
///
/// If the maskable field type comes from another crate, you cannot implement
/// `MaskString` for it directly (Rust's orphan rules). The recommended pattern
/// is to define a local newtype in your project and implement `MaskString`
/// (and [`ApplyMask`] via [`mask_value`]) for that wrapper.
///
/// `from_masked` is not required to preserve the original representation; it
/// only needs to construct a value that corresponds to the masked string
/// returned by the applied rule.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a `MaskString`",
    label = "this type cannot have a masking rule applied directly",
    note = "categories like `#[mask(Mobile)]` are for leaf values (String, etc.)",
    note = "if `{Self}` is a struct that derives `Mask`, use bare `#[mask]` instead to walk into it"
)]
pub trait MaskString: Sized {
    /// Returns a read-only view of the maskable value.
    fn as_str(&self) -> &str;
    /// Reconstructs the value from a masked string.
    #[must_use]
    fn from_masked(masked: String) -> Self;
}

impl MaskString for String {
    fn as_str(&self) -> &str {
        self.as_str()
    }

    fn from_masked(masked: String) -> Self {
        masked
    }
}

impl MaskString for Cow<'_, str> {
    fn as_str(&self) -> &str {
        self.as_ref()
    }

    fn from_masked(masked: String) -> Self {
        Cow::Owned(masked)
    }
}

/// Applies `rule` to a [`MaskString`] value.
///
/// Use this to implement [`ApplyMask`] for local newtypes:
///
/// ```rust
/// use remold::{mask_value, ApplyMask, MaskRule, MaskString};
///
/// struct CardNo(String);
///
/// impl MaskString for CardNo {
///     fn as_str(&self) -> &str {
///         &self.0
///     }
///     fn from_masked(masked: String) -> Self {
///         Self(masked)
///     }
/// }
///
/// impl ApplyMask for CardNo {
///     fn apply_rule(self, rule: &MaskRule) -> Self {
///         mask_value(self, rule)
///     }
/// }
/// ```
#[must_use]
pub fn mask_value<V>(value: V, rule: &MaskRule) -> V
where
    V: MaskString,
{
    let masked = rule.apply_to(value.as_str());
    V::from_masked(masked)
}

/// Resets a scalar tagged with bare `#[mask]` to its default value.
///
/// Called from derive-generated code; not intended for direct use.
#[doc(hidden)]
#[must_use]
pub fn reset_scalar<T>(_value: T) -> T
where
    T: Default,
{
    T::default()
}

// =============================================================================
// ApplyMask - Rule application through wrapper shapes
// =============================================================================

/// Applies a [`MaskRule`] to a value, recursing through wrapper shapes.
///
/// This is the trait behind `#[mask(Category)]` and `#[mask(custom(...))]`.
/// It is implemented for `String`, `Cow<str>`, and the wrappers `Option<T>`,
/// `Vec<T>`, `Box<T>`, so a tagged field may be any of `String`,
/// `Option<String>`, `Vec<String>`, `Option<Vec<String>>`, and so on.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot have a masking rule applied",
    label = "this type is not string-like",
    note = "implement `MaskString` for the type and forward `ApplyMask` via `mask_value`",
    note = "or use bare `#[mask]` if the type derives `Mask`"
)]
pub trait ApplyMask: Sized {
    /// Returns a copy of `self` with `rule` applied to every leaf value.
    #[must_use]
    fn apply_rule(self, rule: &MaskRule) -> Self;
}

impl ApplyMask for String {
    fn apply_rule(self, rule: &MaskRule) -> Self {
        mask_value(self, rule)
    }
}

impl ApplyMask for Cow<'_, str> {
    fn apply_rule(self, rule: &MaskRule) -> Self {
        mask_value(self, rule)
    }
}

impl<T> ApplyMask for Option<T>
where
    T: ApplyMask,
{
    fn apply_rule(self, rule: &MaskRule) -> Self {
        self.map(|value| value.apply_rule(rule))
    }
}

impl<T> ApplyMask for Vec<T>
where
    T: ApplyMask,
{
    fn apply_rule(self, rule: &MaskRule) -> Self {
        self.into_iter()
            .map(|value| value.apply_rule(rule))
            .collect()
    }
}

impl<T> ApplyMask for Box<T>
where
    T: ApplyMask,
{
    fn apply_rule(self, rule: &MaskRule) -> Self {
        Box::new((*self).apply_rule(rule))
    }
}

// =============================================================================
// Maskable - Types that CONTAIN maskable data (containers)
// =============================================================================

/// A type that contains maskable data and can be traversed for masking.
///
/// This trait is implemented by types that derive `Mask`. Calling
/// [`Maskable::mask`] consumes the value and returns a copy with every tagged
/// field masked by its category rule (or inline custom rule).
///
/// Masking is applied at the emission boundary: mask a value right before
/// serializing or logging it, and leave the original untouched everywhere
/// else.
///
/// ## Strings are not masked by walking
///
/// The `Maskable` impls for `String`, `Cow<str>`, and the scalar leaf types
/// are passthroughs, so bare `#[mask]` on a string field walks into it and
/// changes nothing. A string field that needs masking must name a rule:
/// `#[mask(Category)]` or `#[mask(custom(...))]`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Maskable`",
    label = "this type cannot be walked for maskable data",
    note = "use `#[derive(Mask)]` on the type definition",
    note = "or use `#[mask(Category)]` if this is a leaf value like String"
)]
pub trait Maskable: Sized {
    /// Returns a masked copy of `self`.
    #[must_use]
    fn mask(self) -> Self;
}

/// Masks `value` using its tagged category rules.
///
/// Free-function form of [`Maskable::mask`].
#[must_use]
pub fn mask<T>(value: T) -> T
where
    T: Maskable,
{
    value.mask()
}

// =============================================================================
// Maskable implementations for standard library types
// =============================================================================

macro_rules! impl_maskable_passthrough {
    ($ty:ty) => {
        impl Maskable for $ty {
            fn mask(self) -> Self {
                self
            }
        }
    };
}

impl_maskable_passthrough!(String);
impl_maskable_passthrough!(bool);
impl_maskable_passthrough!(char);
impl_maskable_passthrough!(i8);
impl_maskable_passthrough!(i16);
impl_maskable_passthrough!(i32);
impl_maskable_passthrough!(i64);
impl_maskable_passthrough!(i128);
impl_maskable_passthrough!(isize);
impl_maskable_passthrough!(u8);
impl_maskable_passthrough!(u16);
impl_maskable_passthrough!(u32);
impl_maskable_passthrough!(u64);
impl_maskable_passthrough!(u128);
impl_maskable_passthrough!(usize);
impl_maskable_passthrough!(f32);
impl_maskable_passthrough!(f64);
impl_maskable_passthrough!(());

impl Maskable for Cow<'_, str> {
    fn mask(self) -> Self {
        self
    }
}

impl<T> Maskable for Option<T>
where
    T: Maskable,
{
    fn mask(self) -> Self {
        self.map(Maskable::mask)
    }
}

impl<T, E> Maskable for Result<T, E>
where
    T: Maskable,
    E: Maskable,
{
    fn mask(self) -> Self {
        match self {
            Ok(value) => Ok(value.mask()),
            Err(err) => Err(err.mask()),
        }
    }
}

impl<T> Maskable for Vec<T>
where
    T: Maskable,
{
    fn mask(self) -> Self {
        self.into_iter().map(Maskable::mask).collect()
    }
}

impl<T> Maskable for Box<T>
where
    T: Maskable,
{
    fn mask(self) -> Self {
        Box::new((*self).mask())
    }
}

impl<K, V, S> Maskable for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Maskable,
    S: std::hash::BuildHasher + Clone,
{
    fn mask(self) -> Self {
        let hasher = self.hasher().clone();
        let mut result = HashMap::with_hasher(hasher);
        result.extend(self.into_iter().map(|(k, v)| (k, v.mask())));
        result
    }
}

impl<K, V> Maskable for BTreeMap<K, V>
where
    K: Ord,
    V: Maskable,
{
    fn mask(self) -> Self {
        self.into_iter().map(|(k, v)| (k, v.mask())).collect()
    }
}

impl<T, S> Maskable for HashSet<T, S>
where
    T: Maskable + Hash + Eq,
    S: std::hash::BuildHasher + Clone,
{
    fn mask(self) -> Self {
        let hasher = self.hasher().clone();
        let mut result = HashSet::with_hasher(hasher);
        result.extend(self.into_iter().map(Maskable::mask));
        result
    }
}

impl<T> Maskable for BTreeSet<T>
where
    T: Maskable + Ord,
{
    fn mask(self) -> Self {
        self.into_iter().map(Maskable::mask).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        borrow::Cow,
        collections::{BTreeMap, HashMap},
    };

    use super::{mask_value, ApplyMask, MaskString, Maskable};
    use crate::{category::Money, Mask, MaskRule};

    // =========================================================================
    // MaskString / ApplyMask tests
    // =========================================================================

    #[test]
    fn string_mask_string_round_trip() {
        let original = "13800138000".to_string();
        assert_eq!(original.as_str(), "13800138000");
        let masked = String::from_masked("138****8000".to_string());
        assert_eq!(masked, "138****8000");
    }

    #[test]
    fn cow_mask_string_round_trip() {
        let original: Cow<'static, str> = Cow::Borrowed("13800138000");
        assert_eq!(MaskString::as_str(&original), "13800138000");
        let masked = Cow::from_masked("138****8000".to_string());
        match masked {
            Cow::Owned(value) => assert_eq!(value, "138****8000"),
            Cow::Borrowed(_) => panic!("masked Cow should be owned"),
        }
    }

    #[test]
    fn mask_value_applies_rule_to_newtype() {
        struct CardNo(String);

        impl MaskString for CardNo {
            fn as_str(&self) -> &str {
                &self.0
            }
            fn from_masked(masked: String) -> Self {
                Self(masked)
            }
        }

        let masked = mask_value(CardNo("6222801234".to_string()), &MaskRule::keep_last(4));
        assert_eq!(masked.0, "******1234");
    }

    #[test]
    fn apply_mask_recurses_through_wrappers() {
        let rule = MaskRule::keep_first(1);

        let value = Some("zhang".to_string());
        assert_eq!(value.apply_rule(&rule), Some("z****".to_string()));

        let values = vec!["abc".to_string(), "def".to_string()];
        assert_eq!(
            values.apply_rule(&rule),
            vec!["a**".to_string(), "d**".to_string()]
        );

        let boxed = Box::new("abc".to_string());
        assert_eq!(*boxed.apply_rule(&rule), "a**".to_string());

        let nested: Option<Vec<String>> = Some(vec!["abc".to_string()]);
        assert_eq!(nested.apply_rule(&rule), Some(vec!["a**".to_string()]));
    }

    // =========================================================================
    // Maskable traversal tests
    // =========================================================================

    #[derive(Clone, Mask)]
    #[cfg_attr(feature = "slog", derive(serde::Serialize))]
    struct Amount {
        #[mask(Money)]
        value: String,
    }

    #[test]
    fn option_traversal_masks_inner() {
        let value = Some(Amount {
            value: "15000.00".to_string(),
        });
        let masked = value.mask();
        assert_eq!(masked.unwrap().value, "******");
    }

    #[test]
    fn result_traversal_masks_ok_and_err() {
        let ok_value: Result<Amount, Amount> = Ok(Amount {
            value: "100".to_string(),
        });
        assert_eq!(ok_value.mask().unwrap().value, "******");

        let err_value: Result<Amount, Amount> = Err(Amount {
            value: "200".to_string(),
        });
        assert_eq!(err_value.mask().unwrap_err().value, "******");
    }

    #[test]
    fn vec_traversal_masks_all_elements() {
        let values = vec![
            Amount {
                value: "1".to_string(),
            },
            Amount {
                value: "2".to_string(),
            },
        ];
        let masked = values.mask();
        assert!(masked.into_iter().all(|amount| amount.value == "******"));
    }

    #[test]
    fn map_traversal_masks_values_not_keys() {
        let mut map: HashMap<String, Amount> = HashMap::new();
        map.insert(
            "balance".to_string(),
            Amount {
                value: "15000.00".to_string(),
            },
        );
        let masked = map.mask();
        assert!(masked.contains_key("balance"));
        assert_eq!(masked["balance"].value, "******");
    }

    #[test]
    fn btreemap_traversal_masks_values() {
        let mut map: BTreeMap<String, Amount> = BTreeMap::new();
        map.insert(
            "balance".to_string(),
            Amount {
                value: "15000.00".to_string(),
            },
        );
        let masked = map.mask();
        assert_eq!(masked["balance"].value, "******");
    }

    #[test]
    fn bare_mask_on_string_field_walks_the_passthrough() {
        // Bare #[mask] means "walk", and String's Maskable impl is a
        // passthrough, so the value survives unchanged. Strings that need
        // masking must carry a category or custom rule instead.
        #[derive(Clone, Mask)]
        #[cfg_attr(feature = "slog", derive(serde::Serialize))]
        struct Record {
            #[mask]
            note: String,
        }

        let masked = Record {
            note: "not sensitive".to_string(),
        }
        .mask();
        assert_eq!(masked.note, "not sensitive");
    }

    #[test]
    fn nested_container_traversal_masks_inner() {
        let values = vec![Some(Amount {
            value: "15000.00".to_string(),
        })];
        let masked = values.mask();
        assert_eq!(masked[0].as_ref().unwrap().value, "******");
    }
}
