//! Marker types for "what kind of maskable data is this?"
//!
//! These types are zero-sized. They exist only at the type level so masking
//! rules can be attached without storing any runtime data.

/// Marker trait for masking categories.
///
/// Implement this for zero-sized marker types (unit structs):
///
/// ```rust
/// use remold::MaskCategory;
///
/// #[derive(Clone, Copy)]
/// struct MyCategory;
///
/// impl MaskCategory for MyCategory {}
/// ```
pub trait MaskCategory {}

/// Category marker for personal names.
#[derive(Clone, Copy)]
pub struct Name;
impl MaskCategory for Name {}

/// Category marker for mobile phone numbers.
#[derive(Clone, Copy)]
pub struct Mobile;
impl MaskCategory for Mobile {}

/// Category marker for government-issued identity numbers.
#[derive(Clone, Copy)]
pub struct IdNumber;
impl MaskCategory for IdNumber {}

/// Category marker for bank card numbers or PANs.
#[derive(Clone, Copy)]
pub struct BankCard;
impl MaskCategory for BankCard {}

/// Category marker for email addresses.
#[derive(Clone, Copy)]
pub struct Email;
impl MaskCategory for Email {}

/// Category marker for street or mailing addresses.
#[derive(Clone, Copy)]
pub struct Address;
impl MaskCategory for Address {}

/// Category marker for monetary amounts.
#[derive(Clone, Copy)]
pub struct Money;
impl MaskCategory for Money {}
