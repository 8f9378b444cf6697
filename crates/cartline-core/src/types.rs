//! # Domain Types
//!
//! Small value types shared by line items and discounts.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ProductId     │   │   Attributes    │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Number(i64)    │   │  BTreeMap       │   │  percentage     │       │
//! │  │  Text(String)   │   │  key → scalar   │   │  10 = 10%       │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ AttributeValue  │   │ ModelReference  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Bool           │   │  opaque tag,    │                             │
//! │  │  Text           │   │  never resolved │                             │
//! │  │  Number         │   │  by the core    │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Canonical Attributes
//! Options and extras are stored in a `BTreeMap`, so keys are always sorted.
//! Serializing an [`Attributes`] value is therefore canonical by construction:
//! `{size: L, color: red}` and `{color: red, size: L}` produce the same bytes.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Product Identifier
// =============================================================================

/// External product reference: either a numeric or a textual key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl ProductId {
    /// Empty identifiers are rejected at construction.
    ///
    /// `0` and blank strings both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            ProductId::Number(n) => *n == 0,
            ProductId::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId::Number(id)
    }
}

impl From<i32> for ProductId {
    fn from(id: i32) -> Self {
        ProductId::Number(id as i64)
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId::Number(id as i64)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::Text(id.to_string())
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        ProductId::Text(id)
    }
}

// =============================================================================
// Attribute Value
// =============================================================================

/// A scalar option/extra value.
///
/// `Text` is tried before `Number` when deserializing so that `"12"` stays a
/// string instead of being parsed into a decimal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Text(String),
    Number(Decimal),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(Decimal::from(value))
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Number(Decimal::from(value))
    }
}

impl From<Decimal> for AttributeValue {
    fn from(value: Decimal) -> Self {
        AttributeValue::Number(value)
    }
}

// =============================================================================
// Attributes (options / extras)
// =============================================================================

/// Sorted key → scalar map used for both product options and extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(BTreeMap<String, AttributeValue>);

impl Attributes {
    /// Empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ## Example
    /// ```rust
    /// use cartline_core::Attributes;
    ///
    /// let options = Attributes::new().with("size", "L").with("color", "red");
    /// assert_eq!(options.keys().collect::<Vec<_>>(), vec!["color", "size"]);
    /// ```
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the previous one for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Attributes(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Attributes
where
    K: Into<String>,
    V: Into<AttributeValue>,
{
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a percentage (`10` means 10%).
///
/// The 0-100 range is a convention only; values outside it are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    #[inline]
    pub const fn from_percentage(pct: Decimal) -> Self {
        TaxRate(pct)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percentage(&self) -> Decimal {
        self.0
    }

    /// Returns the rate as a multiplier (`10%` → `0.10`).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(Decimal::ZERO)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

impl From<Decimal> for TaxRate {
    fn from(pct: Decimal) -> Self {
        TaxRate(pct)
    }
}

// =============================================================================
// Model Reference
// =============================================================================

/// Opaque tag naming the external entity type a line item is associated with.
///
/// The core only stores it and hands it back to a
/// [`ModelResolver`](crate::collaborators::ModelResolver) at export time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelReference(String);

impl ModelReference {
    pub fn new(reference: impl Into<String>) -> Self {
        ModelReference(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelReference {
    fn from(reference: &str) -> Self {
        ModelReference::new(reference)
    }
}

impl From<String> for ModelReference {
    fn from(reference: String) -> Self {
        ModelReference(reference)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
