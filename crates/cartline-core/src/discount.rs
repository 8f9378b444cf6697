//! # Discount Rules
//!
//! A [`DiscountRule`] is an immutable value object owned by one line item.
//! Updating a discount always swaps in a freshly validated rule.
//!
//! ## Discount Math
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate_discount(price)                            │
//! │                                                                         │
//! │  Currency (value = 5)                                                  │
//! │    price = 20  → 5           value <= price: full value off            │
//! │    price = 3   → 0           value >  price: nothing off               │
//! │                                                                         │
//! │  Percentage (value = 25)                                               │
//! │    price = 20  → 5           price × value / 100                       │
//! │                                                                         │
//! │  apply_discount(price) = price − calculate_discount(price)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use cartline_core::discount::DiscountRule;
//! use rust_decimal::Decimal;
//!
//! let rule = DiscountRule::percentage(Decimal::from(25)).unwrap();
//! assert_eq!(rule.apply_discount(Decimal::from(20)), Decimal::from(15));
//! ```

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{FormatOverrides, NumberFormat};

// =============================================================================
// Discount Kind
// =============================================================================

/// Whether a discount is a fixed amount or a percentage of the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DiscountKind {
    /// Fixed amount off each unit.
    #[default]
    Currency,
    /// Percentage (0-100) off each unit.
    Percentage,
}

impl DiscountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountKind::Currency => "currency",
            DiscountKind::Percentage => "percentage",
        }
    }

    /// Display marker: `-` for currency, `%` for percentage.
    pub fn symbol(&self) -> &'static str {
        match self {
            DiscountKind::Currency => "-",
            DiscountKind::Percentage => "%",
        }
    }
}

impl fmt::Display for DiscountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "currency" => Ok(DiscountKind::Currency),
            "percentage" => Ok(DiscountKind::Percentage),
            _ => Err(CoreError::InvalidDiscountKind(s.to_string())),
        }
    }
}

// =============================================================================
// Discount Rule
// =============================================================================

/// A validated discount.
///
/// ## Invariants
/// - Percentage values lie in `[0, 100]`
/// - Currency values are `>= 0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountRule {
    value: Decimal,
    kind: DiscountKind,
    description: String,
}

impl DiscountRule {
    /// Creates a discount rule.
    ///
    /// ## Errors
    /// - `InvalidDiscountValue` for a percentage outside `[0, 100]` or a
    ///   negative currency amount
    pub fn new(
        value: Decimal,
        kind: DiscountKind,
        description: impl Into<String>,
    ) -> CoreResult<Self> {
        let in_range = match kind {
            DiscountKind::Percentage => value >= Decimal::ZERO && value <= Decimal::ONE_HUNDRED,
            DiscountKind::Currency => value >= Decimal::ZERO,
        };

        if !in_range {
            return Err(CoreError::InvalidDiscountValue {
                value: value.to_string(),
                kind: kind.to_string(),
            });
        }

        Ok(DiscountRule {
            value,
            kind,
            description: description.into(),
        })
    }

    /// Creates a discount rule from a textual kind (`"currency"` / `"percentage"`).
    ///
    /// ## Errors
    /// - `InvalidDiscountKind` for any other kind
    /// - `InvalidDiscountValue` as for [`DiscountRule::new`]
    pub fn parse(value: Decimal, kind: &str, description: impl Into<String>) -> CoreResult<Self> {
        Self::new(value, kind.parse::<DiscountKind>()?, description)
    }

    /// Fixed amount off each unit.
    pub fn currency(value: Decimal) -> CoreResult<Self> {
        Self::new(value, DiscountKind::Currency, "")
    }

    /// Percentage off each unit.
    pub fn percentage(value: Decimal) -> CoreResult<Self> {
        Self::new(value, DiscountKind::Percentage, "")
    }

    /// The zero currency discount every line item starts with.
    pub fn none() -> Self {
        DiscountRule {
            value: Decimal::ZERO,
            kind: DiscountKind::Currency,
            description: String::new(),
        }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn kind(&self) -> DiscountKind {
        self.kind
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn symbol(&self) -> &'static str {
        self.kind.symbol()
    }

    /// Amount taken off one unit at `price`.
    ///
    /// A currency discount larger than the price takes nothing off.
    pub fn calculate_discount(&self, price: Decimal) -> Decimal {
        match self.kind {
            DiscountKind::Currency => {
                if self.value > price {
                    Decimal::ZERO
                } else {
                    self.value
                }
            }
            DiscountKind::Percentage => price * (self.value / Decimal::ONE_HUNDRED),
        }
    }

    /// Unit price after the discount.
    pub fn apply_discount(&self, price: Decimal) -> Decimal {
        price - self.calculate_discount(price)
    }

    /// Renders the discount for display.
    ///
    /// ## Output
    /// - Currency: `"- $5,000.00"` (symbol is caller supplied)
    /// - Percentage: `"- 23.00%"`
    pub fn format(
        &self,
        currency_symbol: &str,
        number_format: &NumberFormat,
        overrides: &FormatOverrides,
    ) -> String {
        let amount = number_format.format_with(self.value, overrides);
        match self.kind {
            DiscountKind::Currency => format!("- {}{}", currency_symbol, amount),
            DiscountKind::Percentage => format!("- {}%", amount),
        }
    }

    /// Exported `discountRate` mapping.
    pub fn export(&self) -> DiscountExport {
        DiscountExport {
            value: self.value,
            kind: self.kind,
            description: self.description.clone(),
            symbol: self.symbol().to_string(),
        }
    }
}

impl Default for DiscountRule {
    fn default() -> Self {
        DiscountRule::none()
    }
}

// =============================================================================
// Discount Request
// =============================================================================

/// Loosely typed discount input, as received from a form or JSON body.
///
/// ## Example
/// ```json
/// { "value": 10, "type": "percentage", "description": "Spring sale" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountRequest {
    #[serde(default)]
    pub value: Option<Decimal>,

    /// `"currency"` (default) or `"percentage"`.
    #[serde(default, alias = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl DiscountRequest {
    pub fn currency(value: Decimal) -> Self {
        DiscountRequest {
            value: Some(value),
            kind: Some(DiscountKind::Currency.to_string()),
            description: None,
        }
    }

    pub fn percentage(value: Decimal) -> Self {
        DiscountRequest {
            value: Some(value),
            kind: Some(DiscountKind::Percentage.to_string()),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validates the request into a rule.
    ///
    /// ## Errors
    /// - `InvalidDiscountArguments` when no value was supplied
    /// - otherwise as for [`DiscountRule::parse`]
    pub fn into_rule(self) -> CoreResult<DiscountRule> {
        let value = self.value.ok_or(CoreError::InvalidDiscountArguments)?;
        let kind = match self.kind.as_deref() {
            Some(kind) => kind.parse::<DiscountKind>()?,
            None => DiscountKind::default(),
        };

        DiscountRule::new(value, kind, self.description.unwrap_or_default())
    }
}

// =============================================================================
// Export Shape
// =============================================================================

/// `discountRate` entry of the exported line item.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DiscountExport {
    #[ts(type = "number")]
    pub value: Decimal,

    #[serde(rename = "type")]
    pub kind: DiscountKind,

    pub description: String,

    pub symbol: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("currency".parse::<DiscountKind>().unwrap(), DiscountKind::Currency);
        assert_eq!(
            "Percentage".parse::<DiscountKind>().unwrap(),
            DiscountKind::Percentage
        );
        assert!(matches!(
            "fixed".parse::<DiscountKind>(),
            Err(CoreError::InvalidDiscountKind(_))
        ));
    }

    #[test]
    fn test_percentage_range() {
        assert!(DiscountRule::percentage(dec!(0)).is_ok());
        assert!(DiscountRule::percentage(dec!(100)).is_ok());

        assert!(matches!(
            DiscountRule::percentage(dec!(150)),
            Err(CoreError::InvalidDiscountValue { .. })
        ));
        assert!(matches!(
            DiscountRule::percentage(dec!(-1)),
            Err(CoreError::InvalidDiscountValue { .. })
        ));
    }

    #[test]
    fn test_currency_must_not_be_negative() {
        assert!(DiscountRule::currency(dec!(1000000)).is_ok());
        assert!(matches!(
            DiscountRule::currency(dec!(-5)),
            Err(CoreError::InvalidDiscountValue { .. })
        ));
    }

    #[test]
    fn test_parse_unknown_kind() {
        assert!(matches!(
            DiscountRule::parse(dec!(5), "bogus", ""),
            Err(CoreError::InvalidDiscountKind(_))
        ));
    }

    #[test]
    fn test_currency_calculation() {
        let rule = DiscountRule::currency(dec!(5)).unwrap();
        assert_eq!(rule.calculate_discount(dec!(20)), dec!(5));
        assert_eq!(rule.apply_discount(dec!(20)), dec!(15));

        // Exactly the price: full discount
        assert_eq!(rule.calculate_discount(dec!(5)), dec!(5));
        assert_eq!(rule.apply_discount(dec!(5)), dec!(0));
    }

    #[test]
    fn test_currency_larger_than_price_takes_nothing_off() {
        let rule = DiscountRule::currency(dec!(15)).unwrap();
        assert_eq!(rule.calculate_discount(dec!(10)), dec!(0));
        assert_eq!(rule.apply_discount(dec!(10)), dec!(10));
    }

    #[test]
    fn test_percentage_calculation() {
        let rule = DiscountRule::percentage(dec!(25)).unwrap();
        assert_eq!(rule.calculate_discount(dec!(20)), dec!(5));
        assert_eq!(rule.apply_discount(dec!(20)), dec!(15));

        let full = DiscountRule::percentage(dec!(100)).unwrap();
        assert_eq!(full.calculate_discount(dec!(200)), dec!(200));
        assert_eq!(full.apply_discount(dec!(200)), dec!(0));
    }

    #[test]
    fn test_none_is_zero_currency() {
        let rule = DiscountRule::default();
        assert_eq!(rule.kind(), DiscountKind::Currency);
        assert_eq!(rule.value(), dec!(0));
        assert_eq!(rule.calculate_discount(dec!(99)), dec!(0));
    }

    #[test]
    fn test_format() {
        let format = NumberFormat::default();
        let none = FormatOverrides::new();

        let rule = DiscountRule::currency(dec!(5000)).unwrap();
        assert_eq!(rule.format("$", &format, &none), "- $5,000.00");

        let rule = DiscountRule::percentage(dec!(23)).unwrap();
        assert_eq!(
            rule.format("$", &format, &FormatOverrides::new().decimals(0)),
            "- 23%"
        );
    }

    #[test]
    fn test_symbol() {
        assert_eq!(DiscountRule::currency(dec!(1)).unwrap().symbol(), "-");
        assert_eq!(DiscountRule::percentage(dec!(1)).unwrap().symbol(), "%");
    }

    #[test]
    fn test_request_into_rule() {
        let rule = DiscountRequest::percentage(dec!(10))
            .with_description("Spring sale")
            .into_rule()
            .unwrap();
        assert_eq!(rule.kind(), DiscountKind::Percentage);
        assert_eq!(rule.description(), "Spring sale");

        // Kind defaults to currency
        let request = DiscountRequest {
            value: Some(dec!(3)),
            ..Default::default()
        };
        assert_eq!(request.into_rule().unwrap().kind(), DiscountKind::Currency);

        assert!(matches!(
            DiscountRequest::default().into_rule(),
            Err(CoreError::InvalidDiscountArguments)
        ));
    }

    #[test]
    fn test_request_deserialize_type_alias() {
        let request: DiscountRequest =
            serde_json::from_str(r#"{"value": 10, "type": "percentage"}"#).unwrap();
        assert_eq!(request.kind.as_deref(), Some("percentage"));
        assert_eq!(request.value, Some(dec!(10)));
    }

    #[test]
    fn test_export() {
        let rule = DiscountRule::new(dec!(10), DiscountKind::Percentage, "VIP").unwrap();
        let json = serde_json::to_value(rule.export()).unwrap();

        assert_eq!(json["type"], "percentage");
        assert_eq!(json["description"], "VIP");
        assert_eq!(json["symbol"], "%");
        assert_eq!(json["value"].as_f64(), Some(10.0));
    }
}
